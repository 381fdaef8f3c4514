//! Static layout failures.
//!
//! Every variant describes a defect of the input module (or of the target
//! configuration), never a recoverable condition: computing a module's
//! layout stops at the first one and nothing is published.

use ilc_meta::{ElementType, FieldDefId, TypeDefId};

use crate::signature::SignatureError;

/// Why a field signature could not be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSignatureKind {
    /// The blob is not a well-formed field signature.
    #[error(transparent)]
    Malformed(#[from] SignatureError),

    /// The element tag has no storage class and no type handle to fall
    /// back on.
    #[error("element type {0} has no static storage class")]
    UninterpretableElementType(ElementType),
}

/// Why a well-formed field type cannot live in static storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnsupportedReason {
    #[error("by-reference fields cannot be static")]
    ByRefField,

    /// The boxed value type is stack-only.
    #[error("by-ref-like value type {0:?} cannot be boxed into a static")]
    ByRefLikeValueType(TypeDefId),
}

/// Fatal error while laying out a module's statics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StaticLayoutError {
    /// Malformed or unexpected signature shape (invalid program).
    #[error("invalid signature on static field {field:?}: {kind}")]
    InvalidSignature {
        field: FieldDefId,
        kind: InvalidSignatureKind,
    },

    /// Field type is illegal as static storage (type load failure).
    #[error("unsupported static field type on {field:?}: {reason}")]
    UnsupportedStaticFieldType {
        field: FieldDefId,
        reason: UnsupportedReason,
    },

    /// The target parameters cannot be laid out against.
    #[error("unsupported target: pointer size {pointer_size}, maximum primitive size {maximum_primitive_size}")]
    UnsupportedTarget {
        pointer_size: u32,
        maximum_primitive_size: u32,
    },
}

impl StaticLayoutError {
    /// The offending field, for the two input-module errors.
    pub fn field(&self) -> Option<FieldDefId> {
        match self {
            Self::InvalidSignature { field, .. } | Self::UnsupportedStaticFieldType { field, .. } => {
                Some(*field)
            }
            Self::UnsupportedTarget { .. } => None,
        }
    }

    /// `true` for the invalid-program class of failure.
    pub fn is_invalid_program(&self) -> bool {
        matches!(self, Self::InvalidSignature { .. })
    }

    /// `true` for the type-load class of failure.
    pub fn is_type_load(&self) -> bool {
        matches!(self, Self::UnsupportedStaticFieldType { .. })
    }
}
