//! Size, alignment and GC-ness of a static field's slot.
//!
//! The primitive rows are a plain table. Three rows are runtime
//! compatibility policy and stay separate, named branches:
//!
//! - value types defined in this module are stored boxed, behind a
//!   GC-tracked pointer, unless they are stack-only;
//! - anything else that carries a type handle (a value type from another
//!   module, or an unrecognized tag) gets a pessimistic raw slot of the
//!   maximum primitive size, since its real size is unknown here;
//! - by-reference fields never get static storage.

use ilc_meta::{CustomAttributeReader, FieldDefId, MetadataReader, TypeDefId, TypeHandle};

use crate::error::{InvalidSignatureKind, StaticLayoutError, UnsupportedReason};
use crate::probes;
use crate::signature::{ElementCategory, FieldSignatureInfo};
use crate::target::TargetDetails;

/// Which classification rule produced a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StaticSlotKind {
    /// Raw scalar bytes.
    Primitive,
    /// Object reference.
    GcReference,
    /// Pointer to a boxed local value type.
    BoxedValueType,
    /// Conservative slot for a type whose layout is unknown in this module.
    PessimisticFallback,
}

/// Storage requirements of one static field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StaticSlot {
    pub kind: StaticSlotKind,
    pub size: u32,
    pub alignment: u32,
}

impl StaticSlot {
    const fn primitive(size: u32) -> Self {
        StaticSlot {
            kind: StaticSlotKind::Primitive,
            size,
            alignment: size,
        }
    }

    /// Does the slot hold a reference the GC must scan?
    pub const fn is_gc(&self) -> bool {
        matches!(
            self.kind,
            StaticSlotKind::GcReference | StaticSlotKind::BoxedValueType
        )
    }
}

/// Classify one eligible static field from its decoded signature.
pub fn classify_static_field<M>(
    module: &M,
    field: FieldDefId,
    info: &FieldSignatureInfo,
    target: TargetDetails,
) -> Result<StaticSlot, StaticLayoutError>
where
    M: MetadataReader + CustomAttributeReader,
{
    let pointer_size = target.pointer_size();
    let slot = match info.category {
        ElementCategory::OneByte => StaticSlot::primitive(1),
        ElementCategory::TwoByte => StaticSlot::primitive(2),
        ElementCategory::FourByte => StaticSlot::primitive(4),
        ElementCategory::PointerSized => StaticSlot::primitive(pointer_size),
        ElementCategory::EightByte => StaticSlot::primitive(8),
        ElementCategory::Reference => StaticSlot {
            kind: StaticSlotKind::GcReference,
            size: pointer_size,
            alignment: pointer_size,
        },
        ElementCategory::ByRef => {
            return Err(StaticLayoutError::UnsupportedStaticFieldType {
                field,
                reason: UnsupportedReason::ByRefField,
            });
        }
        ElementCategory::ValueType => {
            let local = info
                .value_type
                .and_then(|handle| module.resolve_type_def(handle));
            match local {
                Some(ty) => boxed_value_type(module, field, ty, pointer_size)?,
                None => pessimistic_fallback(field, info, target)?,
            }
        }
        ElementCategory::Unrecognized => pessimistic_fallback(field, info, target)?,
    };
    Ok(slot)
}

/// A local value type, stored as a GC pointer to its box.
fn boxed_value_type<M>(
    module: &M,
    field: FieldDefId,
    ty: TypeDefId,
    pointer_size: u32,
) -> Result<StaticSlot, StaticLayoutError>
where
    M: MetadataReader + CustomAttributeReader,
{
    if probes::is_by_ref_like(module, TypeHandle::TypeDef(ty)) {
        return Err(StaticLayoutError::UnsupportedStaticFieldType {
            field,
            reason: UnsupportedReason::ByRefLikeValueType(ty),
        });
    }
    Ok(StaticSlot {
        kind: StaticSlotKind::BoxedValueType,
        size: pointer_size,
        alignment: pointer_size,
    })
}

/// Raw slot of the maximum primitive size, or an invalid signature when
/// there is no type handle to justify one.
///
/// Local and foreign handles take this path alike: a local type reached
/// here has not been laid out, so its size is just as unknown.
fn pessimistic_fallback(
    field: FieldDefId,
    info: &FieldSignatureInfo,
    target: TargetDetails,
) -> Result<StaticSlot, StaticLayoutError> {
    if info.value_type.is_none() {
        return Err(StaticLayoutError::InvalidSignature {
            field,
            kind: InvalidSignatureKind::UninterpretableElementType(info.element_type),
        });
    }
    let maximum = target.maximum_primitive_size();
    Ok(StaticSlot {
        kind: StaticSlotKind::PessimisticFallback,
        size: maximum,
        alignment: maximum,
    })
}
