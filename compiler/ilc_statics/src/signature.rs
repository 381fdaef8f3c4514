//! Field signature decoding.
//!
//! Recovers just enough of a field's type to pick its static storage class:
//! the leading element tag (after modifiers, and after a generic
//! instantiation marker) plus, for value types, the value type's handle.
//! The handle is returned unresolved; nothing here looks at another type's
//! layout.

use ilc_meta::{BlobError, BlobReader, ElementType, TypeHandle};

/// Storage-relevant class of an element tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// `bool`, `i1`, `u1`.
    OneByte,
    /// `char`, `i2`, `u2`.
    TwoByte,
    /// `i4`, `u4`, `r4`.
    FourByte,
    /// `i`, `u`, unmanaged and function pointers.
    PointerSized,
    /// `i8`, `u8`, `r8`.
    EightByte,
    /// Object references and type variables: a GC-tracked pointer slot.
    Reference,
    /// Managed pointer.
    ByRef,
    /// Value type, with its handle alongside.
    ValueType,
    /// Anything else.
    Unrecognized,
}

impl ElementCategory {
    pub fn of(element: ElementType) -> Self {
        match element {
            ElementType::BOOLEAN | ElementType::I1 | ElementType::U1 => Self::OneByte,
            ElementType::CHAR | ElementType::I2 | ElementType::U2 => Self::TwoByte,
            ElementType::I4 | ElementType::U4 | ElementType::R4 => Self::FourByte,
            ElementType::I | ElementType::U | ElementType::PTR | ElementType::FNPTR => {
                Self::PointerSized
            }
            ElementType::I8 | ElementType::U8 | ElementType::R8 => Self::EightByte,
            ElementType::STRING
            | ElementType::CLASS
            | ElementType::OBJECT
            | ElementType::ARRAY
            | ElementType::SZARRAY
            | ElementType::VAR
            | ElementType::MVAR => Self::Reference,
            ElementType::BYREF => Self::ByRef,
            ElementType::VALUETYPE => Self::ValueType,
            _ => Self::Unrecognized,
        }
    }
}

/// Decoded shape of one field signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldSignatureInfo {
    /// Leading element tag after modifiers and generic instantiation.
    pub element_type: ElementType,
    pub category: ElementCategory,
    /// Handle following a `VALUETYPE` tag; unresolved.
    pub value_type: Option<TypeHandle>,
}

impl FieldSignatureInfo {
    pub fn new(element_type: ElementType, value_type: Option<TypeHandle>) -> Self {
        FieldSignatureInfo {
            element_type,
            category: ElementCategory::of(element_type),
            value_type,
        }
    }
}

/// A signature blob that cannot be decoded as a field signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("expected a field signature, found header 0x{header:02X}")]
    NotAFieldSignature { header: u8 },

    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Decode a field signature blob.
///
/// Trailing bytes (generic arguments, array shapes, pointee types) are not
/// read; they never affect static storage.
pub fn decode_field_signature(blob: &[u8]) -> Result<FieldSignatureInfo, SignatureError> {
    let mut reader = BlobReader::new(blob);

    let header = reader.read_signature_header()?;
    if !header.is_field() {
        return Err(SignatureError::NotAFieldSignature {
            header: header.raw(),
        });
    }

    let mut element = read_element_type(&mut reader)?;
    if element == ElementType::GENERICINST {
        element = read_element_type(&mut reader)?;
    }

    let value_type = if element == ElementType::VALUETYPE {
        Some(reader.read_type_handle()?)
    } else {
        None
    };

    Ok(FieldSignatureInfo::new(element, value_type))
}

/// Read the next element tag, discarding a leading sentinel and any custom
/// modifiers (each followed by its modifier type handle).
fn read_element_type(reader: &mut BlobReader<'_>) -> Result<ElementType, BlobError> {
    let mut element = reader.read_element_type()?;
    if element == ElementType::SENTINEL {
        element = reader.read_element_type()?;
    }
    while element.is_custom_modifier() {
        reader.read_compressed_u32()?;
        element = reader.read_element_type()?;
    }
    Ok(element)
}

#[cfg(test)]
mod tests;
