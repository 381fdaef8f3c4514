//! Signature blob reading and writing.
//!
//! [`BlobReader`] is a forward-only cursor with the handful of primitives a
//! field signature needs: single bytes, ECMA-335 compressed unsigned
//! integers (II.23.2), and `TypeDefOrRefOrSpecEncoded` handles.
//! [`SignatureBuilder`] produces the same encoding.

use crate::element_type::{ElementType, SignatureHeader};
use crate::handles::TypeHandle;

/// Largest value representable as a compressed unsigned integer.
pub const MAX_COMPRESSED_U32: u32 = 0x1FFF_FFFF;

/// Failure to read or write a signature blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
    /// The blob ended in the middle of a value.
    #[error("unexpected end of blob at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// The lead byte of a compressed integer has the reserved `111` prefix.
    #[error("invalid compressed integer lead byte 0x{lead:02X} at offset {offset}")]
    InvalidCompressedInteger { offset: usize, lead: u8 },

    /// A coded type handle used the reserved table tag.
    #[error("invalid type handle coded index 0x{coded:X} at offset {offset}")]
    InvalidTypeHandle { offset: usize, coded: u32 },

    /// A value does not fit the compressed integer encoding.
    #[error("value 0x{value:X} exceeds the compressed integer range")]
    CompressedIntegerTooLarge { value: u32 },
}

/// Forward-only reader over a signature blob.
#[derive(Clone, Debug)]
pub struct BlobReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BlobReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BlobReader { bytes, offset: 0 }
    }

    /// Current position from the start of the blob.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn read_u8(&mut self) -> Result<u8, BlobError> {
        let byte = *self
            .bytes
            .get(self.offset)
            .ok_or(BlobError::UnexpectedEnd {
                offset: self.offset,
            })?;
        self.offset += 1;
        Ok(byte)
    }

    pub fn read_element_type(&mut self) -> Result<ElementType, BlobError> {
        self.read_u8().map(ElementType::from_raw)
    }

    pub fn read_signature_header(&mut self) -> Result<SignatureHeader, BlobError> {
        self.read_u8().map(SignatureHeader::from_raw)
    }

    /// Read a compressed unsigned integer.
    ///
    /// Lead byte `0xxxxxxx` is a one-byte value, `10xxxxxx` starts a
    /// two-byte value and `110xxxxx` a four-byte value, all big-endian.
    pub fn read_compressed_u32(&mut self) -> Result<u32, BlobError> {
        let start = self.offset;
        let lead = self.read_u8()?;
        if lead & 0x80 == 0 {
            return Ok(u32::from(lead));
        }
        if lead & 0xC0 == 0x80 {
            let low = self.read_u8()?;
            return Ok((u32::from(lead & 0x3F) << 8) | u32::from(low));
        }
        if lead & 0xE0 == 0xC0 {
            let mut value = u32::from(lead & 0x1F);
            for _ in 0..3 {
                value = (value << 8) | u32::from(self.read_u8()?);
            }
            return Ok(value);
        }
        Err(BlobError::InvalidCompressedInteger {
            offset: start,
            lead,
        })
    }

    /// Read a `TypeDefOrRefOrSpecEncoded` handle.
    pub fn read_type_handle(&mut self) -> Result<TypeHandle, BlobError> {
        let start = self.offset;
        let coded = self.read_compressed_u32()?;
        TypeHandle::from_coded(coded).ok_or(BlobError::InvalidTypeHandle {
            offset: start,
            coded,
        })
    }
}

/// Append `value` to `out` in compressed form.
pub fn write_compressed_u32(out: &mut Vec<u8>, value: u32) -> Result<(), BlobError> {
    let bytes = value.to_be_bytes();
    match value {
        0..=0x7F => out.push(bytes[3]),
        0x80..=0x3FFF => out.extend_from_slice(&[bytes[2] | 0x80, bytes[3]]),
        0x4000..=MAX_COMPRESSED_U32 => {
            out.extend_from_slice(&[bytes[0] | 0xC0, bytes[1], bytes[2], bytes[3]]);
        }
        _ => return Err(BlobError::CompressedIntegerTooLarge { value }),
    }
    Ok(())
}

/// Encoder for field signature blobs.
///
/// Calls chain by value; the first encoding failure is remembered and
/// reported by [`finish`](Self::finish).
///
/// ```
/// use ilc_meta::{ElementType, SignatureBuilder};
///
/// let sig = SignatureBuilder::field().element(ElementType::I4).finish();
/// assert_eq!(sig, Ok(vec![0x06, 0x08]));
/// ```
#[derive(Clone, Debug)]
pub struct SignatureBuilder {
    bytes: Vec<u8>,
    error: Option<BlobError>,
}

impl SignatureBuilder {
    /// Start a field signature (`FIELD` header already written).
    pub fn field() -> Self {
        Self::with_header(SignatureHeader::FIELD)
    }

    /// Start a blob with an arbitrary header byte.
    pub fn with_header(header: SignatureHeader) -> Self {
        SignatureBuilder {
            bytes: vec![header.raw()],
            error: None,
        }
    }

    #[must_use]
    pub fn element(mut self, element: ElementType) -> Self {
        self.bytes.push(element.raw());
        self
    }

    #[must_use]
    pub fn sentinel(self) -> Self {
        self.element(ElementType::SENTINEL)
    }

    /// A `modreq`/`modopt` followed by its modifier type.
    #[must_use]
    pub fn custom_modifier(self, required: bool, modifier: TypeHandle) -> Self {
        let tag = if required {
            ElementType::CMOD_REQD
        } else {
            ElementType::CMOD_OPT
        };
        self.element(tag).type_handle(modifier)
    }

    /// `VALUETYPE` followed by the value type's handle.
    #[must_use]
    pub fn value_type(self, handle: TypeHandle) -> Self {
        self.element(ElementType::VALUETYPE).type_handle(handle)
    }

    /// `CLASS` followed by the class's handle.
    #[must_use]
    pub fn class(self, handle: TypeHandle) -> Self {
        self.element(ElementType::CLASS).type_handle(handle)
    }

    /// `GENERICINST (CLASS | VALUETYPE) handle count args...`.
    ///
    /// Arguments are written as bare element tags, which is all a field
    /// layout ever needs to see of them.
    #[must_use]
    pub fn generic_instance(
        self,
        is_value_type: bool,
        definition: TypeHandle,
        args: &[ElementType],
    ) -> Self {
        let head = self.element(ElementType::GENERICINST);
        let head = if is_value_type {
            head.value_type(definition)
        } else {
            head.class(definition)
        };
        let count = u32::try_from(args.len()).unwrap_or(u32::MAX);
        args.iter()
            .fold(head.compressed(count), |sig, arg| sig.element(*arg))
    }

    #[must_use]
    pub fn type_handle(self, handle: TypeHandle) -> Self {
        self.compressed(handle.to_coded())
    }

    #[must_use]
    pub fn compressed(mut self, value: u32) -> Self {
        if self.error.is_none() {
            if let Err(err) = write_compressed_u32(&mut self.bytes, value) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Raw bytes, for deliberately malformed blobs.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn finish(self) -> Result<Vec<u8>, BlobError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.bytes),
        }
    }
}
