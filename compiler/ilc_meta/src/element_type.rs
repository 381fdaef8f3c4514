//! Element type tags and signature headers (ECMA-335 II.23.1.16, II.23.2).
//!
//! Tags are kept as a raw `u8` newtype rather than an exhaustive enum:
//! signatures from untrusted or newer producers may carry tags this crate
//! has no name for, and those must survive decoding so the layout policy
//! can decide what to do with them.

use std::fmt;

#[cfg(feature = "cache")]
use serde::{Deserialize, Serialize};

/// A single element-type byte from a signature blob.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct ElementType(u8);

impl ElementType {
    pub const END: ElementType = ElementType(0x00);
    pub const VOID: ElementType = ElementType(0x01);
    pub const BOOLEAN: ElementType = ElementType(0x02);
    pub const CHAR: ElementType = ElementType(0x03);
    pub const I1: ElementType = ElementType(0x04);
    pub const U1: ElementType = ElementType(0x05);
    pub const I2: ElementType = ElementType(0x06);
    pub const U2: ElementType = ElementType(0x07);
    pub const I4: ElementType = ElementType(0x08);
    pub const U4: ElementType = ElementType(0x09);
    pub const I8: ElementType = ElementType(0x0A);
    pub const U8: ElementType = ElementType(0x0B);
    pub const R4: ElementType = ElementType(0x0C);
    pub const R8: ElementType = ElementType(0x0D);
    pub const STRING: ElementType = ElementType(0x0E);
    pub const PTR: ElementType = ElementType(0x0F);
    pub const BYREF: ElementType = ElementType(0x10);
    pub const VALUETYPE: ElementType = ElementType(0x11);
    pub const CLASS: ElementType = ElementType(0x12);
    pub const VAR: ElementType = ElementType(0x13);
    pub const ARRAY: ElementType = ElementType(0x14);
    pub const GENERICINST: ElementType = ElementType(0x15);
    pub const TYPEDBYREF: ElementType = ElementType(0x16);
    pub const I: ElementType = ElementType(0x18);
    pub const U: ElementType = ElementType(0x19);
    pub const FNPTR: ElementType = ElementType(0x1B);
    pub const OBJECT: ElementType = ElementType(0x1C);
    pub const SZARRAY: ElementType = ElementType(0x1D);
    pub const MVAR: ElementType = ElementType(0x1E);
    pub const CMOD_REQD: ElementType = ElementType(0x1F);
    pub const CMOD_OPT: ElementType = ElementType(0x20);
    pub const INTERNAL: ElementType = ElementType(0x21);
    pub const SENTINEL: ElementType = ElementType(0x41);
    pub const PINNED: ElementType = ElementType(0x45);

    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        ElementType(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// `CMOD_REQD` or `CMOD_OPT`: followed by a type handle to skip.
    #[inline]
    pub const fn is_custom_modifier(self) -> bool {
        self.0 == Self::CMOD_REQD.0 || self.0 == Self::CMOD_OPT.0
    }

    /// Mnemonic for known tags, `None` otherwise.
    pub const fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x00 => "end",
            0x01 => "void",
            0x02 => "bool",
            0x03 => "char",
            0x04 => "i1",
            0x05 => "u1",
            0x06 => "i2",
            0x07 => "u2",
            0x08 => "i4",
            0x09 => "u4",
            0x0A => "i8",
            0x0B => "u8",
            0x0C => "r4",
            0x0D => "r8",
            0x0E => "string",
            0x0F => "ptr",
            0x10 => "byref",
            0x11 => "valuetype",
            0x12 => "class",
            0x13 => "var",
            0x14 => "array",
            0x15 => "genericinst",
            0x16 => "typedbyref",
            0x18 => "i",
            0x19 => "u",
            0x1B => "fnptr",
            0x1C => "object",
            0x1D => "szarray",
            0x1E => "mvar",
            0x1F => "cmod_reqd",
            0x20 => "cmod_opt",
            0x21 => "internal",
            0x41 => "sentinel",
            0x45 => "pinned",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "ElementType::{name}"),
            None => write!(f, "ElementType(0x{:02X})", self.0),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

/// Calling-convention byte that opens every signature blob.
///
/// The low nibble is the signature kind; the high bits carry flags that do
/// not matter for field signatures.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct SignatureHeader(u8);

impl SignatureHeader {
    const KIND_MASK: u8 = 0x0F;

    /// Kind nibble of a field signature.
    pub const FIELD_KIND: u8 = 0x06;

    /// Header of a plain field signature.
    pub const FIELD: SignatureHeader = SignatureHeader(Self::FIELD_KIND);

    #[inline]
    pub const fn from_raw(raw: u8) -> Self {
        SignatureHeader(raw)
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn kind(self) -> u8 {
        self.0 & Self::KIND_MASK
    }

    #[inline]
    pub const fn is_field(self) -> bool {
        self.kind() == Self::FIELD_KIND
    }
}

impl fmt::Debug for SignatureHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureHeader(0x{:02X})", self.0)
    }
}
