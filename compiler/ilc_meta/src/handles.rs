//! Opaque metadata handles.
//!
//! Row identifiers follow ECMA-335 conventions: rows are 1-based, and row 0
//! is the nil handle. All handles are `Copy` value keys; nothing here owns
//! or borrows metadata.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "cache")]
use serde::{Deserialize, Serialize};

/// Identity of one compiled metadata unit.
///
/// Two modules with the same id are the same module for caching purposes,
/// regardless of the contents a provider reports for them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ModuleId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

/// Row in a module's `TypeDef` table (1-based).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct TypeDefId(u32);

impl TypeDefId {
    /// The nil row.
    pub const NIL: TypeDefId = TypeDefId(0);

    #[inline]
    pub const fn new(row: u32) -> Self {
        TypeDefId(row)
    }

    #[inline]
    pub const fn row(self) -> u32 {
        self.0
    }

    /// Zero-based position in declaration order.
    ///
    /// Only meaningful for non-nil rows.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl Hash for TypeDefId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for TypeDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "TypeDefId::NIL")
        } else {
            write!(f, "TypeDefId({})", self.0)
        }
    }
}

/// Row in a module's `Field` table (1-based).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct FieldDefId(u32);

impl FieldDefId {
    /// The nil row.
    pub const NIL: FieldDefId = FieldDefId(0);

    #[inline]
    pub const fn new(row: u32) -> Self {
        FieldDefId(row)
    }

    #[inline]
    pub const fn row(self) -> u32 {
        self.0
    }

    /// Zero-based position in the field table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl Hash for FieldDefId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for FieldDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "FieldDefId::NIL")
        } else {
            write!(f, "FieldDefId({})", self.0)
        }
    }
}

/// A `TypeDefOrRefOrSpec` reference as it appears inside a signature blob.
///
/// Only `TypeDef` handles can be resolved within the module that encoded
/// them; `TypeRef` and `TypeSpec` point elsewhere (another module, or a
/// constructed type) and are never resolved by this crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub enum TypeHandle {
    /// A type defined in this module.
    TypeDef(TypeDefId),
    /// A reference to a type defined in another module (row in `TypeRef`).
    TypeRef(u32),
    /// A constructed type (row in `TypeSpec`).
    TypeSpec(u32),
}

impl TypeHandle {
    /// Number of low bits used for the table tag in the coded index.
    const TAG_BITS: u32 = 2;
    const TAG_MASK: u32 = (1 << Self::TAG_BITS) - 1;

    /// Largest row number a coded index can carry in a compressed integer.
    pub const MAX_ROW: u32 = 0x1FFF_FFFF >> Self::TAG_BITS;

    /// Decode a `TypeDefOrRefOrSpecEncoded` value (ECMA-335 II.23.2.8).
    ///
    /// Returns `None` for the reserved tag `3`.
    pub const fn from_coded(coded: u32) -> Option<Self> {
        let row = coded >> Self::TAG_BITS;
        match coded & Self::TAG_MASK {
            0 => Some(TypeHandle::TypeDef(TypeDefId::new(row))),
            1 => Some(TypeHandle::TypeRef(row)),
            2 => Some(TypeHandle::TypeSpec(row)),
            _ => None,
        }
    }

    /// Encode as a `TypeDefOrRefOrSpecEncoded` value.
    pub const fn to_coded(self) -> u32 {
        match self {
            TypeHandle::TypeDef(def) => def.row() << Self::TAG_BITS,
            TypeHandle::TypeRef(row) => (row << Self::TAG_BITS) | 1,
            TypeHandle::TypeSpec(row) => (row << Self::TAG_BITS) | 2,
        }
    }

    /// The local definition this handle names, if it names one.
    ///
    /// This does not check that the row exists; see
    /// [`MetadataReader::resolve_type_def`](crate::MetadataReader::resolve_type_def).
    #[inline]
    pub const fn as_type_def(self) -> Option<TypeDefId> {
        match self {
            TypeHandle::TypeDef(def) if !def.is_nil() => Some(def),
            _ => None,
        }
    }
}

/// Canonical field identity: a field row qualified by its module.
///
/// This is the identity [`InMemoryModule`](crate::InMemoryModule) hands out;
/// other providers may use their own type through
/// [`FieldResolver`](crate::FieldResolver).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct FieldRef {
    pub module: ModuleId,
    pub def: FieldDefId,
}

impl FieldRef {
    #[inline]
    pub const fn new(module: ModuleId, def: FieldDefId) -> Self {
        FieldRef { module, def }
    }
}

impl fmt::Debug for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldRef({}:{})", self.module.raw(), self.def.row())
    }
}

#[cfg(test)]
mod tests;
