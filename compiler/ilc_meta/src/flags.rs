//! Field definition attribute flags (ECMA-335 II.23.1.5).

use bitflags::bitflags;

bitflags! {
    /// `FieldAttributes` column of a `Field` row.
    ///
    /// Only the bits static layout cares about are named; the access mask
    /// and the remaining reserved bits pass through untouched.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FieldAttributes: u16 {
        /// Low three bits: member access.
        const FIELD_ACCESS_MASK = 0x0007;
        const PUBLIC = 0x0006;

        /// Defined on the type rather than per instance.
        const STATIC = 0x0010;
        /// Assignable only during type or instance initialization.
        const INIT_ONLY = 0x0020;
        /// Compile-time constant; the value lives in the `Constant` table
        /// and the field has no storage.
        const LITERAL = 0x0040;
        const NOT_SERIALIZED = 0x0080;
        /// Initial data is mapped from the image (`FieldRVA`).
        const HAS_FIELD_RVA = 0x0100;
        const SPECIAL_NAME = 0x0200;
        const RT_SPECIAL_NAME = 0x0400;
        const HAS_FIELD_MARSHAL = 0x1000;
        const PINVOKE_IMPL = 0x2000;
        const HAS_DEFAULT = 0x8000;

        const _ = !0;
    }
}

impl FieldAttributes {
    /// Static and not a literal: the field needs static storage.
    #[inline]
    pub fn has_static_storage(self) -> bool {
        self.contains(Self::STATIC) && !self.contains(Self::LITERAL)
    }
}
