//! Module static layout: data model.
//!
//! A module's statics live in four blocks, one per combination of
//! GC-tracked / raw and process-wide / thread-local. [`ModuleLayout`] holds
//! the final size of each block and, per type definition, where each of
//! its static fields landed. Layouts are immutable once built.
//!
//! The algorithm that fills these in lives in [`builder`]; the per-field
//! size/alignment policy lives in [`classify`].

mod builder;
mod classify;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use ilc_meta::{ModuleId, TypeDefId};

#[cfg(feature = "cache")]
use serde::{Deserialize, Serialize};

pub use builder::compute_module_layout;
pub use classify::{classify_static_field, StaticSlot, StaticSlotKind};

/// One of the four static storage blocks of a module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub enum StaticsBlockKind {
    /// Process-wide, scanned by the GC.
    GcStatics,
    /// Process-wide raw bytes.
    NonGcStatics,
    /// Per-thread, scanned by the GC.
    ThreadGcStatics,
    /// Per-thread raw bytes.
    ThreadNonGcStatics,
}

impl StaticsBlockKind {
    pub const ALL: [StaticsBlockKind; 4] = [
        Self::GcStatics,
        Self::NonGcStatics,
        Self::ThreadGcStatics,
        Self::ThreadNonGcStatics,
    ];

    /// Block for a field with the given GC-ness and thread-locality.
    pub const fn select(is_gc: bool, is_thread_static: bool) -> Self {
        match (is_thread_static, is_gc) {
            (false, true) => Self::GcStatics,
            (false, false) => Self::NonGcStatics,
            (true, true) => Self::ThreadGcStatics,
            (true, false) => Self::ThreadNonGcStatics,
        }
    }

    pub const fn is_gc(self) -> bool {
        matches!(self, Self::GcStatics | Self::ThreadGcStatics)
    }

    pub const fn is_thread_local(self) -> bool {
        matches!(self, Self::ThreadGcStatics | Self::ThreadNonGcStatics)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::GcStatics => 0,
            Self::NonGcStatics => 1,
            Self::ThreadGcStatics => 2,
            Self::ThreadNonGcStatics => 3,
        }
    }
}

/// Final size and alignment requirement of one block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct StorageBlock {
    /// Bytes used, including any runtime header reservation.
    pub size: u32,
    /// Required alignment of the block's base address.
    pub alignment: u32,
}

/// Where one static field lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct FieldOffset<F> {
    /// The host compiler's identity for the field.
    pub field: F,
    pub block: StaticsBlockKind,
    /// Byte offset from the start of `block`.
    pub offset: u32,
}

/// Offsets of one type's statics, in field declaration order.
pub type TypeOffsets<F> = SmallVec<[FieldOffset<F>; 4]>;

/// Static layout of a whole module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(Serialize, Deserialize))]
pub struct ModuleLayout<F> {
    module: ModuleId,
    blocks: [StorageBlock; 4],
    type_offsets: FxHashMap<TypeDefId, TypeOffsets<F>>,
}

impl<F> ModuleLayout<F> {
    pub(crate) fn new(
        module: ModuleId,
        blocks: [StorageBlock; 4],
        type_offsets: FxHashMap<TypeDefId, TypeOffsets<F>>,
    ) -> Self {
        ModuleLayout {
            module,
            blocks,
            type_offsets,
        }
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn block(&self, kind: StaticsBlockKind) -> StorageBlock {
        self.blocks[kind.index()]
    }

    pub fn gc_statics(&self) -> StorageBlock {
        self.block(StaticsBlockKind::GcStatics)
    }

    pub fn non_gc_statics(&self) -> StorageBlock {
        self.block(StaticsBlockKind::NonGcStatics)
    }

    pub fn thread_gc_statics(&self) -> StorageBlock {
        self.block(StaticsBlockKind::ThreadGcStatics)
    }

    pub fn thread_non_gc_statics(&self) -> StorageBlock {
        self.block(StaticsBlockKind::ThreadNonGcStatics)
    }

    /// Offsets of `ty`'s statics; empty if it has none.
    pub fn offsets_for(&self, ty: TypeDefId) -> &[FieldOffset<F>] {
        self.type_offsets
            .get(&ty)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Does `ty` own at least one static slot?
    pub fn has_statics(&self, ty: TypeDefId) -> bool {
        self.type_offsets.contains_key(&ty)
    }

    /// Types with statics, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = TypeDefId> + '_ {
        self.type_offsets.keys().copied()
    }

    /// Total number of placed fields.
    pub fn field_count(&self) -> usize {
        self.type_offsets.values().map(SmallVec::len).sum()
    }

    /// Every placed field, grouped by type in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeDefId, &FieldOffset<F>)> + '_ {
        self.type_offsets
            .iter()
            .flat_map(|(ty, offsets)| offsets.iter().map(move |offset| (*ty, offset)))
    }
}

impl<F: PartialEq> ModuleLayout<F> {
    /// Find a field's placement by identity.
    pub fn offset_of(&self, field: &F) -> Option<&FieldOffset<F>> {
        self.type_offsets
            .values()
            .flat_map(|offsets| offsets.iter())
            .find(|offset| offset.field == *field)
    }
}

/// Static layout as seen from a single type.
///
/// Carries the module-wide blocks the type's offsets point into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputedStaticFieldLayout<F> {
    pub gc_statics: StorageBlock,
    pub non_gc_statics: StorageBlock,
    pub thread_gc_statics: StorageBlock,
    pub thread_non_gc_statics: StorageBlock,
    pub offsets: Vec<FieldOffset<F>>,
}

impl<F> Default for ComputedStaticFieldLayout<F> {
    /// Four empty blocks and no offsets: the layout of a type that never
    /// takes part in module static layout.
    fn default() -> Self {
        ComputedStaticFieldLayout {
            gc_statics: StorageBlock::default(),
            non_gc_statics: StorageBlock::default(),
            thread_gc_statics: StorageBlock::default(),
            thread_non_gc_statics: StorageBlock::default(),
            offsets: Vec::new(),
        }
    }
}

impl<F: Clone> ComputedStaticFieldLayout<F> {
    /// Project a module layout onto one of its types.
    pub fn for_type(layout: &ModuleLayout<F>, ty: TypeDefId) -> Self {
        ComputedStaticFieldLayout {
            gc_statics: layout.gc_statics(),
            non_gc_statics: layout.non_gc_statics(),
            thread_gc_statics: layout.thread_gc_statics(),
            thread_non_gc_statics: layout.thread_non_gc_statics(),
            offsets: layout.offsets_for(ty).to_vec(),
        }
    }
}
