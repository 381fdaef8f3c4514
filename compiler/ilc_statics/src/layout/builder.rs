//! Module static layout algorithm.
//!
//! Walks type definitions in declaration order and, for every eligible
//! static field, appends an aligned slot to one of four running blocks.
//! The result depends only on the module's metadata, so two runs over the
//! same module always agree byte for byte.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use ilc_meta::{FieldDefId, ModuleMetadata, TypeDefId};

use crate::error::StaticLayoutError;
use crate::probes;
use crate::signature::decode_field_signature;
use crate::target::{LayoutOptions, TargetDetails};

use super::classify::classify_static_field;
use super::{FieldOffset, ModuleLayout, StaticsBlockKind, StorageBlock, TypeOffsets};

/// Compute the static layout of every type in `module`.
///
/// Fails on the first field that makes the module invalid; no partial
/// layout is ever returned.
#[tracing::instrument(level = "debug", skip_all, fields(
    module = module.module_id().raw(),
    types = module.type_definition_count(),
))]
pub fn compute_module_layout<M>(
    module: &M,
    options: LayoutOptions,
) -> Result<ModuleLayout<M::Field>, StaticLayoutError>
where
    M: ModuleMetadata,
{
    let target = TargetDetails::new(module.pointer_size(), options)?;
    let mut builder = LayoutBuilder::new(module, target);

    for ty in module.type_definitions() {
        if let Err(err) = builder.add_type(ty) {
            debug!(%err, ?ty, "static layout failed");
            return Err(err);
        }
    }

    let layout = builder.finish();
    debug!(
        gc = layout.gc_statics().size,
        non_gc = layout.non_gc_statics().size,
        thread_gc = layout.thread_gc_statics().size,
        thread_non_gc = layout.thread_non_gc_statics().size,
        "static layout computed"
    );
    Ok(layout)
}

/// Running state of one layout computation.
struct LayoutBuilder<'m, M: ModuleMetadata> {
    module: &'m M,
    target: TargetDetails,
    /// Running size of each block, indexed by [`StaticsBlockKind::index`].
    sizes: [u32; 4],
    type_offsets: FxHashMap<TypeDefId, TypeOffsets<M::Field>>,
}

impl<'m, M: ModuleMetadata> LayoutBuilder<'m, M> {
    fn new(module: &'m M, target: TargetDetails) -> Self {
        let type_count = module.type_definition_count();
        let mut sizes = [0; 4];
        sizes[StaticsBlockKind::NonGcStatics.index()] = target.non_gc_statics_start(type_count);
        sizes[StaticsBlockKind::ThreadNonGcStatics.index()] =
            target.thread_non_gc_statics_start(type_count);

        LayoutBuilder {
            module,
            target,
            sizes,
            type_offsets: FxHashMap::default(),
        }
    }

    fn add_type(&mut self, ty: TypeDefId) -> Result<(), StaticLayoutError> {
        let module = self.module;

        // Statics of generic types are laid out per instantiation by the
        // runtime, never here.
        if module.generic_parameter_count(ty) > 0 {
            trace!(?ty, "skipping generic type");
            return Ok(());
        }

        let mut offsets = TypeOffsets::new();
        for field in module.fields(ty) {
            if !module.field_attributes(field).has_static_storage() {
                continue;
            }
            offsets.push(self.add_field(field)?);
        }

        if !offsets.is_empty() {
            self.type_offsets.insert(ty, offsets);
        }
        Ok(())
    }

    fn add_field(&mut self, field: FieldDefId) -> Result<FieldOffset<M::Field>, StaticLayoutError> {
        let module = self.module;

        let is_thread_static = probes::is_thread_static(module, field);
        let info = decode_field_signature(module.field_signature(field)).map_err(|err| {
            StaticLayoutError::InvalidSignature {
                field,
                kind: err.into(),
            }
        })?;
        let slot = classify_static_field(module, field, &info, self.target)?;

        let block = StaticsBlockKind::select(slot.is_gc(), is_thread_static);
        let running = &mut self.sizes[block.index()];
        let offset = running.next_multiple_of(slot.alignment);
        *running = offset + slot.size;

        trace!(
            ?field,
            ?block,
            offset,
            size = slot.size,
            kind = ?slot.kind,
            "placed static field"
        );

        Ok(FieldOffset {
            field: module.resolve_field(field),
            block,
            offset,
        })
    }

    fn finish(self) -> ModuleLayout<M::Field> {
        let alignment = self.target.maximum_primitive_size();
        let blocks = self.sizes.map(|size| StorageBlock { size, alignment });
        ModuleLayout::new(self.module.module_id(), blocks, self.type_offsets)
    }
}
