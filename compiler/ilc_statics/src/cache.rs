//! Per-module memoization of static layouts.
//!
//! Compilation workers ask for layouts concurrently. Lookups of published
//! layouts only take a shard read lock of the underlying `DashMap` and never
//! wait on a layout being computed: a miss computes outside the map and
//! then publishes with a single entry insert. If two workers race on the
//! same module both compute, the first insert wins, and the loser returns
//! the winner's `Arc`. Both computations are equal by content, so every
//! caller sees the same layout.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use ilc_meta::{ModuleId, ModuleMetadata, TypeDefId};

use crate::error::StaticLayoutError;
use crate::layout::{compute_module_layout, ComputedStaticFieldLayout, ModuleLayout};
use crate::target::LayoutOptions;

/// Concurrent map from module identity to its published layout.
pub struct ModuleLayoutCache<F> {
    layouts: DashMap<ModuleId, Arc<ModuleLayout<F>>, FxBuildHasher>,
    options: LayoutOptions,
}

impl<F> ModuleLayoutCache<F>
where
    F: Clone + Eq + Hash + fmt::Debug + Send + Sync,
{
    pub fn new() -> Self {
        Self::with_options(LayoutOptions::default())
    }

    pub fn with_options(options: LayoutOptions) -> Self {
        ModuleLayoutCache {
            layouts: DashMap::with_hasher(FxBuildHasher),
            options,
        }
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// Published layout of `module`, without computing it.
    pub fn get(&self, module: ModuleId) -> Option<Arc<ModuleLayout<F>>> {
        self.layouts
            .get(&module)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, module: ModuleId) -> bool {
        self.layouts.contains_key(&module)
    }

    /// Number of published layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Layout of `module`, computing and publishing it on first request.
    ///
    /// Errors are returned to the caller and nothing is published.
    pub fn get_or_create<M>(&self, module: &M) -> Result<Arc<ModuleLayout<F>>, StaticLayoutError>
    where
        M: ModuleMetadata<Field = F>,
    {
        let id = module.module_id();

        // Fast path: already published
        if let Some(layout) = self.get(id) {
            trace!(module = id.raw(), "static layout cache hit");
            return Ok(layout);
        }

        // Slow path: compute outside the map, then publish once
        debug!(module = id.raw(), "static layout cache miss");
        let computed = Arc::new(compute_module_layout(module, self.options)?);

        match self.layouts.entry(id) {
            Entry::Occupied(entry) => {
                trace!(module = id.raw(), "lost publication race, keeping published layout");
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                let published = entry.insert(computed);
                Ok(Arc::clone(published.value()))
            }
        }
    }

    /// Static layout of one type of `module`.
    ///
    /// Types with generic parameters never get module-level statics; they
    /// get an empty layout without consulting the cache.
    pub fn compute_static_field_layout<M>(
        &self,
        module: &M,
        ty: TypeDefId,
    ) -> Result<ComputedStaticFieldLayout<F>, StaticLayoutError>
    where
        M: ModuleMetadata<Field = F>,
    {
        if module.generic_parameter_count(ty) > 0 {
            return Ok(ComputedStaticFieldLayout::default());
        }
        let layout = self.get_or_create(module)?;
        Ok(ComputedStaticFieldLayout::for_type(&layout, ty))
    }

    /// Compute and publish layouts for many modules in parallel.
    ///
    /// Stops at an arbitrary failing module and returns its error; layouts
    /// of modules that succeeded stay published.
    pub fn precompute<M>(&self, modules: &[M]) -> Result<(), StaticLayoutError>
    where
        M: ModuleMetadata<Field = F> + Sync,
    {
        modules
            .par_iter()
            .try_for_each(|module| self.get_or_create(module).map(drop))
    }
}

impl<F> Default for ModuleLayoutCache<F>
where
    F: Clone + Eq + Hash + fmt::Debug + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for ModuleLayoutCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLayoutCache")
            .field("modules", &self.layouts.len())
            .field("options", &self.options)
            .finish()
    }
}
