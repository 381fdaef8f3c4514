//! Target parameters and runtime-fixed reservations.

use crate::error::StaticLayoutError;

/// Pointer-widths reserved at the start of the process-wide non-GC block.
pub const NON_GC_STATICS_HEADER_POINTERS: u32 = 6;

/// Pointer-widths reserved at the start of the thread-local non-GC block.
pub const THREAD_NON_GC_STATICS_HEADER_POINTERS: u32 = 3;

/// Caller-facing layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Size and alignment of the largest primitive the runtime stores.
    ///
    /// Every block is aligned to this, and cross-module value types get a
    /// slot of exactly this size.
    pub maximum_primitive_size: u32,
}

impl LayoutOptions {
    pub const DEFAULT_MAXIMUM_PRIMITIVE_SIZE: u32 = 8;
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            maximum_primitive_size: Self::DEFAULT_MAXIMUM_PRIMITIVE_SIZE,
        }
    }
}

/// Validated per-module target parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDetails {
    pointer_size: u32,
    maximum_primitive_size: u32,
}

impl TargetDetails {
    /// Combine a module's pointer width with the layout options.
    ///
    /// Pointers must be 4 or 8 bytes and the maximum primitive size a
    /// power of two no smaller than a pointer.
    pub fn new(pointer_size: u32, options: LayoutOptions) -> Result<Self, StaticLayoutError> {
        let maximum_primitive_size = options.maximum_primitive_size;
        let valid = matches!(pointer_size, 4 | 8)
            && maximum_primitive_size.is_power_of_two()
            && maximum_primitive_size >= pointer_size;
        if !valid {
            return Err(StaticLayoutError::UnsupportedTarget {
                pointer_size,
                maximum_primitive_size,
            });
        }
        Ok(TargetDetails {
            pointer_size,
            maximum_primitive_size,
        })
    }

    #[inline]
    pub fn pointer_size(&self) -> u32 {
        self.pointer_size
    }

    #[inline]
    pub fn maximum_primitive_size(&self) -> u32 {
        self.maximum_primitive_size
    }

    /// Initial size of the process-wide non-GC block.
    ///
    /// The runtime keeps its own header there, followed by one
    /// class-initialization byte per type definition in the module.
    pub fn non_gc_statics_start(&self, type_count: u32) -> u32 {
        NON_GC_STATICS_HEADER_POINTERS * self.pointer_size + type_count
    }

    /// Initial size of the thread-local non-GC block.
    pub fn thread_non_gc_statics_start(&self, type_count: u32) -> u32 {
        THREAD_NON_GC_STATICS_HEADER_POINTERS * self.pointer_size + type_count
    }
}

#[cfg(test)]
mod tests;
