//! Module-level static field layout for the IL compiler.
//!
//! The runtime stores a module's statics in four blocks: GC-tracked and raw,
//! each either process-wide or per thread. This crate decides, for every
//! static field of a module, which block it belongs to and at what offset,
//! reproducing the runtime's own allocation rules exactly.
//!
//! - **Signature decoding** ([`signature`]): reads a field signature blob
//!   down to its leading element tag and, for value types, the value
//!   type's handle.
//! - **Attribute probes** ([`probes`]): thread-static and by-ref-like
//!   marker attributes.
//! - **Layout** ([`compute_module_layout`], [`ModuleLayout`]): walks a
//!   module's types in declaration order and packs eligible statics.
//! - **Cache** ([`ModuleLayoutCache`]): computes each module's layout
//!   (logically) once and shares it between compilation workers.
//!
//! # Runtime compatibility rules
//!
//! - Raw blocks start after a runtime header (6 pointers process-wide,
//!   3 per thread) plus one byte per type definition.
//! - Generic types are skipped entirely.
//! - Value types defined in the module are boxed (a GC pointer slot);
//!   anything whose size is unknown here gets a raw slot of the maximum
//!   primitive size.
//! - By-reference fields and stack-only value types are rejected.
//!
//! # Crate Dependencies
//!
//! Metadata access goes through the traits in `ilc_meta`; this crate never
//! reads tables itself.

mod cache;
mod error;
mod layout;
pub mod probes;
pub mod signature;
mod target;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use cache::ModuleLayoutCache;
pub use error::{InvalidSignatureKind, StaticLayoutError, UnsupportedReason};
pub use layout::{
    classify_static_field, compute_module_layout, ComputedStaticFieldLayout, FieldOffset,
    ModuleLayout, StaticSlot, StaticSlotKind, StaticsBlockKind, StorageBlock, TypeOffsets,
};
pub use signature::{
    decode_field_signature, ElementCategory, FieldSignatureInfo, SignatureError,
};
pub use target::{
    LayoutOptions, TargetDetails, NON_GC_STATICS_HEADER_POINTERS,
    THREAD_NON_GC_STATICS_HEADER_POINTERS,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=ilc_statics=debug` or `RUST_LOG=ilc_statics=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
