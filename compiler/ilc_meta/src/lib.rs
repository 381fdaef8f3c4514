//! Module metadata model for the IL compiler.
//!
//! This crate is the boundary between the compiler's static-layout core
//! and whatever actually reads compiled modules:
//!
//! - **Handles** ([`ModuleId`], [`TypeDefId`], [`FieldDefId`], [`TypeHandle`],
//!   [`FieldRef`]): `Copy` row identifiers, hashable and comparable.
//! - **Signature primitives** ([`ElementType`], [`SignatureHeader`],
//!   [`BlobReader`], [`SignatureBuilder`]): the ECMA-335 blob encoding
//!   used by field signatures.
//! - **Reader traits** ([`MetadataReader`], [`CustomAttributeReader`],
//!   [`FieldResolver`], [`ModuleMetadata`]): the only questions the layout
//!   core asks of a module.
//! - **In-memory provider** ([`InMemoryModule`], [`ModuleBuilder`]): a
//!   complete implementation of the traits for synthesized metadata.

mod blob;
mod element_type;
mod flags;
mod handles;
mod in_memory;
mod reader;

pub use blob::{write_compressed_u32, BlobError, BlobReader, SignatureBuilder, MAX_COMPRESSED_U32};
pub use element_type::{ElementType, SignatureHeader};
pub use flags::FieldAttributes;
pub use handles::{FieldDefId, FieldRef, ModuleId, TypeDefId, TypeHandle};
pub use in_memory::{InMemoryModule, ModuleBuilder};
pub use reader::{CustomAttributeReader, FieldResolver, MetadataReader, ModuleMetadata};
