//! Query traits a metadata provider implements.
//!
//! The static layout core never reads tables directly. It asks these
//! questions and nothing else:
//!
//! - [`MetadataReader`]: structure (types, fields, flags, signatures,
//!   pointer width) and local resolution of type handles.
//! - [`CustomAttributeReader`]: does a field or type carry a given
//!   namespace-qualified attribute.
//! - [`FieldResolver`]: turn a field row into the caller's opaque field
//!   identity.
//!
//! [`ModuleMetadata`] bundles the three with a module identity.

use std::fmt::Debug;
use std::hash::Hash;

use crate::flags::FieldAttributes;
use crate::handles::{FieldDefId, ModuleId, TypeDefId, TypeHandle};

/// Structural metadata of one module.
pub trait MetadataReader {
    /// Machine word size of the compilation target, in bytes.
    fn pointer_size(&self) -> u32;

    /// Number of rows in the `TypeDef` table.
    fn type_definition_count(&self) -> u32;

    /// Type definitions in declaration order.
    fn type_definitions(&self) -> impl Iterator<Item = TypeDefId> + '_ {
        (1..=self.type_definition_count()).map(TypeDefId::new)
    }

    /// Number of generic parameters the type declares.
    fn generic_parameter_count(&self, ty: TypeDefId) -> u32;

    /// Fields declared directly on `ty`, in declaration order.
    fn fields(&self, ty: TypeDefId) -> impl Iterator<Item = FieldDefId> + '_;

    fn field_attributes(&self, field: FieldDefId) -> FieldAttributes;

    /// Raw field signature blob.
    fn field_signature(&self, field: FieldDefId) -> &[u8];

    /// Resolve a handle to a type defined in this module.
    ///
    /// `TypeRef`/`TypeSpec` handles and out-of-range rows are not local.
    fn resolve_type_def(&self, handle: TypeHandle) -> Option<TypeDefId> {
        handle
            .as_type_def()
            .filter(|def| def.row() <= self.type_definition_count())
    }
}

/// Presence checks for custom attributes.
///
/// Attribute arguments are never decoded; only the attribute type's
/// namespace and name are compared.
pub trait CustomAttributeReader {
    fn field_has_attribute(&self, field: FieldDefId, namespace: &str, name: &str) -> bool;

    fn type_has_attribute(&self, ty: TypeDefId, namespace: &str, name: &str) -> bool;
}

/// Maps field rows to the host compiler's field identity.
pub trait FieldResolver {
    /// Opaque identity. The layout core only stores, clones, compares and
    /// hashes it.
    type Field: Clone + Eq + Hash + Debug + Send + Sync;

    fn resolve_field(&self, field: FieldDefId) -> Self::Field;
}

/// Everything static layout needs from one module.
pub trait ModuleMetadata: MetadataReader + CustomAttributeReader + FieldResolver {
    /// Identity used as the cache key.
    fn module_id(&self) -> ModuleId;
}
