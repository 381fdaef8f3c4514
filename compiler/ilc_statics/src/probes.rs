//! Marker-attribute probes.
//!
//! Two yes/no questions asked per static field. Both only test for the
//! presence of a well-known attribute; attribute arguments are ignored.

use ilc_meta::{CustomAttributeReader, FieldDefId, MetadataReader, TypeHandle};

/// Namespace-qualified name of an attribute type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeName {
    pub namespace: &'static str,
    pub name: &'static str,
}

/// Marks a static field as having one slot per thread.
pub const THREAD_STATIC_ATTRIBUTE: AttributeName = AttributeName {
    namespace: "System",
    name: "ThreadStaticAttribute",
};

/// Marks a value type as stack-only.
pub const IS_BY_REF_LIKE_ATTRIBUTE: AttributeName = AttributeName {
    namespace: "System.Runtime.CompilerServices",
    name: "IsByRefLikeAttribute",
};

/// Does the field live in the thread-local block pair?
pub fn is_thread_static<M>(module: &M, field: FieldDefId) -> bool
where
    M: CustomAttributeReader,
{
    module.field_has_attribute(
        field,
        THREAD_STATIC_ATTRIBUTE.namespace,
        THREAD_STATIC_ATTRIBUTE.name,
    )
}

/// Is the value type behind `handle` stack-only?
///
/// Handles that do not resolve to a type defined in `module` answer
/// `false`: a type from another module is ordinary as far as this module's
/// layout can tell.
pub fn is_by_ref_like<M>(module: &M, handle: TypeHandle) -> bool
where
    M: MetadataReader + CustomAttributeReader,
{
    module.resolve_type_def(handle).is_some_and(|ty| {
        module.type_has_attribute(
            ty,
            IS_BY_REF_LIKE_ATTRIBUTE.namespace,
            IS_BY_REF_LIKE_ATTRIBUTE.name,
        )
    })
}
