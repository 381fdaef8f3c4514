//! Shared fixtures for unit tests. Only compiled in test builds.

use ilc_meta::{
    ElementType, FieldAttributes, FieldDefId, ModuleBuilder, ModuleId, SignatureBuilder,
    TypeDefId, TypeHandle,
};

use crate::probes::{IS_BY_REF_LIKE_ATTRIBUTE, THREAD_STATIC_ATTRIBUTE};

/// Field signature holding a single element tag.
pub(crate) fn sig(element: ElementType) -> Vec<u8> {
    SignatureBuilder::field().element(element).finish().unwrap()
}

/// Field signature of a value type.
pub(crate) fn value_sig(handle: TypeHandle) -> Vec<u8> {
    SignatureBuilder::field().value_type(handle).finish().unwrap()
}

/// Fresh 64-bit module builder.
pub(crate) fn module(id: u32) -> ModuleBuilder {
    ModuleBuilder::new(ModuleId::new(id), 8)
}

/// Declare a plain static field.
pub(crate) fn add_static(
    builder: &mut ModuleBuilder,
    owner: TypeDefId,
    name: &str,
    signature: Vec<u8>,
) -> FieldDefId {
    builder.add_field(owner, name, FieldAttributes::STATIC, signature)
}

/// Declare a `[ThreadStatic]` static field.
pub(crate) fn add_thread_static(
    builder: &mut ModuleBuilder,
    owner: TypeDefId,
    name: &str,
    signature: Vec<u8>,
) -> FieldDefId {
    let field = add_static(builder, owner, name, signature);
    builder.add_field_attribute(
        field,
        THREAD_STATIC_ATTRIBUTE.namespace,
        THREAD_STATIC_ATTRIBUTE.name,
    );
    field
}

/// Declare a stack-only value type.
pub(crate) fn add_by_ref_like(builder: &mut ModuleBuilder, name: &str) -> TypeDefId {
    let ty = builder.add_type("App", name);
    builder.add_type_attribute(
        ty,
        IS_BY_REF_LIKE_ATTRIBUTE.namespace,
        IS_BY_REF_LIKE_ATTRIBUTE.name,
    );
    ty
}
