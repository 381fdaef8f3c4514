use pretty_assertions::assert_eq;

use super::*;
use crate::blob::SignatureBuilder;
use crate::element_type::ElementType;
use crate::handles::TypeHandle;

fn i4() -> Vec<u8> {
    SignatureBuilder::field()
        .element(ElementType::I4)
        .finish()
        .unwrap()
}

#[test]
fn rows_follow_declaration_order() {
    let mut builder = ModuleBuilder::new(ModuleId::new(7), 8);
    let a = builder.add_type("N", "A");
    let b = builder.add_type("N", "B");
    let fa = builder.add_field(a, "x", FieldAttributes::STATIC, i4());
    let fb = builder.add_field(b, "y", FieldAttributes::empty(), i4());
    let fa2 = builder.add_field(a, "z", FieldAttributes::STATIC, i4());
    let module = builder.finish();

    assert_eq!(
        module.type_definitions().collect::<Vec<_>>(),
        vec![a, b]
    );
    assert_eq!(module.fields(a).collect::<Vec<_>>(), vec![fa, fa2]);
    assert_eq!(module.fields(b).collect::<Vec<_>>(), vec![fb]);
    assert_eq!(module.type_definition_count(), 2);
    assert_eq!(module.field_count(), 3);
    assert_eq!(module.type_name(b), Some(("N", "B")));
    assert_eq!(module.field_name(fa2), Some("z"));
}

#[test]
fn reports_flags_and_signatures() {
    let mut builder = ModuleBuilder::new(ModuleId::new(1), 4);
    let ty = builder.add_type("N", "T");
    let field = builder.add_field(
        ty,
        "k",
        FieldAttributes::STATIC | FieldAttributes::LITERAL,
        i4(),
    );
    let module = builder.finish();

    assert_eq!(module.pointer_size(), 4);
    assert!(module.field_attributes(field).contains(FieldAttributes::LITERAL));
    assert!(!module.field_attributes(field).has_static_storage());
    assert_eq!(module.field_signature(field), &[0x06, 0x08]);
}

#[test]
fn generic_parameter_count_is_recorded() {
    let mut builder = ModuleBuilder::new(ModuleId::new(1), 8);
    let plain = builder.add_type("N", "Plain");
    let generic = builder.add_generic_type("N", "Box`1", 1);
    let module = builder.finish();

    assert_eq!(module.generic_parameter_count(plain), 0);
    assert_eq!(module.generic_parameter_count(generic), 1);
}

#[test]
fn attributes_match_namespace_and_name() {
    let mut builder = ModuleBuilder::new(ModuleId::new(1), 8);
    let ty = builder.add_type("N", "T");
    let field = builder.add_field(ty, "f", FieldAttributes::STATIC, i4());
    builder.add_field_attribute(field, "System", "ThreadStaticAttribute");
    builder.add_type_attribute(ty, "System.Runtime.CompilerServices", "IsByRefLikeAttribute");
    let module = builder.finish();

    assert!(module.field_has_attribute(field, "System", "ThreadStaticAttribute"));
    assert!(!module.field_has_attribute(field, "Other", "ThreadStaticAttribute"));
    assert!(module.type_has_attribute(
        ty,
        "System.Runtime.CompilerServices",
        "IsByRefLikeAttribute"
    ));
    assert!(!module.type_has_attribute(ty, "System", "IsByRefLikeAttribute"));
}

#[test]
fn only_existing_typedefs_resolve() {
    let mut builder = ModuleBuilder::new(ModuleId::new(1), 8);
    let ty = builder.add_type("N", "T");
    let module = builder.finish();

    assert_eq!(module.resolve_type_def(TypeHandle::TypeDef(ty)), Some(ty));
    assert_eq!(
        module.resolve_type_def(TypeHandle::TypeDef(TypeDefId::new(2))),
        None
    );
    assert_eq!(module.resolve_type_def(TypeHandle::TypeRef(1)), None);
}

#[test]
fn nil_and_unknown_rows_are_empty() {
    let mut builder = ModuleBuilder::new(ModuleId::new(1), 8);
    let orphan = builder.add_field(TypeDefId::new(3), "lost", FieldAttributes::STATIC, i4());
    let module = builder.finish();

    assert!(orphan.is_nil());
    assert_eq!(module.field_count(), 0);
    assert_eq!(module.fields(TypeDefId::NIL).count(), 0);
    assert!(module.field_signature(FieldDefId::new(9)).is_empty());
    assert_eq!(module.type_name(TypeDefId::NIL), None);
}

#[test]
fn field_identity_is_module_qualified() {
    let mut builder = ModuleBuilder::new(ModuleId::new(5), 8);
    let ty = builder.add_type("N", "T");
    let field = builder.add_field(ty, "f", FieldAttributes::STATIC, i4());
    let module = builder.finish();

    assert_eq!(module.module_id(), ModuleId::new(5));
    assert_eq!(
        module.resolve_field(field),
        FieldRef::new(ModuleId::new(5), field)
    );
}
