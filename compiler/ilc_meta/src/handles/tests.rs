use pretty_assertions::assert_eq;

use super::*;

#[test]
fn coded_index_decodes_each_table() {
    assert_eq!(
        TypeHandle::from_coded(0b1_00),
        Some(TypeHandle::TypeDef(TypeDefId::new(1)))
    );
    assert_eq!(TypeHandle::from_coded(0b101_01), Some(TypeHandle::TypeRef(5)));
    assert_eq!(TypeHandle::from_coded(0b11_10), Some(TypeHandle::TypeSpec(3)));
}

#[test]
fn coded_index_rejects_reserved_tag() {
    assert_eq!(TypeHandle::from_coded(0b1_11), None);
}

#[test]
fn coded_index_survives_encoding() {
    for handle in [
        TypeHandle::TypeDef(TypeDefId::new(42)),
        TypeHandle::TypeRef(7),
        TypeHandle::TypeSpec(TypeHandle::MAX_ROW),
    ] {
        assert_eq!(TypeHandle::from_coded(handle.to_coded()), Some(handle));
    }
}

#[test]
fn only_non_nil_typedefs_are_local() {
    assert_eq!(
        TypeHandle::TypeDef(TypeDefId::new(2)).as_type_def(),
        Some(TypeDefId::new(2))
    );
    assert_eq!(TypeHandle::TypeDef(TypeDefId::NIL).as_type_def(), None);
    assert_eq!(TypeHandle::TypeRef(2).as_type_def(), None);
    assert_eq!(TypeHandle::TypeSpec(2).as_type_def(), None);
}

#[test]
fn row_index_is_zero_based() {
    assert_eq!(TypeDefId::new(1).index(), 0);
    assert_eq!(FieldDefId::new(9).index(), 8);
    assert!(FieldDefId::NIL.is_nil());
}

#[test]
fn debug_output_is_compact() {
    assert_eq!(format!("{:?}", TypeDefId::NIL), "TypeDefId::NIL");
    assert_eq!(format!("{:?}", TypeDefId::new(3)), "TypeDefId(3)");
    assert_eq!(
        format!("{:?}", FieldRef::new(ModuleId::new(2), FieldDefId::new(4))),
        "FieldRef(2:4)"
    );
}
