use pretty_assertions::assert_eq;

use ilc_meta::{SignatureBuilder, SignatureHeader, TypeDefId};

use super::*;

fn decode(sig: SignatureBuilder) -> Result<FieldSignatureInfo, SignatureError> {
    decode_field_signature(&sig.finish().unwrap())
}

// ── Primitive tags ──────────────────────────────────────────────

#[test]
fn decodes_primitive_field() {
    let info = decode(SignatureBuilder::field().element(ElementType::R8)).unwrap();
    assert_eq!(info.element_type, ElementType::R8);
    assert_eq!(info.category, ElementCategory::EightByte);
    assert_eq!(info.value_type, None);
}

#[test]
fn categorizes_every_storage_class() {
    let cases = [
        (ElementType::BOOLEAN, ElementCategory::OneByte),
        (ElementType::U1, ElementCategory::OneByte),
        (ElementType::CHAR, ElementCategory::TwoByte),
        (ElementType::I2, ElementCategory::TwoByte),
        (ElementType::R4, ElementCategory::FourByte),
        (ElementType::U4, ElementCategory::FourByte),
        (ElementType::I, ElementCategory::PointerSized),
        (ElementType::FNPTR, ElementCategory::PointerSized),
        (ElementType::PTR, ElementCategory::PointerSized),
        (ElementType::I8, ElementCategory::EightByte),
        (ElementType::STRING, ElementCategory::Reference),
        (ElementType::OBJECT, ElementCategory::Reference),
        (ElementType::SZARRAY, ElementCategory::Reference),
        (ElementType::MVAR, ElementCategory::Reference),
        (ElementType::BYREF, ElementCategory::ByRef),
        (ElementType::TYPEDBYREF, ElementCategory::Unrecognized),
        (ElementType::VOID, ElementCategory::Unrecognized),
    ];
    for (element, category) in cases {
        assert_eq!(ElementCategory::of(element), category, "{element}");
    }
}

// ── Value types and generic instantiations ──────────────────────

#[test]
fn value_type_carries_its_handle() {
    let handle = TypeHandle::TypeDef(TypeDefId::new(4));
    let info = decode(SignatureBuilder::field().value_type(handle)).unwrap();
    assert_eq!(info.category, ElementCategory::ValueType);
    assert_eq!(info.value_type, Some(handle));
}

#[test]
fn cross_module_value_type_handle_is_returned_unresolved() {
    let handle = TypeHandle::TypeRef(9);
    let info = decode(SignatureBuilder::field().value_type(handle)).unwrap();
    assert_eq!(info.value_type, Some(handle));
}

#[test]
fn generic_instance_uses_the_instantiated_kind() {
    let definition = TypeHandle::TypeRef(2);
    let class = decode(SignatureBuilder::field().generic_instance(
        false,
        definition,
        &[ElementType::I4],
    ))
    .unwrap();
    assert_eq!(class.element_type, ElementType::CLASS);
    assert_eq!(class.category, ElementCategory::Reference);
    assert_eq!(class.value_type, None);

    let value = decode(SignatureBuilder::field().generic_instance(
        true,
        definition,
        &[ElementType::STRING],
    ))
    .unwrap();
    assert_eq!(value.category, ElementCategory::ValueType);
    assert_eq!(value.value_type, Some(definition));
}

// ── Modifiers ───────────────────────────────────────────────────

#[test]
fn skips_custom_modifiers() {
    let volatile = TypeHandle::TypeRef(1);
    let info = decode(
        SignatureBuilder::field()
            .custom_modifier(true, volatile)
            .custom_modifier(false, TypeHandle::TypeRef(300))
            .element(ElementType::I4),
    )
    .unwrap();
    assert_eq!(info.element_type, ElementType::I4);
}

#[test]
fn skips_leading_sentinel() {
    let info = decode(
        SignatureBuilder::field()
            .sentinel()
            .element(ElementType::U2),
    )
    .unwrap();
    assert_eq!(info.category, ElementCategory::TwoByte);
}

#[test]
fn skips_modifiers_after_generic_marker() {
    let info = decode(
        SignatureBuilder::field()
            .element(ElementType::GENERICINST)
            .custom_modifier(false, TypeHandle::TypeRef(1))
            .value_type(TypeHandle::TypeDef(TypeDefId::new(1)))
            .compressed(0),
    )
    .unwrap();
    assert_eq!(info.category, ElementCategory::ValueType);
}

// ── Malformed blobs ─────────────────────────────────────────────

#[test]
fn rejects_non_field_header() {
    let sig = SignatureBuilder::with_header(SignatureHeader::from_raw(0x07))
        .element(ElementType::I4);
    assert_eq!(
        decode(sig),
        Err(SignatureError::NotAFieldSignature { header: 0x07 })
    );
}

#[test]
fn rejects_empty_blob() {
    assert_eq!(
        decode_field_signature(&[]),
        Err(SignatureError::Blob(BlobError::UnexpectedEnd { offset: 0 }))
    );
}

#[test]
fn rejects_missing_element_type() {
    assert_eq!(
        decode(SignatureBuilder::field()),
        Err(SignatureError::Blob(BlobError::UnexpectedEnd { offset: 1 }))
    );
}

#[test]
fn rejects_value_type_without_handle() {
    assert_eq!(
        decode(SignatureBuilder::field().element(ElementType::VALUETYPE)),
        Err(SignatureError::Blob(BlobError::UnexpectedEnd { offset: 2 }))
    );
}

#[test]
fn rejects_truncated_modifier() {
    assert_eq!(
        decode(SignatureBuilder::field().element(ElementType::CMOD_OPT)),
        Err(SignatureError::Blob(BlobError::UnexpectedEnd { offset: 2 }))
    );
}

#[test]
fn unknown_tag_decodes_without_handle() {
    let info = decode(SignatureBuilder::field().raw(&[0x17])).unwrap();
    assert_eq!(info.category, ElementCategory::Unrecognized);
    assert_eq!(info.value_type, None);
}
