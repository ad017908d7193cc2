//! Definition Validation
//!
//! Malformed schemas are rejected when they are built, before any data is
//! encoded.

use crate::common::*;

#[test]
fn discriminants_continue_from_previous() {
    let def = xyz_def();
    let discriminants: Vec<i128> = def.variants().iter().map(|v| v.discriminant).collect();
    assert_eq!(discriminants, vec![3, 4, 8]);

    let def = EnumDef::builder("Seq")
        .unit("A")
        .unit("B")
        .unit_with("C", 10)
        .unit("D")
        .build()
        .unwrap();
    let discriminants: Vec<i128> = def.variants().iter().map(|v| v.discriminant).collect();
    assert_eq!(discriminants, vec![0, 1, 10, 11]);
}

#[test]
fn repeated_discriminant_rejected() {
    let err = EnumDef::builder("Clash")
        .unit_with("A", 2)
        .unit("B")
        .unit_with("C", 3)
        .build()
        .unwrap_err();
    match err {
        Error::DuplicateDiscriminant {
            enum_name,
            discriminant,
            first,
            second,
        } => {
            assert_eq!(enum_name, "Clash");
            assert_eq!(discriminant, 3);
            assert_eq!(first, "B");
            assert_eq!(second, "C");
        }
        other => panic!("expected DuplicateDiscriminant, got {:?}", other),
    }
}

#[test]
fn repeated_variant_name_rejected() {
    let err = EnumDef::builder("Twice")
        .unit("A")
        .unit("A")
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateVariant { .. }));
    assert!(err.is_definition_error());
}

#[test]
fn empty_enum_rejected() {
    assert!(matches!(
        EnumDef::builder("Nothing").build(),
        Err(Error::EmptyEnum(name)) if name == "Nothing"
    ));
}

#[test]
fn default_tag_is_one_byte() {
    assert!(matches!(
        EnumDef::builder("Big").unit_with("A", 256).build(),
        Err(Error::DiscriminantOutOfRange { discriminant: 256, .. })
    ));
    // A wider fixed tag accepts it
    let def = EnumDef::builder("Big")
        .tag(TagType::Fixed(Atomic::u16()))
        .unit_with("A", 256)
        .build()
        .unwrap();
    let catalog = test_catalog();
    let value = def.unit_value("A").unwrap();
    assert_eq!(
        roundtrip(&catalog, &Schema::from(def), &value, Format::Borsh),
        vec![0x00, 0x01]
    );
}

#[test]
fn negative_discriminants_need_signed_tag() {
    assert!(EnumDef::builder("Neg").unit_with("A", -1).build().is_err());
    let def = EnumDef::builder("Neg")
        .tag(TagType::Fixed(Atomic::i8()))
        .unit_with("A", -1)
        .unit("B")
        .build()
        .unwrap();
    assert_eq!(def.variant("B").unwrap().discriminant, 0);
}

#[test]
fn float_tag_rejected() {
    assert!(matches!(
        EnumDef::builder("Float")
            .tag(TagType::Fixed(Atomic::f32()))
            .unit("A")
            .build(),
        Err(Error::InvalidTagType { .. })
    ));
}

#[test]
fn repeated_field_rejected() {
    let err = StructDef::builder("Dup")
        .field("a", Schema::u8())
        .field("a", Schema::u8())
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateField { .. }));
}

#[test]
fn invalid_config_rejected_at_build() {
    let err = Catalog::builder()
        .config(CodecConfig::new().with_max_depth(0))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.is_definition_error());

    let err = Catalog::builder()
        .config(CodecConfig::new().with_borsh_tag(Atomic::i8()))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn unknown_discriminant_on_decode() {
    let catalog = test_catalog();
    let err = catalog
        .unpack(&Schema::from(xyz_def()), &[0x05], Format::Borsh)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnknownDiscriminant { discriminant: 5, .. }
    ));
}
