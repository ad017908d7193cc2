//! Error Paths
//!
//! Failures carry the chain of fields and variants they unwound through.

use crate::common::*;

fn outer_schema() -> Schema {
    let inner = StructDef::builder("Inner")
        .field("flag", Schema::bool())
        .build()
        .unwrap();
    let outer = StructDef::builder("Outer")
        .field("id", Schema::u8())
        .field("inner", inner)
        .build()
        .unwrap();
    Schema::from(outer)
}

#[test]
fn nested_decode_failure_reports_full_path() {
    let catalog = test_catalog();
    let err = catalog
        .unpack(&outer_schema(), &[0x01, 0x02], Format::Borsh)
        .unwrap_err();

    assert!(matches!(err.root_cause(), Error::InvalidBool(2)));
    let frames: Vec<String> = err.path().iter().map(|f| f.to_string()).collect();
    assert_eq!(frames, vec!["Inner.flag", "Outer.inner"]);
    assert_eq!(
        err.to_string(),
        "Invalid boolean byte 0x02 (at Inner.flag <- Outer.inner)"
    );
}

#[test]
fn nested_encode_failure_reports_full_path() {
    let catalog = test_catalog();
    let value = Value::Record(
        Record::new("Outer")
            .with("id", 1u8)
            .with("inner", Record::new("Inner").with("flag", 7u8)),
    );
    let err = catalog
        .pack(&outer_schema(), &value, Format::Borsh)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::TypeMismatch { .. }));
    assert_eq!(err.path().len(), 2);
    assert_eq!(err.path()[0].field, "flag");
    assert_eq!(err.path()[1].type_name, "Outer");
}

#[test]
fn missing_field_on_encode() {
    let catalog = test_catalog();
    let value = Value::Record(Record::new("Point").with("x", true));
    let err = catalog
        .pack(&Schema::from(point_def()), &value, Format::Borsh)
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::MissingField(name) if name == "y"));
    assert_eq!(err.path()[0].to_string(), "Point.y");
}

#[test]
fn variant_payload_failure_includes_variant_frame() {
    let catalog = test_catalog();
    let def = shape_def(None);
    let bad = Value::Record(Record::new("Circle").with("radius", "wide"));
    let value = def.value("Circle", Some(bad)).unwrap();
    let err = catalog
        .pack(&Schema::from(def), &value, Format::Borsh)
        .unwrap_err();
    assert!(err
        .to_string()
        .ends_with("(at Circle.radius <- Shape.Circle)"));
}

#[test]
fn top_level_failure_has_no_path() {
    let catalog = test_catalog();
    let err = catalog
        .unpack(&Schema::u32(), &[1, 2], Format::Borsh)
        .unwrap_err();
    assert!(err.path().is_empty());
    assert!(matches!(err, Error::UnexpectedEof { needed: 4, remaining: 2 }));
}

#[test]
fn frames_pass_through_containers() {
    let catalog = test_catalog();
    let schema = Schema::vec(Schema::from(point_def()));
    // One point, then a truncated second
    let raw = [2, 0, 0, 0, 1, 5, 0, 0];
    let err = catalog.unpack(&schema, &raw, Format::Borsh).unwrap_err();
    assert_eq!(err.path().len(), 1);
    assert_eq!(err.path()[0].to_string(), "Point.y");
}
