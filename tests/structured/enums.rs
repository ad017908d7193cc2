//! Tagged Union Rendering
//!
//! Name-keyed objects, tag-key objects, and renamed variant tags.

use crate::common::*;
use podlayout::NameTransform;

#[test]
fn unit_variant_is_bare_name() {
    let catalog = test_catalog();
    let def = shape_def(None);
    let dot = def.unit_value("Dot").unwrap();
    let schema = Schema::from(def);
    let json = catalog.to_structured(&schema, &dot).unwrap();
    assert_eq!(json, json!("Dot"));
    assert_eq!(catalog.from_structured(&schema, &json).unwrap(), dot);
}

#[test]
fn payload_variant_is_single_key_object() {
    let catalog = test_catalog();
    let def = shape_def(None);
    let value = circle(&def, 2);
    let schema = Schema::from(def.clone());
    let json = catalog.to_structured(&schema, &value).unwrap();
    assert_eq!(json, json!({"Circle": {"radius": 2}}));
    assert_eq!(catalog.from_structured(&schema, &json).unwrap(), value);

    let label = def.value("Label", Some(Value::from("hi"))).unwrap();
    let json = catalog.to_structured(&schema, &label).unwrap();
    assert_eq!(json, json!({"Label": "hi"}));
    assert_eq!(catalog.from_structured(&schema, &json).unwrap(), label);
}

#[test]
fn tag_key_merges_payload_fields() {
    let catalog = test_catalog();
    let def = shape_def(Some("kind"));
    let value = circle(&def, 7);
    let schema = Schema::from(def.clone());
    let json = catalog.to_structured(&schema, &value).unwrap();
    assert_eq!(json, json!({"kind": "Circle", "radius": 7}));
    assert_eq!(json.to_string(), r#"{"kind":"Circle","radius":7}"#);
    assert_eq!(catalog.from_structured(&schema, &json).unwrap(), value);

    let dot = def.unit_value("Dot").unwrap();
    let json = catalog.to_structured(&schema, &dot).unwrap();
    assert_eq!(json, json!({"kind": "Dot"}));
    assert_eq!(catalog.from_structured(&schema, &json).unwrap(), dot);
}

#[test]
fn tag_key_requires_object_payload() {
    let catalog = test_catalog();
    let def = shape_def(Some("kind"));
    let label = def.value("Label", Some(Value::from("hi"))).unwrap();
    assert!(matches!(
        catalog.to_structured(&Schema::from(def), &label),
        Err(Error::Structured(_))
    ));
}

#[test]
fn payload_field_named_like_tag_key_rejected() {
    let catalog = test_catalog();
    let kind = StructDef::builder("Kinded")
        .field("kind", Schema::str())
        .build()
        .unwrap();
    let def = EnumDef::builder("Entry")
        .variant("Item", kind)
        .tag_key("kind")
        .build()
        .unwrap();
    let payload = Value::Record(Record::new("Kinded").with("kind", "Other"));
    let item = def.value("Item", Some(payload)).unwrap();
    let err = catalog
        .to_structured(&Schema::from(def), &item)
        .unwrap_err();
    assert!(matches!(err, Error::Structured(_)));
    assert!(err.to_string().contains("Entry.Item"));
}

#[test]
fn tag_key_missing() {
    let catalog = test_catalog();
    let schema = Schema::from(shape_def(Some("kind")));
    assert!(matches!(
        catalog.from_structured(&schema, &json!({"radius": 1})),
        Err(Error::Structured(_))
    ));
}

#[test]
fn renamed_tags() {
    let catalog = test_catalog();
    let def = EnumDef::builder("Level")
        .unit("Low")
        .variant("Custom", Schema::u8())
        .tag_names(NameTransform::Lower)
        .build()
        .unwrap();
    let schema = Schema::from(def.clone());

    let low = def.unit_value("Low").unwrap();
    assert_eq!(catalog.to_structured(&schema, &low).unwrap(), json!("low"));
    assert_eq!(catalog.from_structured(&schema, &json!("low")).unwrap(), low);

    let custom = def.value("Custom", Some(Value::UInt(4))).unwrap();
    assert_eq!(
        catalog.to_structured(&schema, &custom).unwrap(),
        json!({"custom": 4})
    );
    // Lookup goes by the rendered text, not the declared name
    assert!(matches!(
        catalog.from_structured(&schema, &json!("Low")),
        Err(Error::UnknownVariantName { .. })
    ));
}

#[test]
fn payload_presence_checked() {
    let catalog = test_catalog();
    let schema = Schema::from(shape_def(None));
    assert!(matches!(
        catalog.from_structured(&schema, &json!("Circle")),
        Err(Error::PayloadMismatch { expects_payload: true, .. })
    ));
    assert!(matches!(
        catalog.from_structured(&schema, &json!({"Dot": 1})),
        Err(Error::PayloadMismatch { expects_payload: false, .. })
    ));
    // Explicit null is accepted for a unit variant
    assert!(catalog.from_structured(&schema, &json!({"Dot": null})).is_ok());
}

#[test]
fn payload_error_path() {
    let catalog = test_catalog();
    let schema = Schema::from(shape_def(None));
    let err = catalog
        .from_structured(&schema, &json!({"Circle": {"radius": "big"}}))
        .unwrap_err();
    let frames: Vec<String> = err.path().iter().map(|f| f.to_string()).collect();
    assert_eq!(frames, vec!["Circle.radius", "Shape.Circle"]);
}

#[test]
fn enum_inside_struct() {
    let catalog = test_catalog();
    let shape = shape_def(Some("kind"));
    let def = StructDef::builder("Canvas")
        .field("shapes", Schema::vec(Schema::from(shape.clone())))
        .build()
        .unwrap();
    let schema = Schema::from(def);
    let value = Value::Record(Record::new("Canvas").with(
        "shapes",
        vec![shape.unit_value("Dot").unwrap(), circle(&shape, 3)],
    ));
    let json = catalog.to_structured(&schema, &value).unwrap();
    assert_eq!(
        json,
        json!({"shapes": [{"kind": "Dot"}, {"kind": "Circle", "radius": 3}]})
    );
    assert_eq!(catalog.from_structured(&schema, &json).unwrap(), value);
}
