//! Absent Keys And Defaults
//!
//! A field default wins, then the schema's own default (`Default[T]`);
//! otherwise the key is required.

use crate::common::*;

fn settings_schema() -> Schema {
    StructDef::builder("Settings")
        .field("name", Schema::str())
        .field_with_default("retries", Schema::u8(), || Value::UInt(3))
        .field("verbose", Schema::with_default(Schema::bool(), || Value::Bool(false)))
        .build()
        .unwrap()
        .into()
}

fn settings(name: &str, retries: u8, verbose: bool) -> Value {
    Value::Record(
        Record::new("Settings")
            .with("name", name)
            .with("retries", retries)
            .with("verbose", verbose),
    )
}

#[test]
fn absent_keys_take_defaults() {
    let catalog = test_catalog();
    let value = catalog
        .from_structured(&settings_schema(), &json!({"name": "svc"}))
        .unwrap();
    assert_eq!(value, settings("svc", 3, false));
}

#[test]
fn present_keys_override_defaults() {
    let catalog = test_catalog();
    let value = catalog
        .from_structured(
            &settings_schema(),
            &json!({"name": "svc", "retries": 9, "verbose": true}),
        )
        .unwrap();
    assert_eq!(value, settings("svc", 9, true));
}

#[test]
fn field_without_default_required() {
    let catalog = test_catalog();
    let err = catalog
        .from_structured(&settings_schema(), &json!({"retries": 1}))
        .unwrap_err();
    assert!(matches!(err.root_cause(), Error::MissingField(key) if key == "name"));
}

#[test]
fn defaults_do_not_change_binary_layout() {
    let catalog = test_catalog();
    let value = settings("a", 3, true);
    assert_eq!(
        roundtrip(&catalog, &settings_schema(), &value, Format::Borsh),
        vec![1, 0, 0, 0, b'a', 3, 1]
    );
}

#[test]
fn defaults_always_rendered() {
    let catalog = test_catalog();
    let json = catalog
        .to_structured(&settings_schema(), &settings("a", 3, false))
        .unwrap();
    assert_eq!(json, json!({"name": "a", "retries": 3, "verbose": false}));
}
