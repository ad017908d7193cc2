//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use podlayout::{
    default_catalog, Atomic, Catalog, CodecConfig, EnumDef, Error, Format, LenSpec, Record,
    Schema, SchemaRegistry, StructDef, TagType, Value, WireFormat,
};
pub use serde_json::{json, Value as Json};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness.
///
/// Filter with `RUST_LOG`, e.g. `RUST_LOG=podlayout::format=debug`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Catalog with the small test limits of [`CodecConfig::for_testing`].
pub fn test_catalog() -> Catalog {
    init_tracing();
    Catalog::builder()
        .config(CodecConfig::for_testing())
        .build()
        .unwrap()
}

/// Catalog resolving references against `registry`.
pub fn catalog_with(registry: SchemaRegistry) -> Catalog {
    init_tracing();
    Catalog::builder()
        .config(CodecConfig::for_testing())
        .registry(registry)
        .build()
        .unwrap()
}

// ============================================================================
// Fixtures
// ============================================================================

/// `Point { x: Bool, y: U16 }`
pub fn point_def() -> StructDef {
    StructDef::builder("Point")
        .field("x", Schema::bool())
        .field("y", Schema::u16())
        .build()
        .unwrap()
}

/// A `Point` value.
pub fn point(x: bool, y: u16) -> Value {
    Value::Record(Record::new("Point").with("x", x).with("y", y))
}

/// `XYZ { X = 3, Y(U32), Z = 8 (U16) }`
pub fn xyz_def() -> EnumDef {
    EnumDef::builder("XYZ")
        .unit_with("X", 3)
        .variant("Y", Schema::u32())
        .variant_with("Z", 8, Schema::u16())
        .build()
        .unwrap()
}

/// `Circle { radius: U32 }`
pub fn circle_def() -> StructDef {
    StructDef::builder("Circle")
        .field("radius", Schema::u32())
        .build()
        .unwrap()
}

/// `Shape { Dot, Circle(Circle), Label(Str) }`, optionally with a tag key.
pub fn shape_def(tag_key: Option<&str>) -> EnumDef {
    let mut builder = EnumDef::builder("Shape")
        .unit("Dot")
        .variant("Circle", circle_def())
        .variant("Label", Schema::str());
    if let Some(key) = tag_key {
        builder = builder.tag_key(key);
    }
    builder.build().unwrap()
}

/// `Shape.Circle` with the given radius.
pub fn circle(def: &EnumDef, radius: u32) -> Value {
    let payload = Value::Record(Record::new("Circle").with("radius", radius));
    def.value("Circle", Some(payload)).unwrap()
}

/// Pack then unpack with the same format, asserting equality; returns the bytes.
pub fn roundtrip(catalog: &Catalog, schema: &Schema, value: &Value, format: Format) -> Vec<u8> {
    let bytes = catalog.pack(schema, value, format).unwrap();
    tracing::debug!(schema = schema.type_name(), ?format, len = bytes.len(), "packed");
    let decoded = catalog.unpack_checked(schema, &bytes, format).unwrap();
    assert_eq!(&decoded, value, "roundtrip through {:?}", format);
    bytes
}
