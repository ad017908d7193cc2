//! podlayout - schema-driven binary and structured codecs
//!
//! A [`Schema`] describes a data shape: atomics, structs, tagged unions,
//! arrays, optionals, tuples, byte and text strings. The [`Catalog`] turns
//! schemas into codecs for two binary layouts and one structured form:
//!
//! - **Borsh**: length-prefixed, variable-size
//! - **ZeroCopy**: every value in a slot of its maximum size
//! - **Structured**: `serde_json::Value` with ordered keys
//!
//! # Quick Start
//!
//! ```ignore
//! use podlayout::{default_catalog, Format, Record, Schema, StructDef, Value};
//!
//! let point = Schema::from(
//!     StructDef::builder("Point")
//!         .field("x", Schema::bool())
//!         .field("y", Schema::u16())
//!         .build()?,
//! );
//! let value = Value::Record(Record::new("Point").with("x", true).with("y", 5u16));
//!
//! let bytes = default_catalog().pack(&point, &value, Format::Borsh)?;
//! assert_eq!(bytes, vec![1, 5, 0]);
//!
//! let json = default_catalog().to_structured(&point, &value)?;
//! assert_eq!(json.to_string(), r#"{"x":true,"y":5}"#);
//! ```
//!
//! # Plain Rust Types
//!
//! Types implementing [`Pod`] carry their own schema:
//!
//! ```ignore
//! use podlayout::{Format, Pod};
//!
//! assert_eq!(Some(5u32).to_bytes(Format::Borsh)?, vec![1, 5, 0, 0, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pod;

pub use pod::Pod;
pub use podlayout_codec::{
    BinaryCodec, BinaryConverter, Catalog, CatalogBuilder, Context, Format, FormatNegotiator,
    NamedConverter, ReadBuffer, StructuredCodec, StructuredConverter, WireFormat, WriteBuffer,
};
pub use podlayout_core::{
    ArraySpec, Atomic, ByteOrder, BytesSpec, CodecConfig, ConfigError, CustomSpec, DefaultFn,
    DefaultSpec, Endian, EnumBuilder, EnumDef, Error, Field, FixedBytesSpec, FixedStrSpec,
    LenSpec, NameTransform, OptionalSpec, PathError, PathFrame, Record, Result, ScalarKind,
    Schema, SchemaRegistry, StaticSpec, StrSpec, StructBuilder, StructDef, TagType, TupleSpec,
    TypeRef, Value, VariantDef, VariantValue, VecSpec,
};

use once_cell::sync::Lazy;

static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(Catalog::default);

/// Process-wide catalog with the default configuration and no overrides
pub fn default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}
