//! Core types for podlayout
//!
//! This crate defines the foundational types used by the codec engine:
//! - Schema: immutable description of a data shape (atomics, structs, enums, containers)
//! - StructDef / EnumDef: validated struct and tagged-union definitions
//! - Value: dynamic value every codec encodes from and decodes into
//! - SchemaRegistry / TypeRef: lazily resolved forward references
//! - CodecConfig: native byte order, auto tag widths, resource limits
//! - Error: error taxonomy with field-path annotation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod registry;
pub mod schema;
pub mod value;

pub use config::{CodecConfig, ConfigError};
pub use error::{Error, PathError, PathFrame, Result};
pub use registry::{SchemaRegistry, TypeRef};
pub use schema::{
    ArraySpec, Atomic, ByteOrder, BytesSpec, CustomSpec, DefaultFn, DefaultSpec, Endian,
    EnumBuilder, EnumDef, Field, FixedBytesSpec, FixedStrSpec, LenSpec, NameTransform,
    OptionalSpec, ScalarKind, Schema, StaticSpec, StrSpec, StructBuilder, StructDef, TagType,
    TupleSpec, VariantDef, VecSpec,
};
pub use value::{Record, Value, VariantValue};
