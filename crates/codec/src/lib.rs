//! Codec engine for podlayout
//!
//! This crate turns [`Schema`](podlayout_core::Schema) descriptions into
//! encoders and decoders:
//!
//! - Binary: Borsh (length-prefixed) and ZeroCopy (fixed maximum-size slots)
//! - Structured: `serde_json::Value` with ordered object keys
//! - Catalog: schema → codec dispatch with ordered user overrides
//! - Format negotiation: explicit formats, `Auto` detection on decode, `Pass`
//!   for nested calls
//!
//! # Example
//!
//! ```ignore
//! use podlayout_codec::{Catalog, Format};
//! use podlayout_core::{Schema, Value};
//!
//! let catalog = Catalog::default();
//! let bytes = catalog.pack(&Schema::u32_be(), &Value::UInt(500), Format::Borsh)?;
//! assert_eq!(bytes, vec![0x00, 0x00, 0x01, 0xF4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binary;
pub mod buffer;
pub mod catalog;
pub mod codec;
pub mod format;
pub mod structured;


pub use buffer::{ReadBuffer, WriteBuffer};
pub use catalog::{
    BinaryConverter, Catalog, CatalogBuilder, NamedConverter, StructuredConverter,
};
pub use codec::{BinaryCodec, StructuredCodec};
pub use format::{Context, Format, FormatNegotiator, WireFormat};
