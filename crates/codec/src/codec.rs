//! Codec capability traits.
//!
//! Every schema payload type (`Atomic`, `VecSpec`, `StructDef`, `EnumDef`, ...)
//! implements [`BinaryCodec`] and [`StructuredCodec`]. The [`Catalog`] picks the
//! implementation with a `match` on the schema variant; user converters can
//! claim a schema first and supply their own implementation.
//!
//! Codecs never recurse into child schemas directly. They go back through the
//! catalog so that converter overrides, forward references, ZeroCopy padding
//! and the recursion budget apply at every level.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::catalog::Catalog;
use crate::format::Context;
use podlayout_core::{Result, Value};
use serde_json::Value as Json;

/// Binary encoding capability.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`: a catalog is shared process-wide.
pub trait BinaryCodec: Send + Sync {
    /// Whether the encoded size never depends on the value.
    fn is_static(&self, catalog: &Catalog, ctx: Context) -> Result<bool>;

    /// Largest possible encoded size.
    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64>;

    /// Encoded size of `value`.
    ///
    /// The default is correct for static codecs only.
    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        let _ = value;
        self.calc_max_size(catalog, ctx)
    }

    /// Append the encoding of `value`.
    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()>;

    /// Consume one encoded value.
    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value>;
}

/// Structured (JSON-like) encoding capability.
pub trait StructuredCodec: Send + Sync {
    /// Render `value` in structured form.
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json>;

    /// Parse a value from structured form.
    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value>;

    /// Value used when an enclosing struct's key is absent.
    ///
    /// `None` means the key is required.
    fn missing(&self, catalog: &Catalog, ctx: Context) -> Result<Option<Value>> {
        let _ = (catalog, ctx);
        Ok(None)
    }
}
