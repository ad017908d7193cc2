//! Converter catalog
//!
//! The catalog maps a [`Schema`] to the codec that handles it and is the
//! single entry point for every encode/decode, top-level or nested.
//!
//! ## Resolution Order
//!
//! 1. User converters, in registration order (first match wins)
//! 2. Built-in codec selected by the schema variant
//! 3. `Schema::Ref` is resolved through the registry and dispatched again
//! 4. An unclaimed `Schema::Custom` fails with `NoConverterFound`
//!
//! Binary and structured converters are registered independently: a user
//! type may override only its structured rendering and keep the built-in
//! binary layout, or the other way round.
//!
//! ## Registration
//!
//! ```ignore
//! let catalog = Catalog::builder()
//!     .config(CodecConfig::new().with_native_order(Endian::Big))
//!     .registry(registry)
//!     .binary(NamedConverter::new("Pubkey", PubkeyCodec))
//!     .build()?;
//! ```

use crate::binary::slot;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{BinaryCodec, StructuredCodec};
use crate::format::{Context, Format, FormatNegotiator, WireFormat};
use podlayout_core::{CodecConfig, Error, Result, Schema, SchemaRegistry, TypeRef, Value};
use serde_json::Value as Json;
use std::fmt;
use tracing::{debug, trace};

/// Longest chain of references that resolve to other references
const MAX_REF_HOPS: usize = 64;

/// User-extensible binary dispatch entry
pub trait BinaryConverter: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Claim `schema`, or return `None` to let later entries try
    fn resolve<'s>(&'s self, schema: &'s Schema) -> Option<&'s dyn BinaryCodec>;
}

/// User-extensible structured dispatch entry
pub trait StructuredConverter: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Claim `schema`, or return `None` to let later entries try
    fn resolve<'s>(&'s self, schema: &'s Schema) -> Option<&'s dyn StructuredCodec>;
}

/// Converter claiming `Schema::Custom` schemas of one name
#[derive(Debug, Clone)]
pub struct NamedConverter<C> {
    name: String,
    codec: C,
}

impl<C> NamedConverter<C> {
    /// Handle `Schema::custom(name)` with `codec`
    pub fn new(name: impl Into<String>, codec: C) -> Self {
        NamedConverter {
            name: name.into(),
            codec,
        }
    }

    fn claims(&self, schema: &Schema) -> bool {
        matches!(schema, Schema::Custom(spec) if spec.name == self.name)
    }
}

impl<C: BinaryCodec> BinaryConverter for NamedConverter<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve<'s>(&'s self, schema: &'s Schema) -> Option<&'s dyn BinaryCodec> {
        if self.claims(schema) {
            Some(&self.codec)
        } else {
            None
        }
    }
}

impl<C: StructuredCodec> StructuredConverter for NamedConverter<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve<'s>(&'s self, schema: &'s Schema) -> Option<&'s dyn StructuredCodec> {
        if self.claims(schema) {
            Some(&self.codec)
        } else {
            None
        }
    }
}

/// Builder for [`Catalog`]
#[derive(Default)]
pub struct CatalogBuilder {
    config: CodecConfig,
    registry: SchemaRegistry,
    binary: Vec<Box<dyn BinaryConverter>>,
    structured: Vec<Box<dyn StructuredConverter>>,
}

impl CatalogBuilder {
    /// Start from the default configuration and an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the codec configuration
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the registry forward references resolve against
    pub fn registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Append a binary converter
    pub fn binary(mut self, converter: impl BinaryConverter + 'static) -> Self {
        self.binary.push(Box::new(converter));
        self
    }

    /// Append a structured converter
    pub fn structured(mut self, converter: impl StructuredConverter + 'static) -> Self {
        self.structured.push(Box::new(converter));
        self
    }

    /// Validate the configuration and registry and freeze the catalog
    pub fn build(self) -> Result<Catalog> {
        self.config.validate()?;
        self.registry.validate()?;
        debug!(
            target: "podlayout::catalog",
            binary_converters = self.binary.len(),
            structured_converters = self.structured.len(),
            schemas = self.registry.len(),
            "Built catalog"
        );
        Ok(self.assemble())
    }

    fn assemble(self) -> Catalog {
        Catalog {
            negotiator: FormatNegotiator::new(self.config),
            registry: self.registry,
            binary: self.binary,
            structured: self.structured,
        }
    }
}

/// Schema → codec dispatch plus the public encode/decode surface
///
/// Built once, then read-only.
pub struct Catalog {
    negotiator: FormatNegotiator,
    registry: SchemaRegistry,
    binary: Vec<Box<dyn BinaryConverter>>,
    structured: Vec<Box<dyn StructuredConverter>>,
}

impl Default for Catalog {
    fn default() -> Self {
        CatalogBuilder::new().assemble()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binary: Vec<&str> = self.binary.iter().map(|c| c.name()).collect();
        let structured: Vec<&str> = self.structured.iter().map(|c| c.name()).collect();
        f.debug_struct("Catalog")
            .field("config", self.config())
            .field("schemas", &self.registry.len())
            .field("binary", &binary)
            .field("structured", &structured)
            .finish()
    }
}

impl Catalog {
    /// Start building a catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Codec configuration
    pub fn config(&self) -> &CodecConfig {
        self.negotiator.config()
    }

    /// Format negotiator owned by this catalog
    pub fn negotiator(&self) -> &FormatNegotiator {
        &self.negotiator
    }

    /// Registry used for forward references
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Binary codec handling `schema`
    pub fn binary_codec<'s>(&'s self, schema: &'s Schema) -> Result<&'s dyn BinaryCodec> {
        let mut schema = schema;
        let mut hops = 0;
        loop {
            for converter in &self.binary {
                if let Some(codec) = converter.resolve(schema) {
                    trace!(
                        target: "podlayout::catalog",
                        converter = converter.name(),
                        schema = %schema,
                        "Binary converter override"
                    );
                    return Ok(codec);
                }
            }
            let codec: &'s dyn BinaryCodec = match schema {
                Schema::Atomic(atomic) => atomic,
                Schema::Array(spec) => spec,
                Schema::Vec(spec) => spec,
                Schema::FixedBytes(spec) => spec,
                Schema::Bytes(spec) => spec,
                Schema::FixedStr(spec) => spec,
                Schema::Str(spec) => spec,
                Schema::Optional(spec) => spec,
                Schema::Tuple(spec) => spec,
                Schema::Static(spec) => spec,
                Schema::Default(spec) => spec,
                Schema::Struct(def) => def.as_ref(),
                Schema::Enum(def) => def.as_ref(),
                Schema::Ref(reference) => {
                    schema = self.follow(reference, &mut hops)?;
                    continue;
                }
                Schema::Custom(_) => return Err(no_converter(schema)),
            };
            return Ok(codec);
        }
    }

    /// Structured codec handling `schema`
    pub fn structured_codec<'s>(&'s self, schema: &'s Schema) -> Result<&'s dyn StructuredCodec> {
        let mut schema = schema;
        let mut hops = 0;
        loop {
            for converter in &self.structured {
                if let Some(codec) = converter.resolve(schema) {
                    trace!(
                        target: "podlayout::catalog",
                        converter = converter.name(),
                        schema = %schema,
                        "Structured converter override"
                    );
                    return Ok(codec);
                }
            }
            let codec: &'s dyn StructuredCodec = match schema {
                Schema::Atomic(atomic) => atomic,
                Schema::Array(spec) => spec,
                Schema::Vec(spec) => spec,
                Schema::FixedBytes(spec) => spec,
                Schema::Bytes(spec) => spec,
                Schema::FixedStr(spec) => spec,
                Schema::Str(spec) => spec,
                Schema::Optional(spec) => spec,
                Schema::Tuple(spec) => spec,
                Schema::Static(spec) => spec,
                Schema::Default(spec) => spec,
                Schema::Struct(def) => def.as_ref(),
                Schema::Enum(def) => def.as_ref(),
                Schema::Ref(reference) => {
                    schema = self.follow(reference, &mut hops)?;
                    continue;
                }
                Schema::Custom(_) => return Err(no_converter(schema)),
            };
            return Ok(codec);
        }
    }

    fn follow<'s>(&self, reference: &'s TypeRef, hops: &mut usize) -> Result<&'s Schema> {
        *hops += 1;
        if *hops > MAX_REF_HOPS {
            return Err(Error::UnresolvedReference(reference.name().to_string()));
        }
        reference.resolve(&self.registry)
    }

    // ========================================================================
    // Public surface
    // ========================================================================

    /// Whether the encoded size of `schema` never depends on the value
    pub fn is_static(&self, schema: &Schema) -> Result<bool> {
        self.is_static_in(schema, self.negotiator.context(WireFormat::Borsh))
    }

    /// Largest encoded size of `schema` under `wire`
    ///
    /// The wire format matters for auto-tagged enums only.
    pub fn calc_max_size(&self, schema: &Schema, wire: WireFormat) -> Result<u64> {
        self.max_size_of(schema, self.negotiator.context(wire))
    }

    /// Encoded size of `value`, or of any value when `value` is `None`
    ///
    /// Without a value the schema must be static (`NotStatic` otherwise).
    /// Under ZeroCopy every value has the maximum size.
    pub fn calc_size(&self, schema: &Schema, value: Option<&Value>, format: Format) -> Result<u64> {
        let ctx = self.negotiator.for_encode(format, None)?;
        match value {
            Some(value) => self.size_of_value(schema, value, ctx),
            None => {
                if !self.is_static_in(schema, ctx)? {
                    return Err(Error::NotStatic(schema.type_name()));
                }
                self.max_size_of(schema, ctx)
            }
        }
    }

    /// Encode `value` into a new byte vector
    pub fn pack(&self, schema: &Schema, value: &Value, format: Format) -> Result<Vec<u8>> {
        let mut buf = WriteBuffer::new();
        self.pack_into(schema, &mut buf, value, format, None)?;
        Ok(buf.into_inner())
    }

    /// Encode `value` onto an existing buffer
    ///
    /// `inherited` is the context of an enclosing call and is required when
    /// `format` is `Pass`.
    pub fn pack_into(
        &self,
        schema: &Schema,
        buf: &mut WriteBuffer,
        value: &Value,
        format: Format,
        inherited: Option<Context>,
    ) -> Result<()> {
        let ctx = self.negotiator.for_encode(format, inherited)?;
        if format != Format::Pass {
            self.check_zero_copy_limit(schema, ctx)?;
        }
        self.encode_value(schema, buf, value, ctx)
    }

    /// Decode a value, rejecting trailing bytes if `checked_decode` is configured
    pub fn unpack(&self, schema: &Schema, raw: &[u8], format: Format) -> Result<Value> {
        if self.config().checked_decode {
            return self.unpack_checked(schema, raw, format);
        }
        let mut buf = ReadBuffer::new(raw);
        self.unpack_partial(schema, &mut buf, format, None)
    }

    /// Decode a value that must consume all of `raw`
    pub fn unpack_checked(&self, schema: &Schema, raw: &[u8], format: Format) -> Result<Value> {
        let mut buf = ReadBuffer::new(raw);
        let value = self.unpack_partial(schema, &mut buf, format, None)?;
        if !buf.is_empty() {
            debug!(
                target: "podlayout::format",
                consumed = buf.position(),
                total = buf.total_len(),
                "Rejected trailing bytes"
            );
            return Err(Error::TrailingBytes {
                consumed: buf.position(),
                total: buf.total_len(),
            });
        }
        Ok(value)
    }

    /// Decode one value from the current buffer position
    ///
    /// `Auto` compares the schema's ZeroCopy maximum size with the bytes
    /// remaining in `buf`.
    pub fn unpack_partial(
        &self,
        schema: &Schema,
        buf: &mut ReadBuffer<'_>,
        format: Format,
        inherited: Option<Context>,
    ) -> Result<Value> {
        let ctx = self
            .negotiator
            .for_decode(format, buf.remaining(), inherited, |ctx| {
                self.max_size_of(schema, ctx)
            })?;
        if format != Format::Pass {
            self.check_zero_copy_limit(schema, ctx)?;
        }
        self.decode_value(schema, buf, ctx)
    }

    /// Render `value` in structured form
    pub fn to_structured(&self, schema: &Schema, value: &Value) -> Result<Json> {
        self.to_structured_in(schema, value, self.structured_context())
    }

    /// Parse a value from structured form
    pub fn from_structured(&self, schema: &Schema, raw: &Json) -> Result<Value> {
        self.from_structured_in(schema, raw, self.structured_context())
    }

    fn structured_context(&self) -> Context {
        self.negotiator.context(WireFormat::Borsh)
    }

    fn check_zero_copy_limit(&self, schema: &Schema, ctx: Context) -> Result<()> {
        if !ctx.is_zero_copy() {
            return Ok(());
        }
        let size = self.max_size_of(schema, ctx)?;
        if size > ctx.max_zero_copy_size() {
            return Err(Error::ZeroCopyTooLarge {
                size,
                limit: ctx.max_zero_copy_size(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Context-level entry points used by codecs
    // ========================================================================

    /// [`BinaryCodec::is_static`] through dispatch
    pub fn is_static_in(&self, schema: &Schema, ctx: Context) -> Result<bool> {
        let ctx = ctx.descend()?;
        self.binary_codec(schema)?.is_static(self, ctx)
    }

    /// [`BinaryCodec::calc_max_size`] through dispatch
    pub fn max_size_of(&self, schema: &Schema, ctx: Context) -> Result<u64> {
        let ctx = ctx.descend()?;
        self.binary_codec(schema)?.calc_max_size(self, ctx)
    }

    /// Encoded size of `value` in this context
    pub fn size_of_value(&self, schema: &Schema, value: &Value, ctx: Context) -> Result<u64> {
        if ctx.is_zero_copy() {
            return self.max_size_of(schema, ctx);
        }
        let ctx = ctx.descend()?;
        self.binary_codec(schema)?.calc_size(self, value, ctx)
    }

    /// Encode `value`, padding dynamic values to their slot under ZeroCopy
    pub fn encode_value(
        &self,
        schema: &Schema,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let ctx = ctx.descend()?;
        let codec = self.binary_codec(schema)?;
        if ctx.is_zero_copy() && !codec.is_static(self, ctx)? {
            let size = codec.calc_max_size(self, ctx)?;
            return slot::encode_padded(buf, size, ctx.max_zero_copy_size(), |buf| {
                codec.encode(self, buf, value, ctx)
            });
        }
        codec.encode(self, buf, value, ctx)
    }

    /// Decode a value, consuming the slot slack of dynamic values under ZeroCopy
    pub fn decode_value(&self, schema: &Schema, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let ctx = ctx.descend()?;
        let codec = self.binary_codec(schema)?;
        if ctx.is_zero_copy() && !codec.is_static(self, ctx)? {
            let size = codec.calc_max_size(self, ctx)?;
            return slot::decode_padded(buf, size, |buf| codec.decode(self, buf, ctx));
        }
        codec.decode(self, buf, ctx)
    }

    /// [`StructuredCodec::to_structured`] through dispatch
    pub fn to_structured_in(&self, schema: &Schema, value: &Value, ctx: Context) -> Result<Json> {
        let ctx = ctx.descend()?;
        self.structured_codec(schema)?.to_structured(self, value, ctx)
    }

    /// [`StructuredCodec::from_structured`] through dispatch
    pub fn from_structured_in(&self, schema: &Schema, raw: &Json, ctx: Context) -> Result<Value> {
        let ctx = ctx.descend()?;
        self.structured_codec(schema)?.from_structured(self, raw, ctx)
    }

    /// [`StructuredCodec::missing`] through dispatch
    pub fn missing_value(&self, schema: &Schema, ctx: Context) -> Result<Option<Value>> {
        let ctx = ctx.descend()?;
        self.structured_codec(schema)?.missing(self, ctx)
    }
}

fn no_converter(schema: &Schema) -> Error {
    Error::NoConverterFound {
        schema: schema.type_name(),
    }
}
