//! Schema model
//!
//! A [`Schema`] describes the shape of data: atomics, structs, tagged unions,
//! fixed and variable arrays, byte and text strings, optionals, tuples, and
//! the `Static`/`Default` wrappers. Schemas are immutable once built and cheap
//! to clone (children are shared behind `Arc`).
//!
//! ## Module Structure
//!
//! - `atomic`: fixed-width scalar kinds and byte orders
//! - `record`: struct definitions and key renaming
//! - `tagged`: tagged-union definitions with discriminant assignment
//!
//! Forward references ([`Schema::Ref`]) are resolved lazily through a
//! [`SchemaRegistry`](crate::registry::SchemaRegistry).

pub mod atomic;
pub mod record;
pub mod tagged;

pub use atomic::{Atomic, ByteOrder, Endian, ScalarKind};
pub use record::{Field, NameTransform, StructBuilder, StructDef};
pub use tagged::{EnumBuilder, EnumDef, TagType, VariantDef};

use crate::error::{Error, Result};
use crate::registry::TypeRef;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Description of a data shape
#[derive(Debug, Clone)]
pub enum Schema {
    /// Fixed-width scalar
    Atomic(Atomic),
    /// Fixed-length array `[T; N]`
    Array(ArraySpec),
    /// Length-prefixed array `Vec[T, N_max, LenType]`
    Vec(VecSpec),
    /// Fixed-length byte string, zero padded
    FixedBytes(FixedBytesSpec),
    /// Length-prefixed byte string
    Bytes(BytesSpec),
    /// Fixed-length UTF-8 text, zero padded
    FixedStr(FixedStrSpec),
    /// Length-prefixed UTF-8 text
    Str(StrSpec),
    /// 1-byte presence flag plus value
    Optional(OptionalSpec),
    /// Positional aggregate
    Tuple(TupleSpec),
    /// Any schema forced into a fixed byte slot
    Static(StaticSpec),
    /// Binary-transparent wrapper supplying a structured default
    Default(DefaultSpec),
    /// Ordered named fields
    Struct(Arc<StructDef>),
    /// Tagged union
    Enum(Arc<EnumDef>),
    /// Forward reference resolved by name
    Ref(TypeRef),
    /// User type handled by a registered converter
    Custom(CustomSpec),
}

/// Fixed-length array
#[derive(Debug, Clone)]
pub struct ArraySpec {
    /// Element schema
    pub elem: Arc<Schema>,
    /// Exact element count
    pub len: usize,
}

/// Length prefix configuration shared by `Vec`, `Bytes` and `Str`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenSpec {
    /// Maximum number of elements/bytes
    pub max_len: u64,
    /// Unsigned integer type of the prefix
    pub len_type: Atomic,
}

impl Default for LenSpec {
    fn default() -> Self {
        LenSpec {
            max_len: Self::default_max(&Atomic::u32()),
            len_type: Atomic::u32(),
        }
    }
}

impl LenSpec {
    /// Prefix of the given type with the default maximum `2^(8·width)`
    ///
    /// The maximum saturates at `u64::MAX` for 8- and 16-byte prefixes.
    pub fn new(len_type: Atomic) -> Result<Self> {
        if !len_type.kind.is_unsigned() {
            return Err(Error::InvalidLengthType(len_type.to_string()));
        }
        Ok(LenSpec {
            max_len: Self::default_max(&len_type),
            len_type,
        })
    }

    /// Prefix of the given type with an explicit maximum
    pub fn bounded(max_len: u64, len_type: Atomic) -> Result<Self> {
        Ok(LenSpec::new(len_type)?.with_max(max_len))
    }

    /// Replace the maximum (builder pattern)
    pub fn with_max(mut self, max_len: u64) -> Self {
        self.max_len = max_len;
        self
    }

    /// Prefix width in bytes
    pub fn prefix_width(&self) -> u64 {
        self.len_type.width() as u64
    }

    fn default_max(len_type: &Atomic) -> u64 {
        let bits = (len_type.width() * 8) as u32;
        1u64.checked_shl(bits).unwrap_or(u64::MAX)
    }
}

/// Length-prefixed array
#[derive(Debug, Clone)]
pub struct VecSpec {
    /// Element schema
    pub elem: Arc<Schema>,
    /// Prefix configuration
    pub len: LenSpec,
}

/// Fixed-length byte string
#[derive(Debug, Clone, Copy)]
pub struct FixedBytesSpec {
    /// Exact encoded length
    pub len: usize,
}

/// Length-prefixed byte string
#[derive(Debug, Clone, Copy)]
pub struct BytesSpec {
    /// Prefix configuration
    pub len: LenSpec,
}

/// Fixed-length text
#[derive(Debug, Clone, Copy)]
pub struct FixedStrSpec {
    /// Exact encoded length
    pub len: usize,
    /// Pad short text on encode, trim at the first zero byte on decode
    pub autopad: bool,
}

/// Length-prefixed text
#[derive(Debug, Clone, Copy)]
pub struct StrSpec {
    /// Prefix configuration
    pub len: LenSpec,
}

/// Optional value with a 1-byte presence flag
#[derive(Debug, Clone)]
pub struct OptionalSpec {
    /// Schema of the present value
    pub inner: Arc<Schema>,
}

/// Positional aggregate
#[derive(Debug, Clone)]
pub struct TupleSpec {
    /// Element schemas in order
    pub elems: Vec<Schema>,
}

/// Fixed byte slot around any schema
#[derive(Debug, Clone)]
pub struct StaticSpec {
    /// Wrapped schema
    pub inner: Arc<Schema>,
    /// Slot length; `None` uses the inner schema's maximum size
    pub len: Option<u64>,
}

/// Structured default around any schema
#[derive(Debug, Clone)]
pub struct DefaultSpec {
    /// Wrapped schema
    pub inner: Arc<Schema>,
    /// Produces the value used when a structured key is absent
    pub default: DefaultFn,
}

/// User type claimed by a registered converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSpec {
    /// Name converters match on
    pub name: String,
}

/// Shared default-value factory
#[derive(Clone)]
pub struct DefaultFn(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultFn {
    /// Wrap a factory function
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        DefaultFn(Arc::new(f))
    }

    /// Produce a fresh default value
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFn(..)")
    }
}

macro_rules! atomic_schemas {
    ($($name:ident),*) => {
        $(
            #[doc = concat!("Atomic schema, see [`Atomic::", stringify!($name), "`]")]
            pub const fn $name() -> Self {
                Schema::Atomic(Atomic::$name())
            }
        )*
    };
}

impl Schema {
    atomic_schemas!(
        bool, u8, u8_le, u8_be, u16, u16_le, u16_be, u32, u32_le, u32_be, u64, u64_le, u64_be,
        u128, u128_le, u128_be, i8, i8_le, i8_be, i16, i16_le, i16_be, i32, i32_le, i32_be, i64,
        i64_le, i64_be, i128, i128_le, i128_be, f32, f32_le, f32_be, f64, f64_le, f64_be
    );

    /// Fixed-length array of `len` elements
    pub fn array(elem: Schema, len: usize) -> Self {
        Schema::Array(ArraySpec {
            elem: Arc::new(elem),
            len,
        })
    }

    /// Variable array with the default `U32` length prefix
    pub fn vec(elem: Schema) -> Self {
        Schema::vec_with(elem, LenSpec::default())
    }

    /// Variable array with the default prefix and an explicit maximum
    pub fn vec_bounded(elem: Schema, max_len: u64) -> Self {
        Schema::vec_with(elem, LenSpec::default().with_max(max_len))
    }

    /// Variable array with an explicit prefix configuration
    pub fn vec_with(elem: Schema, len: LenSpec) -> Self {
        Schema::Vec(VecSpec {
            elem: Arc::new(elem),
            len,
        })
    }

    /// Fixed-length byte string
    pub fn fixed_bytes(len: usize) -> Self {
        Schema::FixedBytes(FixedBytesSpec { len })
    }

    /// Byte string with the default `U32` length prefix
    pub fn bytes() -> Self {
        Schema::bytes_with(LenSpec::default())
    }

    /// Byte string with an explicit prefix configuration
    pub fn bytes_with(len: LenSpec) -> Self {
        Schema::Bytes(BytesSpec { len })
    }

    /// Fixed-length text, padded and trimmed automatically
    pub fn fixed_str(len: usize) -> Self {
        Schema::FixedStr(FixedStrSpec { len, autopad: true })
    }

    /// Fixed-length text that must fill the slot exactly
    pub fn fixed_str_exact(len: usize) -> Self {
        Schema::FixedStr(FixedStrSpec {
            len,
            autopad: false,
        })
    }

    /// Text with the default `U32` length prefix
    pub fn str() -> Self {
        Schema::str_with(LenSpec::default())
    }

    /// Text with an explicit prefix configuration
    pub fn str_with(len: LenSpec) -> Self {
        Schema::Str(StrSpec { len })
    }

    /// Optional value with a 1-byte presence flag
    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(OptionalSpec {
            inner: Arc::new(inner),
        })
    }

    /// Tuple of the given element schemas
    pub fn tuple(elems: Vec<Schema>) -> Self {
        Schema::Tuple(TupleSpec { elems })
    }

    /// Force `inner` into an `len`-byte slot
    pub fn fixed_slot(inner: Schema, len: u64) -> Self {
        Schema::Static(StaticSpec {
            inner: Arc::new(inner),
            len: Some(len),
        })
    }

    /// Force `inner` into a slot of its own maximum size
    pub fn auto_slot(inner: Schema) -> Self {
        Schema::Static(StaticSpec {
            inner: Arc::new(inner),
            len: None,
        })
    }

    /// Wrap `inner` with a structured default
    pub fn with_default(inner: Schema, default: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Schema::Default(DefaultSpec {
            inner: Arc::new(inner),
            default: DefaultFn::new(default),
        })
    }

    /// Forward reference to a registered schema
    pub fn reference(name: impl Into<String>) -> Self {
        Schema::Ref(TypeRef::new(name))
    }

    /// User type handled by a registered converter
    pub fn custom(name: impl Into<String>) -> Self {
        Schema::Custom(CustomSpec { name: name.into() })
    }

    /// Diagnostic name of this schema
    pub fn type_name(&self) -> String {
        match self {
            Schema::Atomic(a) => a.to_string(),
            Schema::Array(spec) => format!("FixedLenArray[{}, {}]", spec.elem.type_name(), spec.len),
            Schema::Vec(spec) => format!(
                "Vec[{}, length_type={}, max_length={}]",
                spec.elem.type_name(),
                spec.len.len_type,
                spec.len.max_len
            ),
            Schema::FixedBytes(spec) => format!("FixedLenBytes[{}]", spec.len),
            Schema::Bytes(spec) => format!(
                "Bytes[length_type={}, max_length={}]",
                spec.len.len_type, spec.len.max_len
            ),
            Schema::FixedStr(spec) => format!("FixedLenStr[{}]", spec.len),
            Schema::Str(spec) => format!(
                "Str[length_type={}, max_length={}]",
                spec.len.len_type, spec.len.max_len
            ),
            Schema::Optional(spec) => format!("Optional[{}]", spec.inner.type_name()),
            Schema::Tuple(spec) => {
                let names: Vec<String> = spec.elems.iter().map(Schema::type_name).collect();
                format!("Tuple[{}]", names.join(", "))
            }
            Schema::Static(spec) => match spec.len {
                Some(len) => format!("Static[{}, {}]", spec.inner.type_name(), len),
                None => format!("Static[{}, auto]", spec.inner.type_name()),
            },
            Schema::Default(spec) => format!("Default[{}]", spec.inner.type_name()),
            Schema::Struct(def) => def.name().to_string(),
            Schema::Enum(def) => def.name().to_string(),
            Schema::Ref(r) => r.name().to_string(),
            Schema::Custom(spec) => spec.name.clone(),
        }
    }

    /// Visit every forward reference reachable without resolving references
    pub fn visit_refs(&self, f: &mut dyn FnMut(&TypeRef)) {
        match self {
            Schema::Atomic(_)
            | Schema::FixedBytes(_)
            | Schema::Bytes(_)
            | Schema::FixedStr(_)
            | Schema::Str(_)
            | Schema::Custom(_) => {}
            Schema::Array(spec) => spec.elem.visit_refs(f),
            Schema::Vec(spec) => spec.elem.visit_refs(f),
            Schema::Optional(spec) => spec.inner.visit_refs(f),
            Schema::Tuple(spec) => spec.elems.iter().for_each(|s| s.visit_refs(f)),
            Schema::Static(spec) => spec.inner.visit_refs(f),
            Schema::Default(spec) => spec.inner.visit_refs(f),
            Schema::Struct(def) => def.fields().iter().for_each(|field| field.schema.visit_refs(f)),
            Schema::Enum(def) => def
                .variants()
                .iter()
                .filter_map(|v| v.payload.as_ref())
                .for_each(|s| s.visit_refs(f)),
            Schema::Ref(r) => f(r),
        }
    }
}

impl From<Atomic> for Schema {
    fn from(a: Atomic) -> Self {
        Schema::Atomic(a)
    }
}

impl From<StructDef> for Schema {
    fn from(def: StructDef) -> Self {
        Schema::Struct(Arc::new(def))
    }
}

impl From<EnumDef> for Schema {
    fn from(def: EnumDef) -> Self {
        Schema::Enum(Arc::new(def))
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}
