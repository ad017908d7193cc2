//! Dynamic values carried through the codecs
//!
//! This module defines:
//! - Value: the unified enum every codec encodes from and decodes into
//! - Record: an ordered struct value
//! - VariantValue: a tagged-union value (discriminant plus optional payload)
//!
//! ## Canonical Forms
//!
//! Decoders always produce canonical values:
//! - unsigned integer kinds decode to `UInt`, signed kinds to `Int`
//! - floats decode to `Float`
//! - fixed and variable arrays decode to `List`, tuples to `Tuple`
//!
//! Encoders are lenient about integers: either `Int` or `UInt` is accepted
//! for any integer kind as long as the value is in range.
//!
//! ## Union Equality
//!
//! Two `VariantValue`s are equal when they belong to the same enum, carry the
//! same discriminant, and carry equal payloads. The variant name is derived
//! data and takes no part in the comparison.

use std::fmt;

/// Value of any schema type
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Signed integer (any width up to 128 bits)
    Int(i128),
    /// Unsigned integer (any width up to 128 bits)
    UInt(u128),
    /// Floating point (IEEE-754)
    Float(f64),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// UTF-8 text
    Str(String),
    /// Fixed or variable array
    List(Vec<Value>),
    /// Fixed-arity tuple
    Tuple(Vec<Value>),
    /// Optional value
    Optional(Option<Box<Value>>),
    /// Struct value
    Record(Record),
    /// Tagged-union value
    Variant(VariantValue),
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::UInt(_) => "UInt",
            Value::Float(_) => "Float",
            Value::Bytes(_) => "Bytes",
            Value::Str(_) => "Str",
            Value::List(_) => "List",
            Value::Tuple(_) => "Tuple",
            Value::Optional(_) => "Optional",
            Value::Record(_) => "Record",
            Value::Variant(_) => "Variant",
        }
    }

    /// Absent optional
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// Present optional
    pub fn some(value: impl Into<Value>) -> Self {
        Value::Optional(Some(Box::new(value.into())))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i128 if this is an integer representable as i128
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => i128::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Get as u128 if this is a non-negative integer
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Value::UInt(u) => Some(*u),
            Value::Int(i) => u128::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Get as u64 if this is a non-negative integer that fits
    pub fn as_u64(&self) -> Option<u64> {
        self.as_u128().and_then(|u| u64::try_from(u).ok())
    }

    /// Get as f64 if this is a Float value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as &str if this is a Str value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get elements if this is a List or Tuple value
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Get the inner option if this is an Optional value
    pub fn as_optional(&self) -> Option<Option<&Value>> {
        match self {
            Value::Optional(inner) => Some(inner.as_deref()),
            _ => None,
        }
    }

    /// Get as &Record if this is a Record value
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get as &VariantValue if this is a Variant value
    pub fn as_variant(&self) -> Option<&VariantValue> {
        match self {
            Value::Variant(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(v as u128)
            }
        })*
    };
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i128)
            }
        })*
    };
}

from_unsigned!(u8, u16, u32, u64, u128, usize);
from_signed!(i8, i16, i32, i64, i128, isize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<VariantValue> for Value {
    fn from(v: VariantValue) -> Self {
        Value::Variant(v)
    }
}

// ============================================================================
// Record
// ============================================================================

/// Struct value: field values in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Name of the struct schema this value belongs to
    pub type_name: String,
    /// Field name/value pairs
    pub fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record for a struct type
    pub fn new(type_name: impl Into<String>) -> Self {
        Record {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field (builder pattern)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing an existing value of the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// VariantValue
// ============================================================================

/// Tagged-union value
#[derive(Debug, Clone)]
pub struct VariantValue {
    /// Name of the enum schema
    pub enum_name: String,
    /// Variant name
    pub name: String,
    /// Discriminant
    pub discriminant: i128,
    /// Payload, present iff the variant declares one
    pub payload: Option<Box<Value>>,
}

impl VariantValue {
    /// Check if two values are the same variant of the same enum,
    /// ignoring payloads
    pub fn is_a(&self, other: &VariantValue) -> bool {
        self.enum_name == other.enum_name && self.discriminant == other.discriminant
    }

    /// Payload, if any
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_deref()
    }
}

impl PartialEq for VariantValue {
    fn eq(&self, other: &Self) -> bool {
        self.is_a(other) && self.payload == other.payload
    }
}

impl fmt::Display for VariantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            None => write!(f, "{}.{}", self.enum_name, self.name),
            Some(payload) => write!(f, "{}.{}({:?})", self.enum_name, self.name, payload),
        }
    }
}
