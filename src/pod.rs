//! Plain Rust types with a built-in schema
//!
//! [`Pod`] ties a Rust type to its [`Schema`] and to the dynamic [`Value`]
//! model, and provides pack/unpack/structured helpers that go through
//! [`default_catalog`](crate::default_catalog).
//!
//! | Rust type        | Schema          |
//! |------------------|-----------------|
//! | `bool`           | `Bool`          |
//! | `u8` .. `i128`   | native-order integer of the same width |
//! | `f32`, `f64`     | native-order float |
//! | `String`         | `Str`           |
//! | `Option<T>`      | `Optional[T]`   |
//! | `Vec<T>`         | `Vec[T]`        |
//! | `[T; N]`         | `Array[T, N]`   |
//! | `(A, B)`, `(A, B, C)` | `Tuple`    |

use crate::default_catalog;
use podlayout_codec::{Format, WireFormat};
use podlayout_core::{Error, Result, Schema, Value};
use serde_json::Value as Json;

/// Rust type with a fixed schema
pub trait Pod: Sized {
    /// Schema describing this type
    fn schema() -> Schema;

    /// Convert to the dynamic value model
    fn to_value(&self) -> Value;

    /// Convert from the dynamic value model
    fn from_value(value: Value) -> Result<Self>;

    /// Whether the encoded size never depends on the value
    fn is_static() -> Result<bool> {
        default_catalog().is_static(&Self::schema())
    }

    /// Largest encoded size under `wire`
    fn calc_max_size(wire: WireFormat) -> Result<u64> {
        default_catalog().calc_max_size(&Self::schema(), wire)
    }

    /// Encoded size of this value under `format`
    fn calc_size(&self, format: Format) -> Result<u64> {
        default_catalog().calc_size(&Self::schema(), Some(&self.to_value()), format)
    }

    /// Encode this value
    fn to_bytes(&self, format: Format) -> Result<Vec<u8>> {
        default_catalog().pack(&Self::schema(), &self.to_value(), format)
    }

    /// Decode a value
    fn from_bytes(raw: &[u8], format: Format) -> Result<Self> {
        Self::from_value(default_catalog().unpack(&Self::schema(), raw, format)?)
    }

    /// Render in structured form
    fn to_structured(&self) -> Result<Json> {
        default_catalog().to_structured(&Self::schema(), &self.to_value())
    }

    /// Parse from structured form
    fn from_structured(raw: &Json) -> Result<Self> {
        Self::from_value(default_catalog().from_structured(&Self::schema(), raw)?)
    }
}

impl Pod for bool {
    fn schema() -> Schema {
        Schema::bool()
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::mismatch("Bool", value.type_name()))
    }
}

macro_rules! pod_int {
    ($($t:ty => $schema:ident),* $(,)?) => {
        $(impl Pod for $t {
            fn schema() -> Schema {
                Schema::$schema()
            }

            fn to_value(&self) -> Value {
                Value::from(*self)
            }

            fn from_value(value: Value) -> Result<Self> {
                let out_of_range = || Error::IntegerOutOfRange {
                    kind: stringify!($t).to_string(),
                    value: format!("{:?}", value),
                };
                match &value {
                    Value::UInt(u) => <$t>::try_from(*u).map_err(|_| out_of_range()),
                    Value::Int(i) => <$t>::try_from(*i).map_err(|_| out_of_range()),
                    other => Err(Error::mismatch(stringify!($t), other.type_name())),
                }
            }
        })*
    };
}

pod_int!(
    u8 => u8, u16 => u16, u32 => u32, u64 => u64, u128 => u128,
    i8 => i8, i16 => i16, i32 => i32, i64 => i64, i128 => i128,
);

impl Pod for f32 {
    fn schema() -> Schema {
        Schema::f32()
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| Error::mismatch("f32", value.type_name()))
    }
}

impl Pod for f64 {
    fn schema() -> Schema {
        Schema::f64()
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::mismatch("f64", value.type_name()))
    }
}

impl Pod for String {
    fn schema() -> Schema {
        Schema::str()
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(Error::mismatch("Str", other.type_name())),
        }
    }
}

impl<T: Pod> Pod for Option<T> {
    fn schema() -> Schema {
        Schema::optional(T::schema())
    }

    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|inner| Box::new(inner.to_value())))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => Err(Error::mismatch("Optional", other.type_name())),
        }
    }
}

fn into_elements(value: Value, expected: &str) -> Result<Vec<Value>> {
    match value {
        Value::List(items) | Value::Tuple(items) => Ok(items),
        other => Err(Error::mismatch(expected, other.type_name())),
    }
}

impl<T: Pod> Pod for Vec<T> {
    fn schema() -> Schema {
        Schema::vec(T::schema())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Pod::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        into_elements(value, "List")?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: Pod, const N: usize> Pod for [T; N] {
    fn schema() -> Schema {
        Schema::array(T::schema(), N)
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Pod::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        let items: Vec<T> = into_elements(value, "List")?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<_>>()?;
        let actual = items.len();
        items.try_into().map_err(|_| Error::ArityMismatch {
            expected: N,
            actual,
        })
    }
}

macro_rules! pod_tuple {
    ($len:expr; $($name:ident : $idx:tt),+) => {
        impl<$($name: Pod),+> Pod for ($($name,)+) {
            fn schema() -> Schema {
                Schema::tuple(vec![$($name::schema()),+])
            }

            fn to_value(&self) -> Value {
                Value::Tuple(vec![$(self.$idx.to_value()),+])
            }

            fn from_value(value: Value) -> Result<Self> {
                let items = into_elements(value, "Tuple")?;
                if items.len() != $len {
                    return Err(Error::ArityMismatch {
                        expected: $len,
                        actual: items.len(),
                    });
                }
                let mut items = items.into_iter();
                Ok(($(
                    $name::from_value(items.next().ok_or(Error::ArityMismatch {
                        expected: $len,
                        actual: $idx,
                    })?)?,
                )+))
            }
        }
    };
}

pod_tuple!(2; A: 0, B: 1);
pod_tuple!(3; A: 0, B: 1, C: 2);
