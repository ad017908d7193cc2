//! Structured (JSON-like) codecs
//!
//! [`StructuredCodec`](crate::codec::StructuredCodec) implementations for
//! every built-in schema payload type. The structured form is a
//! `serde_json::Value`; objects keep insertion order, so struct keys come out
//! in field declaration order.
//!
//! | Schema              | Structured form                                  |
//! |---------------------|--------------------------------------------------|
//! | `Bool`              | `true` / `false`                                 |
//! | integers            | number (128-bit values beyond 64 bits: string)   |
//! | floats              | number (finite only)                             |
//! | bytes               | list of integers 0-255                           |
//! | text                | string                                           |
//! | arrays, tuples      | list                                             |
//! | `Optional[T]`       | `null` or T                                      |
//! | struct              | object, keys renamed by the struct's transform   |
//! | enum                | see [`tagged`]                                   |
//! | `Static`, `Default` | the wrapped schema's form                        |

pub mod atomic;
pub mod composite;
pub mod record;
pub mod tagged;

use podlayout_core::Error;
use serde_json::Value as Json;

/// Short name of a structured value's shape, for error messages
pub(crate) fn shape_of(raw: &Json) -> &'static str {
    match raw {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "object",
    }
}

/// Error for structured input of the wrong shape
pub(crate) fn shape_error(expected: &str, raw: &Json) -> Error {
    Error::Structured(format!("expected {}, found {}", expected, shape_of(raw)))
}
