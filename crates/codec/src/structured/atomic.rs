//! Structured form of scalars

use super::shape_error;
use crate::binary::atomic::canonical;
use crate::catalog::Catalog;
use crate::codec::StructuredCodec;
use crate::format::Context;
use podlayout_core::{Atomic, Error, Result, ScalarKind, Value};
use serde_json::{Number, Value as Json};

fn integer_to_json(value: &Value) -> Json {
    match value {
        Value::UInt(u) => match u64::try_from(*u) {
            Ok(small) => Json::from(small),
            Err(_) => Json::String(u.to_string()),
        },
        Value::Int(i) => match i64::try_from(*i) {
            Ok(small) => Json::from(small),
            Err(_) => Json::String(i.to_string()),
        },
        _ => Json::Null,
    }
}

fn integer_from_json(atomic: &Atomic, raw: &Json) -> Result<Value> {
    let parsed = match raw {
        Json::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::UInt(u as u128)
            } else if let Some(i) = n.as_i64() {
                Value::Int(i as i128)
            } else {
                return Err(Error::Structured(format!(
                    "expected integer for {}, found {}",
                    atomic, n
                )));
            }
        }
        Json::String(text) => {
            if let Ok(u) = text.parse::<u128>() {
                Value::UInt(u)
            } else if let Ok(i) = text.parse::<i128>() {
                Value::Int(i)
            } else {
                return Err(Error::Structured(format!(
                    "expected integer for {}, found {:?}",
                    atomic, text
                )));
            }
        }
        other => return Err(shape_error("integer", other)),
    };
    canonical(atomic, &parsed)
}

impl StructuredCodec for Atomic {
    fn to_structured(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<Json> {
        let value = canonical(self, value)?;
        match value {
            Value::Bool(b) => Ok(Json::Bool(b)),
            Value::Float(f) => Number::from_f64(f)
                .map(Json::Number)
                .ok_or_else(|| Error::Structured(format!("{} has no structured form", f))),
            other => Ok(integer_to_json(&other)),
        }
    }

    fn from_structured(&self, _catalog: &Catalog, raw: &Json, _ctx: Context) -> Result<Value> {
        match self.kind {
            ScalarKind::Bool => raw
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| shape_error("bool", raw)),
            kind if kind.is_float() => raw
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| shape_error("number", raw)),
            _ => integer_from_json(self, raw),
        }
    }
}
