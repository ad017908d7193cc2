//! Structured form of containers and wrappers

use super::shape_error;
use crate::catalog::Catalog;
use crate::codec::StructuredCodec;
use crate::format::Context;
use podlayout_core::{
    ArraySpec, BytesSpec, DefaultSpec, Error, FixedBytesSpec, FixedStrSpec, OptionalSpec, Result,
    Schema, StaticSpec, StrSpec, TupleSpec, Value, VecSpec,
};
use serde_json::Value as Json;

fn list_to_json(catalog: &Catalog, elem: &Schema, value: &Value, ctx: Context) -> Result<Json> {
    let items = value
        .as_elements()
        .ok_or_else(|| Error::mismatch("List", value.type_name()))?;
    items
        .iter()
        .map(|item| catalog.to_structured_in(elem, item, ctx))
        .collect::<Result<Vec<_>>>()
        .map(Json::Array)
}

fn list_from_json(catalog: &Catalog, elem: &Schema, raw: &Json, ctx: Context) -> Result<Vec<Value>> {
    let items = raw.as_array().ok_or_else(|| shape_error("list", raw))?;
    items
        .iter()
        .map(|item| catalog.from_structured_in(elem, item, ctx))
        .collect()
}

fn bytes_to_json(value: &Value) -> Result<Json> {
    let bytes = value
        .as_bytes()
        .ok_or_else(|| Error::mismatch("Bytes", value.type_name()))?;
    Ok(Json::Array(bytes.iter().map(|&b| Json::from(b)).collect()))
}

fn bytes_from_json(raw: &Json) -> Result<Value> {
    let items = raw
        .as_array()
        .ok_or_else(|| shape_error("list of bytes", raw))?;
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| Error::Structured(format!("expected byte 0-255, found {}", item)))
        })
        .collect::<Result<Vec<u8>>>()
        .map(Value::Bytes)
}

fn text_to_json(value: &Value) -> Result<Json> {
    value
        .as_str()
        .map(Json::from)
        .ok_or_else(|| Error::mismatch("Str", value.type_name()))
}

fn text_from_json(raw: &Json) -> Result<Value> {
    raw.as_str()
        .map(Value::from)
        .ok_or_else(|| shape_error("string", raw))
}

impl StructuredCodec for ArraySpec {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        list_to_json(catalog, &self.elem, value, ctx)
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        let items = list_from_json(catalog, &self.elem, raw, ctx)?;
        if items.len() != self.len {
            return Err(Error::ArityMismatch {
                expected: self.len,
                actual: items.len(),
            });
        }
        Ok(Value::List(items))
    }
}

impl StructuredCodec for VecSpec {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        list_to_json(catalog, &self.elem, value, ctx)
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        list_from_json(catalog, &self.elem, raw, ctx).map(Value::List)
    }
}

impl StructuredCodec for FixedBytesSpec {
    fn to_structured(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<Json> {
        bytes_to_json(value)
    }

    fn from_structured(&self, _catalog: &Catalog, raw: &Json, _ctx: Context) -> Result<Value> {
        bytes_from_json(raw)
    }
}

impl StructuredCodec for BytesSpec {
    fn to_structured(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<Json> {
        bytes_to_json(value)
    }

    fn from_structured(&self, _catalog: &Catalog, raw: &Json, _ctx: Context) -> Result<Value> {
        bytes_from_json(raw)
    }
}

impl StructuredCodec for FixedStrSpec {
    fn to_structured(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<Json> {
        text_to_json(value)
    }

    fn from_structured(&self, _catalog: &Catalog, raw: &Json, _ctx: Context) -> Result<Value> {
        text_from_json(raw)
    }
}

impl StructuredCodec for StrSpec {
    fn to_structured(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<Json> {
        text_to_json(value)
    }

    fn from_structured(&self, _catalog: &Catalog, raw: &Json, _ctx: Context) -> Result<Value> {
        text_from_json(raw)
    }
}

impl StructuredCodec for OptionalSpec {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        match value.as_optional() {
            Some(None) => Ok(Json::Null),
            Some(Some(inner)) => catalog.to_structured_in(&self.inner, inner, ctx),
            None => Err(Error::mismatch("Optional", value.type_name())),
        }
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        if raw.is_null() {
            return Ok(Value::none());
        }
        let inner = catalog.from_structured_in(&self.inner, raw, ctx)?;
        Ok(Value::Optional(Some(Box::new(inner))))
    }
}

impl StructuredCodec for TupleSpec {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        let items = value
            .as_elements()
            .ok_or_else(|| Error::mismatch("Tuple", value.type_name()))?;
        if items.len() != self.elems.len() {
            return Err(Error::ArityMismatch {
                expected: self.elems.len(),
                actual: items.len(),
            });
        }
        self.elems
            .iter()
            .zip(items)
            .map(|(elem, item)| catalog.to_structured_in(elem, item, ctx))
            .collect::<Result<Vec<_>>>()
            .map(Json::Array)
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        let items = raw.as_array().ok_or_else(|| shape_error("list", raw))?;
        if items.len() != self.elems.len() {
            return Err(Error::ArityMismatch {
                expected: self.elems.len(),
                actual: items.len(),
            });
        }
        self.elems
            .iter()
            .zip(items)
            .map(|(elem, item)| catalog.from_structured_in(elem, item, ctx))
            .collect::<Result<Vec<_>>>()
            .map(Value::Tuple)
    }
}

impl StructuredCodec for StaticSpec {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        catalog.to_structured_in(&self.inner, value, ctx)
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        catalog.from_structured_in(&self.inner, raw, ctx)
    }

    fn missing(&self, catalog: &Catalog, ctx: Context) -> Result<Option<Value>> {
        catalog.missing_value(&self.inner, ctx)
    }
}

impl StructuredCodec for DefaultSpec {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        catalog.to_structured_in(&self.inner, value, ctx)
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        catalog.from_structured_in(&self.inner, raw, ctx)
    }

    fn missing(&self, _catalog: &Catalog, _ctx: Context) -> Result<Option<Value>> {
        Ok(Some(self.default.call()))
    }
}
