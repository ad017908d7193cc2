//! Structured form of structs
//!
//! A struct renders as an object with one key per field, in declaration
//! order, each key passed through the struct's name transform. On input,
//! unknown keys are ignored and an absent key falls back to the field's
//! default, then to the field schema's own missing value (`Default[T]`),
//! and fails with `MissingField` otherwise.

use super::shape_error;
use crate::catalog::Catalog;
use crate::codec::StructuredCodec;
use crate::format::Context;
use podlayout_core::{Error, Field, Result, StructDef, Value};
use serde_json::{Map, Value as Json};

fn absent_field(catalog: &Catalog, def: &StructDef, field: &Field, ctx: Context) -> Result<Value> {
    if let Some(default) = &field.default {
        return Ok(default.call());
    }
    match catalog.missing_value(&field.schema, ctx)? {
        Some(value) => Ok(value),
        None => Err(Error::MissingField(def.key_of(field))),
    }
}

impl StructuredCodec for StructDef {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        let record = value
            .as_record()
            .ok_or_else(|| Error::mismatch(self.name(), value.type_name()))?;
        let mut out = Map::with_capacity(self.fields().len());
        for field in self.fields() {
            let item = record.get(&field.name).ok_or_else(|| {
                Error::MissingField(field.name.clone()).with_frame(&field.name, self.name())
            })?;
            let json = catalog
                .to_structured_in(&field.schema, item, ctx)
                .map_err(|e| e.with_frame(&field.name, self.name()))?;
            out.insert(self.key_of(field), json);
        }
        Ok(Json::Object(out))
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        let object = raw.as_object().ok_or_else(|| shape_error("object", raw))?;
        let mut record = self.record();
        for field in self.fields() {
            let item = match object.get(&self.key_of(field)) {
                Some(json) => catalog.from_structured_in(&field.schema, json, ctx),
                None => absent_field(catalog, self, field, ctx),
            }
            .map_err(|e| e.with_frame(&field.name, self.name()))?;
            record.fields.push((field.name.clone(), item));
        }
        Ok(Value::Record(record))
    }
}
