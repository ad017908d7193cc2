//! Structured form of tagged unions
//!
//! Without a tag key:
//!
//! ```text
//! "Red"                      unit variant
//! {"Circle": {"r": 2}}       variant with payload
//! ```
//!
//! With tag key `kind`, the payload must render as an object and its fields
//! are merged next to the tag:
//!
//! ```text
//! {"kind": "Red"}
//! {"kind": "Circle", "r": 2}
//! ```
//!
//! In both cases the rendered tag text goes through the enum's name
//! transform, and decoding looks the variant up by that rendered text.

use super::shape_error;
use crate::binary::tagged::checked_variant;
use crate::catalog::Catalog;
use crate::codec::StructuredCodec;
use crate::format::Context;
use podlayout_core::{EnumDef, Error, Result, Value, VariantDef};
use serde_json::{Map, Value as Json};

fn lookup<'d>(def: &'d EnumDef, text: &str) -> Result<&'d VariantDef> {
    def.variant_by_tag_text(text)
        .ok_or_else(|| Error::UnknownVariantName {
            enum_name: def.name().to_string(),
            name: text.to_string(),
        })
}

fn payload_mismatch(def: &EnumDef, variant: &VariantDef) -> Error {
    Error::PayloadMismatch {
        enum_name: def.name().to_string(),
        variant: variant.name.clone(),
        expects_payload: variant.has_payload(),
    }
}

/// Decode a variant's payload from `raw`, or reject input for a unit variant
fn payload_from(
    catalog: &Catalog,
    def: &EnumDef,
    variant: &VariantDef,
    raw: Option<&Json>,
    ctx: Context,
) -> Result<Value> {
    let payload = match (&variant.payload, raw) {
        (Some(schema), Some(json)) => Some(
            catalog
                .from_structured_in(schema, json, ctx)
                .map_err(|e| e.with_frame(&variant.name, def.name()))?,
        ),
        (None, None) | (None, Some(Json::Null)) => None,
        _ => return Err(payload_mismatch(def, variant)),
    };
    Ok(def.instantiate(variant, payload))
}

fn from_untagged(catalog: &Catalog, def: &EnumDef, raw: &Json, ctx: Context) -> Result<Value> {
    match raw {
        Json::String(text) => {
            let variant = lookup(def, text)?;
            payload_from(catalog, def, variant, None, ctx)
        }
        Json::Object(object) if object.len() == 1 => {
            let (text, payload) = object
                .iter()
                .next()
                .ok_or_else(|| shape_error("single-key object", raw))?;
            let variant = lookup(def, text)?;
            payload_from(catalog, def, variant, Some(payload), ctx)
        }
        other => Err(shape_error("variant name or single-key object", other)),
    }
}

fn from_tagged(
    catalog: &Catalog,
    def: &EnumDef,
    tag_key: &str,
    raw: &Json,
    ctx: Context,
) -> Result<Value> {
    let object = match raw {
        Json::Object(object) => object,
        Json::String(text) => {
            let variant = lookup(def, text)?;
            return payload_from(catalog, def, variant, None, ctx);
        }
        other => return Err(shape_error("object", other)),
    };
    let text = object
        .get(tag_key)
        .and_then(Json::as_str)
        .ok_or_else(|| Error::Structured(format!("missing tag key {:?}", tag_key)))?;
    let variant = lookup(def, text)?;
    if !variant.has_payload() {
        return payload_from(catalog, def, variant, None, ctx);
    }
    let rest: Map<String, Json> = object
        .iter()
        .filter(|(key, _)| key.as_str() != tag_key)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    payload_from(catalog, def, variant, Some(&Json::Object(rest)), ctx)
}

impl StructuredCodec for EnumDef {
    fn to_structured(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<Json> {
        let (variant, variant_value) = checked_variant(self, value)?;
        let text = self.tag_text(variant);
        let payload = match (&variant.payload, variant_value.payload()) {
            (Some(schema), Some(payload)) => Some(
                catalog
                    .to_structured_in(schema, payload, ctx)
                    .map_err(|e| e.with_frame(&variant.name, self.name()))?,
            ),
            _ => None,
        };

        match (self.tag_key(), payload) {
            (None, None) => Ok(Json::String(text)),
            (None, Some(payload)) => {
                let mut out = Map::with_capacity(1);
                out.insert(text, payload);
                Ok(Json::Object(out))
            }
            (Some(key), payload) => {
                let mut out = Map::new();
                out.insert(key.to_string(), Json::String(text));
                match payload {
                    None => {}
                    Some(Json::Object(fields)) => {
                        for (name, field) in fields {
                            if name == key {
                                return Err(Error::Structured(format!(
                                    "payload of {}.{} has a field named like tag key {:?}",
                                    self.name(),
                                    variant.name,
                                    key
                                )));
                            }
                            out.insert(name, field);
                        }
                    }
                    Some(_) => {
                        return Err(Error::Structured(format!(
                            "payload of {}.{} must render as an object to merge with tag key {:?}",
                            self.name(),
                            variant.name,
                            key
                        )));
                    }
                }
                Ok(Json::Object(out))
            }
        }
    }

    fn from_structured(&self, catalog: &Catalog, raw: &Json, ctx: Context) -> Result<Value> {
        match self.tag_key() {
            Some(key) => from_tagged(catalog, self, key, raw, ctx),
            None => from_untagged(catalog, self, raw, ctx),
        }
    }
}
