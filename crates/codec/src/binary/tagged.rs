//! Tagged-union codec
//!
//! Layout: the discriminant in the enum's tag type, then the variant's
//! payload if it declares one. An auto tag type takes its width from the
//! call context.

use super::checked_add;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::catalog::Catalog;
use crate::codec::BinaryCodec;
use crate::format::Context;
use podlayout_core::{Atomic, EnumDef, Error, Result, Value, VariantDef, VariantValue};

fn tag_atomic(def: &EnumDef, ctx: Context) -> Atomic {
    def.tag().resolve(ctx.auto_tag())
}

/// Variant definition of `value`, checked for payload agreement
pub(crate) fn checked_variant<'d, 'v>(
    def: &'d EnumDef,
    value: &'v Value,
) -> Result<(&'d VariantDef, &'v VariantValue)> {
    let variant_value = value
        .as_variant()
        .filter(|v| v.enum_name == def.name())
        .ok_or_else(|| Error::mismatch(def.name(), value.type_name()))?;
    let variant = def
        .variant_by_discriminant(variant_value.discriminant)
        .ok_or_else(|| Error::UnknownDiscriminant {
            enum_name: def.name().to_string(),
            discriminant: variant_value.discriminant,
        })?;
    if variant.has_payload() != variant_value.payload.is_some() {
        return Err(Error::PayloadMismatch {
            enum_name: def.name().to_string(),
            variant: variant.name.clone(),
            expects_payload: variant.has_payload(),
        });
    }
    Ok((variant, variant_value))
}

impl BinaryCodec for EnumDef {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(self.is_unit_only())
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        let mut payload_max = 0u64;
        for variant in self.variants() {
            if let Some(payload) = &variant.payload {
                let size = catalog
                    .max_size_of(payload, ctx)
                    .map_err(|e| e.with_frame(&variant.name, self.name()))?;
                payload_max = payload_max.max(size);
            }
        }
        checked_add(tag_atomic(self, ctx).width() as u64, payload_max)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        let (variant, variant_value) = checked_variant(self, value)?;
        let tag = tag_atomic(self, ctx).width() as u64;
        match (&variant.payload, variant_value.payload()) {
            (Some(schema), Some(payload)) => {
                let size = catalog
                    .size_of_value(schema, payload, ctx)
                    .map_err(|e| e.with_frame(&variant.name, self.name()))?;
                checked_add(tag, size)
            }
            _ => Ok(tag),
        }
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let (variant, variant_value) = checked_variant(self, value)?;
        tag_atomic(self, ctx)
            .encode(catalog, buf, &Value::Int(variant.discriminant), ctx)?;
        if let (Some(schema), Some(payload)) = (&variant.payload, variant_value.payload()) {
            catalog
                .encode_value(schema, buf, payload, ctx)
                .map_err(|e| e.with_frame(&variant.name, self.name()))?;
        }
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let raw = tag_atomic(self, ctx).decode(catalog, buf, ctx)?;
        // Discriminants are i128, so a wider unsigned tag names no variant
        let discriminant = raw.as_i128().ok_or_else(|| Error::IntegerOutOfRange {
            kind: format!("{} discriminant", self.name()),
            value: raw.as_u128().map(|u| u.to_string()).unwrap_or_default(),
        })?;
        let variant = self
            .variant_by_discriminant(discriminant)
            .ok_or_else(|| Error::UnknownDiscriminant {
                enum_name: self.name().to_string(),
                discriminant,
            })?;
        let payload = match &variant.payload {
            Some(schema) => Some(
                catalog
                    .decode_value(schema, buf, ctx)
                    .map_err(|e| e.with_frame(&variant.name, self.name()))?,
            ),
            None => None,
        };
        Ok(self.instantiate(variant, payload))
    }
}
