//! Struct codec
//!
//! Fields are encoded back to back in declaration order. Any failure inside
//! a field gains a `(field, struct)` frame on its way out.

use super::checked_add;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::catalog::Catalog;
use crate::codec::BinaryCodec;
use crate::format::Context;
use podlayout_core::{Error, Field, Record, Result, StructDef, Value};

fn record_of<'v>(def: &StructDef, value: &'v Value) -> Result<&'v Record> {
    value
        .as_record()
        .ok_or_else(|| Error::mismatch(def.name(), value.type_name()))
}

fn field_value<'v>(def: &StructDef, record: &'v Record, field: &Field) -> Result<&'v Value> {
    record
        .get(&field.name)
        .ok_or_else(|| Error::MissingField(field.name.clone()).with_frame(&field.name, def.name()))
}

impl BinaryCodec for StructDef {
    fn is_static(&self, catalog: &Catalog, ctx: Context) -> Result<bool> {
        for field in self.fields() {
            let is_static = catalog
                .is_static_in(&field.schema, ctx)
                .map_err(|e| e.with_frame(&field.name, self.name()))?;
            if !is_static {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        let mut total = 0u64;
        for field in self.fields() {
            let size = catalog
                .max_size_of(&field.schema, ctx)
                .map_err(|e| e.with_frame(&field.name, self.name()))?;
            total = checked_add(total, size)?;
        }
        Ok(total)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        let record = record_of(self, value)?;
        let mut total = 0u64;
        for field in self.fields() {
            let item = field_value(self, record, field)?;
            let size = catalog
                .size_of_value(&field.schema, item, ctx)
                .map_err(|e| e.with_frame(&field.name, self.name()))?;
            total = checked_add(total, size)?;
        }
        Ok(total)
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let record = record_of(self, value)?;
        for field in self.fields() {
            let item = field_value(self, record, field)?;
            catalog
                .encode_value(&field.schema, buf, item, ctx)
                .map_err(|e| e.with_frame(&field.name, self.name()))?;
        }
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let mut record = self.record();
        for field in self.fields() {
            let item = catalog
                .decode_value(&field.schema, buf, ctx)
                .map_err(|e| e.with_frame(&field.name, self.name()))?;
            record.fields.push((field.name.clone(), item));
        }
        Ok(Value::Record(record))
    }
}
