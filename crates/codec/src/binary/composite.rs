//! Container codecs: arrays, byte/text strings, optionals, tuples, `Default`
//!
//! ## Layouts
//!
//! | Schema            | Encoding                                     |
//! |-------------------|----------------------------------------------|
//! | `Array[T, N]`     | N encodings of T, no prefix                  |
//! | `Vec[T]`          | length prefix, then that many encodings of T |
//! | `FixedBytes[N]`   | N bytes, zero-padded                         |
//! | `Bytes`           | length prefix, then the bytes                |
//! | `FixedStr[N]`     | N bytes of UTF-8, zero-padded                |
//! | `Str`             | length prefix, then the UTF-8 bytes          |
//! | `Optional[T]`     | 0x00, or 0x01 followed by T                  |
//! | `Tuple[T1..Tn]`   | each Ti in order                             |
//!
//! Length prefixes are checked against the declared maximum before any
//! payload byte is read.

use super::{checked_add, checked_mul, to_usize};
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::catalog::Catalog;
use crate::codec::BinaryCodec;
use crate::format::Context;
use podlayout_core::{
    ArraySpec, BytesSpec, DefaultSpec, Error, FixedBytesSpec, FixedStrSpec, LenSpec,
    OptionalSpec, Result, StrSpec, TupleSpec, Value, VecSpec,
};

// ============================================================================
// Length prefixes
// ============================================================================

/// Write a length prefix after checking it against the declared maximum
pub(crate) fn write_len(
    catalog: &Catalog,
    buf: &mut WriteBuffer,
    spec: &LenSpec,
    len: usize,
    ctx: Context,
) -> Result<()> {
    let len = len as u64;
    if len > spec.max_len {
        return Err(Error::LengthExceeded {
            len,
            max: spec.max_len,
        });
    }
    spec.len_type.encode(catalog, buf, &Value::UInt(len as u128), ctx)
}

/// Read a length prefix and check it against the declared maximum
pub(crate) fn read_len(
    catalog: &Catalog,
    buf: &mut ReadBuffer<'_>,
    spec: &LenSpec,
    ctx: Context,
) -> Result<usize> {
    let raw = spec
        .len_type
        .decode(catalog, buf, ctx)?
        .as_u128()
        .unwrap_or(u128::MAX);
    let len = u64::try_from(raw).unwrap_or(u64::MAX);
    if len > spec.max_len {
        return Err(Error::LengthExceeded {
            len,
            max: spec.max_len,
        });
    }
    to_usize(len)
}

fn prefixed_max(spec: &LenSpec, elem_max: u64) -> Result<u64> {
    checked_add(spec.prefix_width(), checked_mul(spec.max_len, elem_max)?)
}

fn elements<'v>(value: &'v Value, expected: &str) -> Result<&'v [Value]> {
    value
        .as_elements()
        .ok_or_else(|| Error::mismatch(expected, value.type_name()))
}

fn bytes_of<'v>(value: &'v Value) -> Result<&'v [u8]> {
    value
        .as_bytes()
        .ok_or_else(|| Error::mismatch("Bytes", value.type_name()))
}

fn text_of(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| Error::mismatch("Str", value.type_name()))
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| Error::InvalidUtf8)
}

// ============================================================================
// Array
// ============================================================================

impl BinaryCodec for ArraySpec {
    fn is_static(&self, catalog: &Catalog, ctx: Context) -> Result<bool> {
        catalog.is_static_in(&self.elem, ctx)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        checked_mul(self.len as u64, catalog.max_size_of(&self.elem, ctx)?)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        let items = elements(value, "List")?;
        let mut total = 0u64;
        for item in items {
            total = checked_add(total, catalog.size_of_value(&self.elem, item, ctx)?)?;
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
        let items = elements(value, "List")?;
        if items.len() != self.len {
            return Err(Error::ArityMismatch {
                expected: self.len,
                actual: items.len(),
            });
        }
        for item in items {
            catalog.encode_value(&self.elem, buf, item, ctx)?;
        }
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let mut items = Vec::with_capacity(self.len.min(buf.remaining()));
        for _ in 0..self.len {
            items.push(catalog.decode_value(&self.elem, buf, ctx)?);
        }
        Ok(Value::List(items))
    }
}

// ============================================================================
// Vec
// ============================================================================

impl BinaryCodec for VecSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(false)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        prefixed_max(&self.len, catalog.max_size_of(&self.elem, ctx)?)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        let items = elements(value, "List")?;
        let mut total = self.len.prefix_width();
        for item in items {
            total = checked_add(total, catalog.size_of_value(&self.elem, item, ctx)?)?;
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
        let items = elements(value, "List")?;
        write_len(catalog, buf, &self.len, items.len(), ctx)?;
        for item in items {
            catalog.encode_value(&self.elem, buf, item, ctx)?;
        }
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let len = read_len(catalog, buf, &self.len, ctx)?;
        let mut items = Vec::with_capacity(len.min(buf.remaining()));
        for _ in 0..len {
            items.push(catalog.decode_value(&self.elem, buf, ctx)?);
        }
        Ok(Value::List(items))
    }
}

// ============================================================================
// Byte and text strings
// ============================================================================

impl BinaryCodec for FixedBytesSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(true)
    }

    fn calc_max_size(&self, _catalog: &Catalog, _ctx: Context) -> Result<u64> {
        Ok(self.len as u64)
    }

    fn encode(
        &self,
        _catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        _ctx: Context,
    ) -> Result<()> {
        let bytes = bytes_of(value)?;
        if bytes.len() > self.len {
            return Err(Error::LengthExceeded {
                len: bytes.len() as u64,
                max: self.len as u64,
            });
        }
        buf.write(bytes);
        buf.write_zeros(self.len - bytes.len());
        Ok(())
    }

    fn decode(&self, _catalog: &Catalog, buf: &mut ReadBuffer<'_>, _ctx: Context) -> Result<Value> {
        Ok(Value::Bytes(buf.read(self.len)?.to_vec()))
    }
}

impl BinaryCodec for BytesSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(false)
    }

    fn calc_max_size(&self, _catalog: &Catalog, _ctx: Context) -> Result<u64> {
        prefixed_max(&self.len, 1)
    }

    fn calc_size(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<u64> {
        checked_add(self.len.prefix_width(), bytes_of(value)?.len() as u64)
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let bytes = bytes_of(value)?;
        write_len(catalog, buf, &self.len, bytes.len(), ctx)?;
        buf.write(bytes);
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let len = read_len(catalog, buf, &self.len, ctx)?;
        Ok(Value::Bytes(buf.read(len)?.to_vec()))
    }
}

impl BinaryCodec for FixedStrSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(true)
    }

    fn calc_max_size(&self, _catalog: &Catalog, _ctx: Context) -> Result<u64> {
        Ok(self.len as u64)
    }

    fn encode(
        &self,
        _catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        _ctx: Context,
    ) -> Result<()> {
        let text = text_of(value)?.as_bytes();
        if text.len() > self.len {
            return Err(Error::LengthExceeded {
                len: text.len() as u64,
                max: self.len as u64,
            });
        }
        if !self.autopad && text.len() != self.len {
            return Err(Error::ArityMismatch {
                expected: self.len,
                actual: text.len(),
            });
        }
        buf.write(text);
        buf.write_zeros(self.len - text.len());
        Ok(())
    }

    fn decode(&self, _catalog: &Catalog, buf: &mut ReadBuffer<'_>, _ctx: Context) -> Result<Value> {
        let raw = buf.read(self.len)?;
        let raw = if self.autopad {
            let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
            &raw[..end]
        } else {
            raw
        };
        utf8(raw).map(Value::Str)
    }
}

impl BinaryCodec for StrSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(false)
    }

    fn calc_max_size(&self, _catalog: &Catalog, _ctx: Context) -> Result<u64> {
        prefixed_max(&self.len, 1)
    }

    fn calc_size(&self, _catalog: &Catalog, value: &Value, _ctx: Context) -> Result<u64> {
        checked_add(self.len.prefix_width(), text_of(value)?.len() as u64)
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let text = text_of(value)?;
        write_len(catalog, buf, &self.len, text.len(), ctx)?;
        buf.write(text.as_bytes());
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let len = read_len(catalog, buf, &self.len, ctx)?;
        utf8(buf.read(len)?).map(Value::Str)
    }
}

// ============================================================================
// Optional
// ============================================================================

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

fn optional_of(value: &Value) -> Result<Option<&Value>> {
    value
        .as_optional()
        .ok_or_else(|| Error::mismatch("Optional", value.type_name()))
}

impl BinaryCodec for OptionalSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(false)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        checked_add(1, catalog.max_size_of(&self.inner, ctx)?)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        match optional_of(value)? {
            None => Ok(1),
            Some(inner) => checked_add(1, catalog.size_of_value(&self.inner, inner, ctx)?),
        }
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        match optional_of(value)? {
            None => {
                buf.write_byte(ABSENT);
                Ok(())
            }
            Some(inner) => {
                buf.write_byte(PRESENT);
                catalog.encode_value(&self.inner, buf, inner, ctx)
            }
        }
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        match buf.read_byte()? {
            ABSENT => Ok(Value::none()),
            PRESENT => {
                let inner = catalog.decode_value(&self.inner, buf, ctx)?;
                Ok(Value::Optional(Some(Box::new(inner))))
            }
            other => Err(Error::InvalidOptionTag(other)),
        }
    }
}

// ============================================================================
// Tuple
// ============================================================================

fn tuple_elements<'v>(spec: &TupleSpec, value: &'v Value) -> Result<&'v [Value]> {
    let items = elements(value, "Tuple")?;
    if items.len() != spec.elems.len() {
        return Err(Error::ArityMismatch {
            expected: spec.elems.len(),
            actual: items.len(),
        });
    }
    Ok(items)
}

impl BinaryCodec for TupleSpec {
    fn is_static(&self, catalog: &Catalog, ctx: Context) -> Result<bool> {
        for elem in &self.elems {
            if !catalog.is_static_in(elem, ctx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        let mut total = 0u64;
        for elem in &self.elems {
            total = checked_add(total, catalog.max_size_of(elem, ctx)?)?;
        }
        Ok(total)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        let items = tuple_elements(self, value)?;
        let mut total = 0u64;
        for (elem, item) in self.elems.iter().zip(items) {
            total = checked_add(total, catalog.size_of_value(elem, item, ctx)?)?;
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
        let items = tuple_elements(self, value)?;
        for (elem, item) in self.elems.iter().zip(items) {
            catalog.encode_value(elem, buf, item, ctx)?;
        }
        Ok(())
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let mut items = Vec::with_capacity(self.elems.len());
        for elem in &self.elems {
            items.push(catalog.decode_value(elem, buf, ctx)?);
        }
        Ok(Value::Tuple(items))
    }
}

// ============================================================================
// Default (binary-transparent)
// ============================================================================

impl BinaryCodec for DefaultSpec {
    fn is_static(&self, catalog: &Catalog, ctx: Context) -> Result<bool> {
        catalog.is_static_in(&self.inner, ctx)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        catalog.max_size_of(&self.inner, ctx)
    }

    fn calc_size(&self, catalog: &Catalog, value: &Value, ctx: Context) -> Result<u64> {
        catalog.size_of_value(&self.inner, value, ctx)
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        catalog.encode_value(&self.inner, buf, value, ctx)
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        catalog.decode_value(&self.inner, buf, ctx)
    }
}
