//! Fixed-width scalar codec
//!
//! Booleans are one byte (0 or 1). Integers are two's complement, floats
//! IEEE-754, both in the atomic's byte order with `Native` resolved through
//! the call context.
//!
//! Encoding accepts `Value::Int` or `Value::UInt` for any integer kind as
//! long as the value is in range; decoding produces `UInt` for unsigned
//! kinds and `Int` for signed kinds.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::catalog::Catalog;
use crate::codec::BinaryCodec;
use crate::format::Context;
use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use podlayout_core::{Atomic, Endian, Error, Result, ScalarKind, Value};

macro_rules! put {
    ($endian:expr, $method:ident, $out:expr, $value:expr) => {
        match $endian {
            Endian::Little => LittleEndian::$method($out, $value),
            Endian::Big => BigEndian::$method($out, $value),
        }
    };
}

macro_rules! get {
    ($endian:expr, $method:ident, $bytes:expr) => {
        match $endian {
            Endian::Little => LittleEndian::$method($bytes),
            Endian::Big => BigEndian::$method($bytes),
        }
    };
}

/// Unsigned integer `value` checked against the range of `atomic`
pub(crate) fn unsigned_of(atomic: &Atomic, value: &Value) -> Result<u128> {
    let out_of_range = || Error::IntegerOutOfRange {
        kind: atomic.to_string(),
        value: render(value),
    };
    let raw = match value {
        Value::UInt(u) => *u,
        Value::Int(i) => u128::try_from(*i).map_err(|_| out_of_range())?,
        other => return Err(Error::mismatch(atomic.to_string(), other.type_name())),
    };
    match atomic.kind.int_range() {
        Some((_, max)) if raw <= max => Ok(raw),
        _ => Err(out_of_range()),
    }
}

/// Signed integer `value` checked against the range of `atomic`
pub(crate) fn signed_of(atomic: &Atomic, value: &Value) -> Result<i128> {
    let out_of_range = || Error::IntegerOutOfRange {
        kind: atomic.to_string(),
        value: render(value),
    };
    let raw = match value {
        Value::Int(i) => *i,
        Value::UInt(u) => i128::try_from(*u).map_err(|_| out_of_range())?,
        other => return Err(Error::mismatch(atomic.to_string(), other.type_name())),
    };
    if atomic.fits(raw) {
        Ok(raw)
    } else {
        Err(out_of_range())
    }
}

/// Float `value`; integers are converted
pub(crate) fn float_of(atomic: &Atomic, value: &Value) -> Result<f64> {
    match value {
        Value::Float(f) => Ok(*f),
        Value::Int(i) => Ok(*i as f64),
        Value::UInt(u) => Ok(*u as f64),
        other => Err(Error::mismatch(atomic.to_string(), other.type_name())),
    }
}

/// Canonical form of `value` for `atomic`
pub(crate) fn canonical(atomic: &Atomic, value: &Value) -> Result<Value> {
    let kind = atomic.kind;
    if kind == ScalarKind::Bool {
        return value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| Error::mismatch("Bool", value.type_name()));
    }
    if kind.is_float() {
        return float_of(atomic, value).map(Value::Float);
    }
    if kind.is_signed() {
        return signed_of(atomic, value).map(Value::Int);
    }
    unsigned_of(atomic, value).map(Value::UInt)
}

fn render(value: &Value) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        other => format!("{:?}", other),
    }
}

impl BinaryCodec for Atomic {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(true)
    }

    fn calc_max_size(&self, _catalog: &Catalog, _ctx: Context) -> Result<u64> {
        Ok(self.width() as u64)
    }

    fn encode(
        &self,
        _catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let endian = self.order.resolve(ctx.native());
        let mut scratch = [0u8; 16];
        let out = &mut scratch[..self.width()];
        match self.kind {
            ScalarKind::Bool => {
                let b = value
                    .as_bool()
                    .ok_or_else(|| Error::mismatch("Bool", value.type_name()))?;
                out[0] = u8::from(b);
            }
            ScalarKind::U8 => out[0] = unsigned_of(self, value)? as u8,
            ScalarKind::I8 => out[0] = signed_of(self, value)? as i8 as u8,
            ScalarKind::U16 => put!(endian, write_u16, out, unsigned_of(self, value)? as u16),
            ScalarKind::U32 => put!(endian, write_u32, out, unsigned_of(self, value)? as u32),
            ScalarKind::U64 => put!(endian, write_u64, out, unsigned_of(self, value)? as u64),
            ScalarKind::U128 => put!(endian, write_u128, out, unsigned_of(self, value)?),
            ScalarKind::I16 => put!(endian, write_i16, out, signed_of(self, value)? as i16),
            ScalarKind::I32 => put!(endian, write_i32, out, signed_of(self, value)? as i32),
            ScalarKind::I64 => put!(endian, write_i64, out, signed_of(self, value)? as i64),
            ScalarKind::I128 => put!(endian, write_i128, out, signed_of(self, value)?),
            ScalarKind::F32 => put!(endian, write_f32, out, float_of(self, value)? as f32),
            ScalarKind::F64 => put!(endian, write_f64, out, float_of(self, value)?),
        }
        buf.write(out);
        Ok(())
    }

    fn decode(&self, _catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let endian = self.order.resolve(ctx.native());
        let bytes = buf.read(self.width())?;
        let value = match self.kind {
            ScalarKind::Bool => match bytes[0] {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                other => return Err(Error::InvalidBool(other)),
            },
            ScalarKind::U8 => Value::UInt(bytes[0] as u128),
            ScalarKind::I8 => Value::Int(bytes[0] as i8 as i128),
            ScalarKind::U16 => Value::UInt(get!(endian, read_u16, bytes) as u128),
            ScalarKind::U32 => Value::UInt(get!(endian, read_u32, bytes) as u128),
            ScalarKind::U64 => Value::UInt(get!(endian, read_u64, bytes) as u128),
            ScalarKind::U128 => Value::UInt(get!(endian, read_u128, bytes)),
            ScalarKind::I16 => Value::Int(get!(endian, read_i16, bytes) as i128),
            ScalarKind::I32 => Value::Int(get!(endian, read_i32, bytes) as i128),
            ScalarKind::I64 => Value::Int(get!(endian, read_i64, bytes) as i128),
            ScalarKind::I128 => Value::Int(get!(endian, read_i128, bytes)),
            ScalarKind::F32 => Value::Float(get!(endian, read_f32, bytes) as f64),
            ScalarKind::F64 => Value::Float(get!(endian, read_f64, bytes)),
        };
        Ok(value)
    }
}
