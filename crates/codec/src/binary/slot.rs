//! Fixed byte slots
//!
//! A slot holds a value's encoding followed by zero padding up to the slot
//! length. `Static[T, N]` uses an explicit or inferred length and always
//! lays its content out in Borsh shape; ZeroCopy layout puts every dynamic
//! value in a slot of its maximum size.

use super::to_usize;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::catalog::Catalog;
use crate::codec::BinaryCodec;
use crate::format::{Context, WireFormat};
use podlayout_core::{Error, Result, StaticSpec, Value};

/// Run `encode`, then zero-pad its output to exactly `slot` bytes
///
/// Slots longer than `limit` are refused before anything is written.
pub fn encode_padded(
    buf: &mut WriteBuffer,
    slot: u64,
    limit: u64,
    encode: impl FnOnce(&mut WriteBuffer) -> Result<()>,
) -> Result<()> {
    if slot > limit {
        return Err(Error::ZeroCopyTooLarge { size: slot, limit });
    }
    let start = buf.position();
    encode(buf)?;
    let written = (buf.position() - start) as u64;
    if written > slot {
        return Err(Error::SlotOverflow {
            size: written,
            slot,
        });
    }
    buf.write_zeros(to_usize(slot - written)?);
    Ok(())
}

/// Run `decode`, then skip the rest of a `slot`-byte slot
pub fn decode_padded<'a, T>(
    buf: &mut ReadBuffer<'a>,
    slot: u64,
    decode: impl FnOnce(&mut ReadBuffer<'a>) -> Result<T>,
) -> Result<T> {
    let start = buf.position();
    let value = decode(buf)?;
    let consumed = (buf.position() - start) as u64;
    if consumed > slot {
        return Err(Error::SlotOverflow {
            size: consumed,
            slot,
        });
    }
    buf.skip(to_usize(slot - consumed)?)?;
    Ok(value)
}

// Slot content is never padded itself, whatever the outer wire format.
fn content_context(ctx: Context) -> Context {
    ctx.with_wire(WireFormat::Borsh)
}

fn slot_len(spec: &StaticSpec, catalog: &Catalog, ctx: Context) -> Result<u64> {
    match spec.len {
        Some(len) => Ok(len),
        None => catalog.max_size_of(&spec.inner, content_context(ctx)),
    }
}

impl BinaryCodec for StaticSpec {
    fn is_static(&self, _catalog: &Catalog, _ctx: Context) -> Result<bool> {
        Ok(true)
    }

    fn calc_max_size(&self, catalog: &Catalog, ctx: Context) -> Result<u64> {
        slot_len(self, catalog, ctx)
    }

    fn encode(
        &self,
        catalog: &Catalog,
        buf: &mut WriteBuffer,
        value: &Value,
        ctx: Context,
    ) -> Result<()> {
        let slot = slot_len(self, catalog, ctx)?;
        encode_padded(buf, slot, ctx.max_zero_copy_size(), |buf| {
            catalog.encode_value(&self.inner, buf, value, content_context(ctx))
        })
    }

    fn decode(&self, catalog: &Catalog, buf: &mut ReadBuffer<'_>, ctx: Context) -> Result<Value> {
        let slot = slot_len(self, catalog, ctx)?;
        decode_padded(buf, slot, |buf| {
            catalog.decode_value(&self.inner, buf, content_context(ctx))
        })
    }
}
