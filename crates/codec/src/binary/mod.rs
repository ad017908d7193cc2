//! Binary codecs
//!
//! [`BinaryCodec`](crate::codec::BinaryCodec) implementations for every
//! built-in schema payload type.
//!
//! ## Module Structure
//!
//! - `atomic`: fixed-width scalars in little, big or native byte order
//! - `composite`: arrays, byte/text strings, optionals, tuples, `Default`
//! - `record`: structs
//! - `tagged`: tagged unions
//! - `slot`: fixed-slot padding shared by `Static` and ZeroCopy layout
//!
//! Size arithmetic is done in `u64` with overflow checks: a declared maximum
//! length such as `2^32` multiplied by a large element quickly leaves `usize`.

pub mod atomic;
pub mod composite;
pub mod record;
pub mod slot;
pub mod tagged;

use podlayout_core::{Error, Result};

pub(crate) fn checked_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(Error::SizeOverflow)
}

pub(crate) fn checked_mul(a: u64, b: u64) -> Result<u64> {
    a.checked_mul(b).ok_or(Error::SizeOverflow)
}

pub(crate) fn to_usize(size: u64) -> Result<usize> {
    usize::try_from(size).map_err(|_| Error::SizeOverflow)
}
