//! Atomic (fixed-width scalar) kinds
//!
//! Every atomic has a byte width, an interpretation (bool, signed, unsigned,
//! float) and a byte order. `ByteOrder::Native` defers to the
//! process-configured default (`CodecConfig::native_order`).
//!
//! Naming follows the wire convention: `U32` uses the native order, `U32l`
//! is little-endian, `U32b` is big-endian.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endian {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl Default for Endian {
    fn default() -> Self {
        Endian::Little
    }
}

/// Byte order declared by a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Always little-endian
    Little,
    /// Always big-endian
    Big,
    /// Whatever the codec configuration names as native
    Native,
}

impl ByteOrder {
    /// Resolve against the configured native order
    pub fn resolve(self, native: Endian) -> Endian {
        match self {
            ByteOrder::Little => Endian::Little,
            ByteOrder::Big => Endian::Big,
            ByteOrder::Native => native,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            ByteOrder::Little => "l",
            ByteOrder::Big => "b",
            ByteOrder::Native => "",
        }
    }
}

/// Interpretation and width of an atomic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// Single byte, 0 or 1
    Bool,
    /// 8-bit unsigned
    U8,
    /// 16-bit unsigned
    U16,
    /// 32-bit unsigned
    U32,
    /// 64-bit unsigned
    U64,
    /// 128-bit unsigned
    U128,
    /// 8-bit signed
    I8,
    /// 16-bit signed
    I16,
    /// 32-bit signed
    I32,
    /// 64-bit signed
    I64,
    /// 128-bit signed
    I128,
    /// IEEE-754 single precision
    F32,
    /// IEEE-754 double precision
    F64,
}

impl ScalarKind {
    /// Encoded width in bytes
    pub fn width(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 => 4,
            ScalarKind::U64 | ScalarKind::I64 | ScalarKind::F64 => 8,
            ScalarKind::U128 | ScalarKind::I128 => 16,
        }
    }

    /// Check if this kind is an integer (signed or unsigned)
    pub fn is_integer(self) -> bool {
        !matches!(self, ScalarKind::Bool | ScalarKind::F32 | ScalarKind::F64)
    }

    /// Check if this kind is a signed integer
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64 | ScalarKind::I128
        )
    }

    /// Check if this kind is an unsigned integer
    pub fn is_unsigned(self) -> bool {
        self.is_integer() && !self.is_signed()
    }

    /// Check if this kind is a float
    pub fn is_float(self) -> bool {
        matches!(self, ScalarKind::F32 | ScalarKind::F64)
    }

    /// Base name without byte-order suffix
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "Bool",
            ScalarKind::U8 => "U8",
            ScalarKind::U16 => "U16",
            ScalarKind::U32 => "U32",
            ScalarKind::U64 => "U64",
            ScalarKind::U128 => "U128",
            ScalarKind::I8 => "I8",
            ScalarKind::I16 => "I16",
            ScalarKind::I32 => "I32",
            ScalarKind::I64 => "I64",
            ScalarKind::I128 => "I128",
            ScalarKind::F32 => "F32",
            ScalarKind::F64 => "F64",
        }
    }

    /// Inclusive integer bounds as `(min, max)`
    ///
    /// Returns `None` for non-integer kinds.
    pub fn int_range(self) -> Option<(i128, u128)> {
        let range = match self {
            ScalarKind::U8 => (0, u8::MAX as u128),
            ScalarKind::U16 => (0, u16::MAX as u128),
            ScalarKind::U32 => (0, u32::MAX as u128),
            ScalarKind::U64 => (0, u64::MAX as u128),
            ScalarKind::U128 => (0, u128::MAX),
            ScalarKind::I8 => (i8::MIN as i128, i8::MAX as u128),
            ScalarKind::I16 => (i16::MIN as i128, i16::MAX as u128),
            ScalarKind::I32 => (i32::MIN as i128, i32::MAX as u128),
            ScalarKind::I64 => (i64::MIN as i128, i64::MAX as u128),
            ScalarKind::I128 => (i128::MIN, i128::MAX as u128),
            ScalarKind::Bool | ScalarKind::F32 | ScalarKind::F64 => return None,
        };
        Some(range)
    }
}

/// A fixed-width scalar schema: kind plus byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atomic {
    /// Interpretation and width
    pub kind: ScalarKind,
    /// Declared byte order
    pub order: ByteOrder,
}

macro_rules! atomic_ctors {
    ($($kind:ident => $native:ident, $le:ident, $be:ident;)*) => {
        $(
            #[doc = concat!("`", stringify!($kind), "` in the native byte order")]
            pub const fn $native() -> Self {
                Atomic::new(ScalarKind::$kind, ByteOrder::Native)
            }

            #[doc = concat!("`", stringify!($kind), "` little-endian")]
            pub const fn $le() -> Self {
                Atomic::new(ScalarKind::$kind, ByteOrder::Little)
            }

            #[doc = concat!("`", stringify!($kind), "` big-endian")]
            pub const fn $be() -> Self {
                Atomic::new(ScalarKind::$kind, ByteOrder::Big)
            }
        )*
    };
}

impl Atomic {
    /// Create an atomic from kind and byte order
    pub const fn new(kind: ScalarKind, order: ByteOrder) -> Self {
        Atomic { kind, order }
    }

    /// Single-byte boolean
    pub const fn bool() -> Self {
        Atomic::new(ScalarKind::Bool, ByteOrder::Native)
    }

    atomic_ctors! {
        U8 => u8, u8_le, u8_be;
        U16 => u16, u16_le, u16_be;
        U32 => u32, u32_le, u32_be;
        U64 => u64, u64_le, u64_be;
        U128 => u128, u128_le, u128_be;
        I8 => i8, i8_le, i8_be;
        I16 => i16, i16_le, i16_be;
        I32 => i32, i32_le, i32_be;
        I64 => i64, i64_le, i64_be;
        I128 => i128, i128_le, i128_be;
        F32 => f32, f32_le, f32_be;
        F64 => f64, f64_le, f64_be;
    }

    /// Encoded width in bytes
    pub fn width(&self) -> usize {
        self.kind.width()
    }

    /// Check if a signed or unsigned value fits this atomic
    ///
    /// Always false for non-integer kinds.
    pub fn fits(&self, value: i128) -> bool {
        match self.kind.int_range() {
            Some((min, max)) => value >= min && (value < 0 || (value as u128) <= max),
            None => false,
        }
    }
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ScalarKind::Bool {
            return f.write_str("Bool");
        }
        write!(f, "{}{}", self.kind.name(), self.order.suffix())
    }
}
