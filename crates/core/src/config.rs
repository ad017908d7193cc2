//! Codec configuration.
//!
//! This module provides the process-level knobs of the codec engine: the
//! native byte order, the discriminant widths used for auto-tagged enums,
//! and the resource limits applied to every call.

use crate::schema::{Atomic, Endian};

/// Codec configuration parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// Byte order used by atomics declared with `ByteOrder::Native` (default: little).
    pub native_order: Endian,

    /// Discriminant type of auto-tagged enums under Borsh (default: U8).
    pub borsh_tag: Atomic,

    /// Discriminant type of auto-tagged enums under ZeroCopy (default: U64).
    pub zero_copy_tag: Atomic,

    /// Maximum schema nesting depth of a single call (default: 128).
    ///
    /// Self-referential schemas fail with `RecursionLimit` past this depth.
    pub max_depth: usize,

    /// Largest layout a ZeroCopy call may materialise (default: 64MB).
    pub max_zero_copy_size: u64,

    /// Reject trailing bytes in `unpack` (default: false).
    pub checked_decode: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            native_order: Endian::Little,
            borsh_tag: Atomic::u8(),
            zero_copy_tag: Atomic::u64(),
            max_depth: 128,
            max_zero_copy_size: 64 * 1024 * 1024, // 64MB
            checked_decode: false,
        }
    }
}

impl CodecConfig {
    /// Create a new codec configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the native byte order (builder pattern).
    pub fn with_native_order(mut self, order: Endian) -> Self {
        self.native_order = order;
        self
    }

    /// Set the Borsh auto discriminant type (builder pattern).
    pub fn with_borsh_tag(mut self, tag: Atomic) -> Self {
        self.borsh_tag = tag;
        self
    }

    /// Set the ZeroCopy auto discriminant type (builder pattern).
    pub fn with_zero_copy_tag(mut self, tag: Atomic) -> Self {
        self.zero_copy_tag = tag;
        self
    }

    /// Set the maximum nesting depth (builder pattern).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the ZeroCopy size limit (builder pattern).
    pub fn with_max_zero_copy_size(mut self, bytes: u64) -> Self {
        self.max_zero_copy_size = bytes;
        self
    }

    /// Enable or disable strict consumption in `unpack` (builder pattern).
    pub fn with_checked_decode(mut self, checked: bool) -> Self {
        self.checked_decode = checked;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tag in [self.borsh_tag, self.zero_copy_tag] {
            if !tag.kind.is_unsigned() {
                return Err(ConfigError::InvalidTagType(tag.to_string()));
            }
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_zero_copy_size == 0 {
            return Err(ConfigError::ZeroCopyLimitZero);
        }
        Ok(())
    }

    /// Create a configuration for tests (shallow depth, small ZeroCopy limit).
    pub fn for_testing() -> Self {
        CodecConfig {
            max_depth: 32,
            max_zero_copy_size: 1024 * 1024, // 1MB
            ..Self::default()
        }
    }
}

/// Codec configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Auto discriminant type is not an unsigned integer.
    #[error("Auto tag type {0} must be an unsigned integer")]
    InvalidTagType(String),

    /// Maximum depth is zero.
    #[error("Maximum nesting depth must be at least 1")]
    ZeroDepth,

    /// ZeroCopy size limit is zero.
    #[error("ZeroCopy size limit must be at least 1 byte")]
    ZeroCopyLimitZero,
}
