//! Wire formats and per-call context
//!
//! ## Formats
//!
//! - `Borsh`: length-prefixed layout, containers take their actual size
//! - `ZeroCopy`: every value occupies its maximum size
//! - `Auto`: decode only; picks ZeroCopy when the input length equals the
//!   schema's ZeroCopy maximum size, Borsh otherwise
//! - `Pass`: reuse the context of an enclosing call
//!
//! ## Auto Detection Is A Heuristic
//!
//! Nothing in the byte stream identifies the format. A Borsh encoding whose
//! length happens to equal the ZeroCopy maximum size is decoded as ZeroCopy.
//! Callers that know the format should say so; callers hit by a misdetection
//! can decode again with an explicit format.
//!
//! ## Context
//!
//! [`Context`] carries the resolved wire format, the auto discriminant type,
//! the native byte order and the recursion budget. It is `Copy` and passed
//! explicitly into every nested codec call.

use podlayout_core::{Atomic, CodecConfig, Endian, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Format requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Length-prefixed dynamic layout
    Borsh,
    /// Fixed maximum-size layout
    ZeroCopy,
    /// Detect from input length (decode only)
    Auto,
    /// Inherit the enclosing call's context
    Pass,
}

/// Resolved wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireFormat {
    /// Length-prefixed dynamic layout
    Borsh,
    /// Fixed maximum-size layout
    ZeroCopy,
}

impl From<WireFormat> for Format {
    fn from(wire: WireFormat) -> Self {
        match wire {
            WireFormat::Borsh => Format::Borsh,
            WireFormat::ZeroCopy => Format::ZeroCopy,
        }
    }
}

/// Resolved settings threaded through one top-level call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    wire: WireFormat,
    native: Endian,
    borsh_tag: Atomic,
    zero_copy_tag: Atomic,
    depth: usize,
    max_depth: usize,
    max_zero_copy_size: u64,
}

impl Context {
    /// Fresh top-level context
    pub fn new(wire: WireFormat, config: &CodecConfig) -> Self {
        Context {
            wire,
            native: config.native_order,
            borsh_tag: config.borsh_tag,
            zero_copy_tag: config.zero_copy_tag,
            depth: 0,
            max_depth: config.max_depth,
            max_zero_copy_size: config.max_zero_copy_size,
        }
    }

    /// Resolved wire format
    pub fn wire(&self) -> WireFormat {
        self.wire
    }

    /// Check if values are laid out at their maximum size
    pub fn is_zero_copy(&self) -> bool {
        self.wire == WireFormat::ZeroCopy
    }

    /// Byte order of `ByteOrder::Native` atomics
    pub fn native(&self) -> Endian {
        self.native
    }

    /// Discriminant type of `TagType::Auto` enums
    pub fn auto_tag(&self) -> Atomic {
        match self.wire {
            WireFormat::Borsh => self.borsh_tag,
            WireFormat::ZeroCopy => self.zero_copy_tag,
        }
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Largest ZeroCopy layout this call may materialise
    pub fn max_zero_copy_size(&self) -> u64 {
        self.max_zero_copy_size
    }

    /// Same settings under another wire format
    pub fn with_wire(mut self, wire: WireFormat) -> Self {
        self.wire = wire;
        self
    }

    /// Context for one level deeper in the schema
    pub fn descend(mut self) -> Result<Self> {
        if self.depth >= self.max_depth {
            return Err(Error::RecursionLimit(self.max_depth));
        }
        self.depth += 1;
        Ok(self)
    }
}

/// Turns a requested [`Format`] into a [`Context`]
#[derive(Debug, Clone, Default)]
pub struct FormatNegotiator {
    config: CodecConfig,
}

impl FormatNegotiator {
    /// Create a negotiator over a configuration
    pub fn new(config: CodecConfig) -> Self {
        FormatNegotiator { config }
    }

    /// Configuration contexts are derived from
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Fresh context for a wire format
    pub fn context(&self, wire: WireFormat) -> Context {
        Context::new(wire, &self.config)
    }

    /// Resolve the format of an encode (or size) call
    pub fn for_encode(&self, format: Format, inherited: Option<Context>) -> Result<Context> {
        match format {
            Format::Borsh => Ok(self.context(WireFormat::Borsh)),
            Format::ZeroCopy => Ok(self.context(WireFormat::ZeroCopy)),
            Format::Pass => inherited.ok_or(Error::FormatNotResolved),
            Format::Auto => Err(Error::AutoFormatOnEncode),
        }
    }

    /// Resolve the format of a decode call
    ///
    /// For `Auto`, `max_size` is evaluated under a ZeroCopy context and
    /// compared with the input length still to be read. A schema whose
    /// maximum size cannot be computed is decoded as Borsh.
    pub fn for_decode(
        &self,
        format: Format,
        remaining: usize,
        inherited: Option<Context>,
        max_size: impl FnOnce(Context) -> Result<u64>,
    ) -> Result<Context> {
        if format != Format::Auto {
            return self.for_encode(format, inherited);
        }

        let zero_copy = self.context(WireFormat::ZeroCopy);
        let detected = match max_size(zero_copy) {
            Ok(max) if max == remaining as u64 => WireFormat::ZeroCopy,
            Ok(_) => WireFormat::Borsh,
            Err(e) => {
                debug!(target: "podlayout::format", error = %e, "Max size unavailable, assuming Borsh");
                WireFormat::Borsh
            }
        };
        debug!(target: "podlayout::format", remaining, wire = ?detected, "Auto-detected wire format");
        Ok(self.context(detected))
    }
}
