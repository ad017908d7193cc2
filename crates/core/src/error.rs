//! Error types for podlayout
//!
//! This module defines every error raised while defining schemas or while
//! encoding/decoding values. We use `thiserror` for automatic `Display` and
//! `Error` trait implementations.
//!
//! ## Taxonomy
//!
//! - **Definition errors**: raised while building a schema (duplicate
//!   discriminants, duplicate fields, invalid tag types). Fatal, surface at startup.
//! - **Dispatch errors**: no converter claims a schema.
//! - **Bounds/format errors**: length limits, arity, slot overflow, invalid
//!   discriminant/bool/option bytes, truncated input.
//! - **Residual data**: a checked decode left unused bytes behind.
//!
//! Failures inside struct fields and union payloads are wrapped in
//! [`Error::Path`], which accumulates a field/type trail as the error unwinds.

use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;

/// Result type alias for podlayout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for podlayout
#[derive(Debug, Error)]
pub enum Error {
    // ------------------------------------------------------------------
    // Definition errors
    // ------------------------------------------------------------------
    /// Two variants of one enum share a discriminant
    #[error("Repeated discriminant {discriminant} in enum {enum_name} ({first} and {second})")]
    DuplicateDiscriminant {
        /// Enum being defined
        enum_name: String,
        /// The repeated value
        discriminant: i128,
        /// Variant that claimed the value first
        first: String,
        /// Variant that repeated it
        second: String,
    },

    /// Two variants of one enum share a name
    #[error("Repeated variant name {variant} in enum {enum_name}")]
    DuplicateVariant {
        /// Enum being defined
        enum_name: String,
        /// Repeated variant name
        variant: String,
    },

    /// Two fields of one struct share a name
    #[error("Repeated field {field} in struct {struct_name}")]
    DuplicateField {
        /// Struct being defined
        struct_name: String,
        /// Repeated field name
        field: String,
    },

    /// A schema name was registered twice
    #[error("Schema {0} is already registered")]
    DuplicateSchema(String),

    /// An enum was declared without variants
    #[error("Enum {0} declares no variants")]
    EmptyEnum(String),

    /// Enum discriminant type is not an integer atomic
    #[error("Invalid tag type {tag} for enum {enum_name}: discriminants must be integers")]
    InvalidTagType {
        /// Enum being defined
        enum_name: String,
        /// Offending tag type
        tag: String,
    },

    /// A discriminant cannot be represented by the enum's tag type
    #[error("Discriminant {discriminant} of {enum_name}.{variant} does not fit tag type {tag}")]
    DiscriminantOutOfRange {
        /// Enum being defined
        enum_name: String,
        /// Variant carrying the discriminant
        variant: String,
        /// The discriminant value
        discriminant: i128,
        /// Tag type name
        tag: String,
    },

    /// Length prefix type is not an unsigned integer atomic
    #[error("Invalid length type {0}: length prefixes must be unsigned integers")]
    InvalidLengthType(String),

    /// A forward reference names a schema that was never registered
    #[error("Unresolved schema reference: {0}")]
    UnresolvedReference(String),

    /// Codec configuration rejected by validation
    #[error("Invalid codec configuration: {0}")]
    Config(#[from] ConfigError),

    // ------------------------------------------------------------------
    // Dispatch errors
    // ------------------------------------------------------------------
    /// No registered converter or built-in codec handles the schema
    #[error("No converter found for schema {schema}")]
    NoConverterFound {
        /// Diagnostic name of the schema
        schema: String,
    },

    // ------------------------------------------------------------------
    // Bounds / format errors
    // ------------------------------------------------------------------
    /// Variable-length payload longer than its declared maximum
    #[error("Length {len} exceeds declared maximum {max}")]
    LengthExceeded {
        /// Actual length
        len: u64,
        /// Declared maximum
        max: u64,
    },

    /// Fixed-arity container given the wrong number of elements
    #[error("Expected exactly {expected} elements, found {actual}")]
    ArityMismatch {
        /// Declared element count
        expected: usize,
        /// Provided element count
        actual: usize,
    },

    /// A fixed slot was overflowed by its content
    #[error("Encoded content of {size} bytes overflows slot of {slot} bytes")]
    SlotOverflow {
        /// Bytes produced or consumed by the content
        size: u64,
        /// Slot length
        slot: u64,
    },

    /// Discriminant read from the wire matches no variant
    #[error("Unknown discriminant {discriminant} for enum {enum_name}")]
    UnknownDiscriminant {
        /// Enum being decoded
        enum_name: String,
        /// Discriminant read
        discriminant: i128,
    },

    /// Boolean byte other than 0 or 1
    #[error("Invalid boolean byte 0x{0:02x}")]
    InvalidBool(u8),

    /// Optional presence byte other than 0 or 1
    #[error("Invalid optional tag byte 0x{0:02x}")]
    InvalidOptionTag(u8),

    /// Buffer ran out of bytes
    #[error("Unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes requested
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// Size of a dynamic schema requested without a value
    #[error("calc_size without a value is only valid for static schemas, {0} is dynamic")]
    NotStatic(String),

    /// A value does not have the shape the schema requires
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected shape
        expected: String,
        /// Provided shape
        found: String,
    },

    /// Integer cannot be represented by the target kind
    #[error("Integer {value} out of range for {kind}")]
    IntegerOutOfRange {
        /// Target kind
        kind: String,
        /// Offending value (rendered)
        value: String,
    },

    /// Text payload is not valid UTF-8
    #[error("Invalid UTF-8 in text payload")]
    InvalidUtf8,

    /// Size arithmetic overflowed
    #[error("Size computation overflowed")]
    SizeOverflow,

    /// Schema nesting went deeper than the configured limit
    #[error("Schema nesting exceeds maximum depth {0}")]
    RecursionLimit(usize),

    /// A zero-copy layout would exceed the configured size limit
    #[error("Zero-copy layout of {size} bytes exceeds limit of {limit} bytes")]
    ZeroCopyTooLarge {
        /// Layout size
        size: u64,
        /// Configured limit
        limit: u64,
    },

    /// `Format::Pass` used without an inherited context
    #[error("Format PASS requires an already resolved context")]
    FormatNotResolved,

    /// `Format::Auto` used for encoding
    #[error("Format AUTO can only be used for decoding")]
    AutoFormatOnEncode,

    /// Struct field absent from the value or the structured input
    #[error("Missing field {0}")]
    MissingField(String),

    /// Variant name (or rendered tag text) matches no variant
    #[error("No variant named {name} in enum {enum_name}")]
    UnknownVariantName {
        /// Enum being looked up
        enum_name: String,
        /// Name that failed to match
        name: String,
    },

    /// Payload presence disagrees with the variant declaration
    #[error("Variant {enum_name}.{variant} {}", payload_phrase(.expects_payload))]
    PayloadMismatch {
        /// Enum name
        enum_name: String,
        /// Variant name
        variant: String,
        /// Whether the variant declares a payload
        expects_payload: bool,
    },

    /// Structured (JSON-like) input has the wrong shape
    #[error("Invalid structured input: {0}")]
    Structured(String),

    // ------------------------------------------------------------------
    // Residual data
    // ------------------------------------------------------------------
    /// Checked decode left unconsumed bytes
    #[error("Unused bytes in provided raw data: consumed {consumed} of {total}")]
    TrailingBytes {
        /// Bytes consumed by the decode
        consumed: usize,
        /// Total bytes provided
        total: usize,
    },

    // ------------------------------------------------------------------
    // Error path
    // ------------------------------------------------------------------
    /// Failure annotated with the struct/union fields it unwound through
    #[error(transparent)]
    Path(Box<PathError>),
}

impl Error {
    /// Append a `(field, type)` frame to this error.
    ///
    /// An existing path error gains one more frame; any other error is
    /// wrapped exactly once.
    pub fn with_frame(self, field: impl Into<String>, type_name: impl Into<String>) -> Self {
        let frame = PathFrame {
            field: field.into(),
            type_name: type_name.into(),
        };
        match self {
            Error::Path(mut path) => {
                path.frames.push(frame);
                Error::Path(path)
            }
            other => Error::Path(Box::new(PathError {
                frames: vec![frame],
                source: other,
            })),
        }
    }

    /// Frames of the error path, innermost first (empty if unwrapped)
    pub fn path(&self) -> &[PathFrame] {
        match self {
            Error::Path(path) => &path.frames,
            _ => &[],
        }
    }

    /// The original failure beneath any path annotation
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Path(path) => &path.source,
            other => other,
        }
    }

    /// Check if the root cause is a schema definition error
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::DuplicateDiscriminant { .. }
                | Error::DuplicateVariant { .. }
                | Error::DuplicateField { .. }
                | Error::DuplicateSchema(_)
                | Error::EmptyEnum(_)
                | Error::InvalidTagType { .. }
                | Error::DiscriminantOutOfRange { .. }
                | Error::InvalidLengthType(_)
                | Error::UnresolvedReference(_)
                | Error::Config(_)
        )
    }

    /// Shorthand for a [`Error::TypeMismatch`]
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

fn payload_phrase(expects_payload: &bool) -> &'static str {
    if *expects_payload {
        "requires a payload"
    } else {
        "takes no payload"
    }
}

/// One frame of an error path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFrame {
    /// Field (or variant) name
    pub field: String,
    /// Enclosing struct (or enum) name
    pub type_name: String,
}

impl fmt::Display for PathFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field)
    }
}

/// Failure plus the field trail it unwound through
#[derive(Debug)]
pub struct PathError {
    /// Frames, innermost first
    pub frames: Vec<PathFrame>,
    /// Original failure
    pub source: Error,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at ", self.source)?;
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str(" <- ")?;
            }
            write!(f, "{}", frame)?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
