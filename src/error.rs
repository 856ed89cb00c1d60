//! Error types for shardkey
//!
//! Provides a unified error type for all encode/decode operations.

use thiserror::Error;

use crate::types::KeyDataType;

/// Result type alias using ShardKeyError
pub type Result<T> = std::result::Result<T, ShardKeyError>;

/// Unified error type for shardkey operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShardKeyError {
    // -------------------------------------------------------------------------
    // Type Errors
    // -------------------------------------------------------------------------
    /// A component has no type tag (maps to `Undefined`)
    #[error("Unsupported type for component {component}: {type_name}")]
    UnsupportedType {
        /// 1-based component position
        component: usize,
        /// Name of the offending type
        type_name: &'static str,
    },

    #[error("Unknown type tag: {0}")]
    UnknownTypeTag(u8),

    // -------------------------------------------------------------------------
    // Metadata Errors
    // -------------------------------------------------------------------------
    /// Saved metadata disagrees with the statically expected component types
    #[error("Type mismatch on component {component}: expected {expected}, found {found}")]
    MetadataMismatch {
        /// 1-based component position
        component: usize,
        /// Type the reader expected at this position
        expected: KeyDataType,
        /// Type recorded in the payload
        found: KeyDataType,
    },

    #[error("Metadata length mismatch: expected {expected} bytes, found {found}")]
    MetadataLength { expected: usize, found: usize },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Truncated input reading {context}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("Value too large: {len} bytes (max {max})")]
    OversizeValue { len: usize, max: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Invalid control byte: 0x{0:02x}")]
    InvalidControlByte(u8),

    #[error("Invalid origin: expected '{expected}', found '{found}'")]
    InvalidOrigin { expected: char, found: char },

    #[error("{0} trailing bytes after last component")]
    TrailingBytes(usize),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("UTF8 envelope error: {0}")]
    Envelope(String),

    #[error("External string error: {0}")]
    ExternalString(String),
}

impl ShardKeyError {
    /// Stable reason code for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ShardKeyError::UnsupportedType { .. } => "unsupported_type",
            ShardKeyError::UnknownTypeTag(_) => "unknown_type_tag",
            ShardKeyError::MetadataMismatch { .. } => "metadata_mismatch",
            ShardKeyError::MetadataLength { .. } => "metadata_length",
            ShardKeyError::TruncatedInput { .. } => "truncated_input",
            ShardKeyError::OversizeValue { .. } => "oversize_value",
            ShardKeyError::InvalidValue(_) => "invalid_value",
            ShardKeyError::InvalidControlByte(_) => "invalid_control_byte",
            ShardKeyError::InvalidOrigin { .. } => "invalid_origin",
            ShardKeyError::TrailingBytes(_) => "trailing_bytes",
            ShardKeyError::Envelope(_) => "envelope",
            ShardKeyError::ExternalString(_) => "external_string",
        }
    }

    /// Shorthand for a truncation error
    pub(crate) fn truncated(context: &'static str, needed: usize, remaining: usize) -> Self {
        ShardKeyError::TruncatedInput {
            context,
            needed,
            remaining,
        }
    }
}
