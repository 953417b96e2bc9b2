//! Error types for filter decoding and encoding.
//!
//! The transforms in this crate are total over well-formed input. Errors only
//! arise at the serialization boundary: a tile-target entry with an unknown
//! shape, a filter group that is neither `and` nor `or`, or a URL parameter
//! that does not fit the configured length.
//!
//! # Error Codes
//!
//! Error codes follow a pattern: F{category}{number}
//! - 1xxx: Filter shape errors (tile targets, groups, parameters)
//! - 6xxx: Data errors (serialization)
//!
//! ```rust
//! use dashfilter_core::{ErrorCode, FilterError};
//!
//! let err = FilterError::invalid_tile_target("expected `false` or a field target");
//! assert_eq!(err.code, ErrorCode::InvalidTileTarget);
//! assert_eq!(err.code.code(), "F1001");
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Filter shape errors (1xxx)
    /// Tile-target entry outside the documented shapes (F1001).
    InvalidTileTarget = 1001,
    /// Filter group without exactly one combinator (F1002).
    InvalidFilterGroup = 1002,
    /// Encoded parameter longer than allowed (F1003).
    ParamTooLong = 1003,

    // Data errors (6xxx)
    /// Serialization error (F6002).
    SerializationError = 6002,
    /// Deserialization error (F6003).
    DeserializationError = 6003,
}

impl ErrorCode {
    /// Get the error code string (e.g., "F1001").
    pub fn code(&self) -> String {
        format!("F{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidTileTarget => "Invalid tile target",
            Self::InvalidFilterGroup => "Invalid filter group",
            Self::ParamTooLong => "Filter parameter too long",
            Self::SerializationError => "Serialization error",
            Self::DeserializationError => "Deserialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The rule being processed.
    pub rule_id: Option<String>,
    /// The tile involved.
    pub tile_id: Option<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while decoding or encoding filters.
#[derive(Error, Debug)]
pub struct FilterError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl FilterError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Set the rule id.
    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.context.rule_id = Some(rule_id.into());
        self
    }

    /// Set the tile id.
    pub fn with_tile(mut self, tile_id: impl Into<String>) -> Self {
        self.context.tile_id = Some(tile_id.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create an invalid tile target error.
    pub fn invalid_tile_target(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTileTarget, message).with_help(
            "Tile targets must be a tile id string, `{\"<tile>\": false}` or `{\"<tile>\": <target>}`",
        )
    }

    /// Create an invalid filter group error.
    pub fn invalid_filter_group(id: impl Into<String>, message: impl Into<String>) -> Self {
        let id = id.into();
        Self::new(
            ErrorCode::InvalidFilterGroup,
            format!("Filter group `{}`: {}", id, message.into()),
        )
        .with_help("A filter group has exactly one of `and` or `or`")
    }

    /// Create a parameter too long error.
    pub fn param_too_long(length: usize, max: usize) -> Self {
        Self::new(
            ErrorCode::ParamTooLong,
            format!("Encoded filters are {} bytes, limit is {}", length, max),
        )
        .with_help("Remove filters or raise `codec.max_param_length`")
    }

    /// Create a serialization error.
    pub fn serialization(source: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("Failed to serialize filters: {}", source),
        )
        .with_source(source)
    }

    /// Create a deserialization error.
    pub fn deserialization(source: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::DeserializationError,
            format!("Failed to deserialize filters: {}", source),
        )
        .with_source(source)
    }

    // ============== Error Checks ==============

    /// Check if this error came from reading malformed input.
    pub fn is_decoding(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidTileTarget
                | ErrorCode::InvalidFilterGroup
                | ErrorCode::DeserializationError
        )
    }
}
