//! Error types for configuration loading.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(dashfilter::config::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(dashfilter::config::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// A setting holds a value outside its allowed range.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(dashfilter::config::invalid_value))]
    InvalidValue { key: String, message: String },

    /// An override names an environment that is not defined.
    #[error("unknown environment `{name}`")]
    #[diagnostic(
        code(dashfilter::config::unknown_environment),
        help("define it under [environments.{name}]")
    )]
    UnknownEnvironment { name: String },
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
