//! # dashfilter-config
//!
//! Configuration for dashfilter, read from `dashfilter.toml`.
//!
//! This crate provides:
//! - The codec settings used for shareable dashboard URLs
//! - Logging settings
//! - Per-environment overrides and `${ENV_VAR}` interpolation
//!
//! ## Example
//!
//! ```rust
//! use dashfilter_config::FiltersConfig;
//!
//! let config = FiltersConfig::from_str(r#"
//!     [codec]
//!     param_name = "f"
//!     max_param_length = 4000
//!
//!     [logging]
//!     level = "debug"
//! "#).unwrap();
//!
//! assert_eq!(config.codec.param_name, "f");
//! assert_eq!(config.logging.level, "debug");
//! ```

pub mod config;
pub mod error;

pub use config::{CodecConfig, EnvironmentOverride, FiltersConfig, LoggingConfig};
pub use error::{ConfigError, ConfigResult};
