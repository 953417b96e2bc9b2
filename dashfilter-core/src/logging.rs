//! Logging setup for dashfilter.
//!
//! The crate emits `tracing` events: `debug` per dashboard conversion and
//! saved-filter pruning, `trace` for every dropped tile target or rule.
//! Nothing is printed unless a subscriber is installed, either by the host
//! application or by [`init`] / [`init_with`] when the `tracing-subscriber`
//! feature is enabled.
//!
//! # Environment Variables
//!
//! - `DASHFILTER_DEBUG=true|1|yes` - Enable debug logging
//! - `DASHFILTER_LOG_LEVEL=trace|debug|info|warn|error` - Set specific log level
//! - `DASHFILTER_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! ```rust,no_run
//! use dashfilter_core::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check if debug logging is enabled via `DASHFILTER_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("DASHFILTER_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Normalize a level name, falling back to `default` when unknown.
pub fn parse_level(level: &str, default: &'static str) -> &'static str {
    let level = level.to_lowercase();
    LEVELS
        .iter()
        .copied()
        .find(|known| *known == level)
        .unwrap_or(default)
}

/// Normalize a format name; anything unknown is `json`.
pub fn parse_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "pretty" => "pretty",
        "compact" => "compact",
        _ => "json",
    }
}

/// Get the configured log level from `DASHFILTER_LOG_LEVEL`.
///
/// Defaults to "debug" if `DASHFILTER_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let default = if is_debug_enabled() { "debug" } else { "warn" };
    env::var("DASHFILTER_LOG_LEVEL")
        .map(|level| parse_level(&level, default))
        .unwrap_or(default)
}

/// Get the configured log format from `DASHFILTER_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("DASHFILTER_LOG_FORMAT")
        .map(|f| parse_format(&f))
        .unwrap_or("json")
}

/// Apply environment overrides to a level and format taken from a config file.
///
/// `DASHFILTER_LOG_LEVEL` wins over the file level, and `DASHFILTER_DEBUG`
/// raises the file level to `debug`. `DASHFILTER_LOG_FORMAT` wins over the
/// file format.
pub fn resolve_settings(level: &str, format: &str) -> (&'static str, &'static str) {
    resolve_with(
        env::var("DASHFILTER_LOG_LEVEL").ok().as_deref(),
        is_debug_enabled(),
        env::var("DASHFILTER_LOG_FORMAT").ok().as_deref(),
        level,
        format,
    )
}

fn resolve_with(
    env_level: Option<&str>,
    debug: bool,
    env_format: Option<&str>,
    level: &str,
    format: &str,
) -> (&'static str, &'static str) {
    let file_level = if debug { "debug" } else { parse_level(level, "warn") };
    let level = env_level.map_or(file_level, |env_level| parse_level(env_level, file_level));
    let format = parse_format(env_format.unwrap_or(format));
    (level, format)
}

/// Initialize logging from the environment.
///
/// Does nothing unless `DASHFILTER_DEBUG` or `DASHFILTER_LOG_LEVEL` is set.
/// Subsequent calls are no-ops.
pub fn init() {
    if !is_debug_enabled() && env::var("DASHFILTER_LOG_LEVEL").is_err() {
        return;
    }
    init_with(get_log_level(), get_log_format());
}

/// Initialize logging with an explicit level and format.
///
/// Only the first call to [`init`] or `init_with` takes effect.
pub fn init_with(level: &str, format: &str) {
    let level = parse_level(level, "warn");
    let format = parse_format(format);

    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "dashfilter={},dashfilter_core={},dashfilter_config={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match format {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = format, "dashfilter logging initialized");
            }
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = (level, format);
        }
    });
}
