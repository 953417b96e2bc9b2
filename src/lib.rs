//! # dashfilter
//!
//! Dashboard filter rules for a BI platform.
//!
//! dashfilter provides:
//! - Filter rules and recursive AND/OR filter groups
//! - Lossy compression of per-tile overrides for URLs and persisted configs
//! - Removal of a field from saved filter trees
//! - Configuration via `dashfilter.toml`
//!
//! ## Quick Start
//!
//! ```rust
//! use dashfilter::config::FiltersConfig;
//! use dashfilter::prelude::*;
//!
//! let config = FiltersConfig::from_str("[codec]\nparam_name = \"f\"\n").unwrap();
//! let codec = dashfilter::codec_from_config(&config);
//!
//! let rule = DashboardFilterRule::new(
//!     "filter-id",
//!     FilterTarget::new("payments_payment_method", "payments", "payment_method"),
//!     ConditionalOperator::Equals,
//!     ["credit_card".into()],
//! );
//! let filters = DashboardFilters { dimensions: vec![rule], ..Default::default() };
//!
//! let query = codec.to_query_pair(&filters).unwrap();
//! assert_eq!(codec.from_query(&query).unwrap(), Some(filters));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Configuration file types.
pub mod config {
    pub use dashfilter_config::*;
}

pub use dashfilter_core::*;

/// Build a [`ParamCodec`] from the `[codec]` section.
pub fn codec_from_config(config: &dashfilter_config::FiltersConfig) -> ParamCodec {
    let codec = ParamCodec::new().param_name(config.codec.param_name.clone());
    match config.codec.max_param_length {
        Some(max) => codec.max_length(max),
        None => codec,
    }
}

/// Initialize logging from the `[logging]` section.
///
/// The same environment variables as [`init_logging`] take precedence over
/// the file, see [`logging::resolve_settings`]. Only the first
/// initialization in a process takes effect.
pub fn init_logging_from_config(config: &dashfilter_config::FiltersConfig) {
    let (level, format) = logging::resolve_settings(&config.logging.level, &config.logging.format);
    tracing::debug!(level, format, "initializing logging from config");
    logging::init_with(level, format);
}
