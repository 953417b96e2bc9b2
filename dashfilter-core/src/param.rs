//! Dashboard filters as a URL query parameter.
//!
//! Shareable dashboard links carry the compressed filter set as JSON in a
//! single query parameter:
//!
//! ```text
//! /dashboards/abc?filters=%7B%22dimensions%22%3A...
//! ```
//!
//! ```rust
//! use dashfilter_core::{ConditionalOperator, DashboardFilterRule, DashboardFilters, FilterTarget, ParamCodec};
//!
//! let rule = DashboardFilterRule::new(
//!     "filter-id",
//!     FilterTarget::new("orders_status", "orders", "status"),
//!     ConditionalOperator::Equals,
//!     ["shipped".into()],
//! )
//! .exclude_tile("chart-1");
//! let filters = DashboardFilters { dimensions: vec![rule], ..Default::default() };
//!
//! let codec = ParamCodec::default();
//! let query = codec.to_query_pair(&filters).unwrap();
//! assert!(query.starts_with("filters="));
//!
//! let decoded = codec.from_query(&format!("?tab=1&{query}")).unwrap();
//! assert_eq!(decoded, Some(filters));
//! ```

use tracing::debug;
use url::form_urlencoded;

use crate::codec::{compress_dashboard_filters_to_param, convert_dashboard_filters_param_to_dashboard_filters};
use crate::dashboard::{CompressedDashboardFilters, DashboardFilters};
use crate::error::{FilterError, FilterResult};

/// Default query parameter name.
pub const DEFAULT_PARAM_NAME: &str = "filters";

/// Encodes and decodes dashboard filters for URLs and persisted configs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCodec {
    param_name: String,
    max_length: Option<usize>,
}

impl Default for ParamCodec {
    fn default() -> Self {
        Self {
            param_name: DEFAULT_PARAM_NAME.to_string(),
            max_length: None,
        }
    }
}

impl ParamCodec {
    /// Create a codec with the default parameter name and no length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query parameter name.
    pub fn param_name(mut self, name: impl Into<String>) -> Self {
        self.param_name = name.into();
        self
    }

    /// Limit the length of the encoded JSON.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Get the query parameter name.
    pub fn name(&self) -> &str {
        &self.param_name
    }

    /// Get the length limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.max_length
    }

    /// Compress and serialize `filters` to JSON.
    pub fn encode(&self, filters: &DashboardFilters) -> FilterResult<String> {
        let compressed = compress_dashboard_filters_to_param(filters);
        let json = serde_json::to_string(&compressed).map_err(FilterError::serialization)?;

        if let Some(max) = self.max_length {
            if json.len() > max {
                return Err(FilterError::param_too_long(json.len(), max));
            }
        }

        Ok(json)
    }

    /// Parse compressed JSON and decompress it.
    pub fn decode(&self, raw: &str) -> FilterResult<DashboardFilters> {
        let compressed: CompressedDashboardFilters =
            serde_json::from_str(raw).map_err(FilterError::deserialization)?;
        Ok(convert_dashboard_filters_param_to_dashboard_filters(&compressed))
    }

    /// Encode `filters` as a form-urlencoded `name=value` pair.
    pub fn to_query_pair(&self, filters: &DashboardFilters) -> FilterResult<String> {
        let json = self.encode(filters)?;
        Ok(form_urlencoded::Serializer::new(String::new())
            .append_pair(&self.param_name, &json)
            .finish())
    }

    /// Find and decode the filter parameter in a query string.
    ///
    /// A leading `?` is ignored. Returns `Ok(None)` when the parameter is absent.
    pub fn from_query(&self, query: &str) -> FilterResult<Option<DashboardFilters>> {
        let query = query.strip_prefix('?').unwrap_or(query);
        match form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == self.param_name.as_str()) {
            Some((_, value)) => self.decode(&value).map(Some),
            None => {
                debug!(param = %self.param_name, "no filter parameter in query");
                Ok(None)
            }
        }
    }
}
