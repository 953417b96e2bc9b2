//! # dashfilter-core
//!
//! Filter rules for BI dashboards and saved charts.
//!
//! This crate provides:
//! - Filter rules, targets and operators
//! - Recursive AND/OR filter groups
//! - Tile-target compression and decompression for dashboard filters
//! - Field removal from filter trees
//! - A URL parameter codec for shareable dashboard links
//!
//! ## Dashboard Filters
//!
//! Dashboard rules carry per-tile exceptions. The runtime form keys them by
//! tile id; the compressed form is an ordered list without redundant entries:
//!
//! ```rust
//! use dashfilter_core::{
//!     compress_dashboard_filters_to_param, convert_dashboard_filters_param_to_dashboard_filters,
//!     ConditionalOperator, DashboardFilterRule, DashboardFilters, FilterTarget,
//! };
//!
//! let target = FilterTarget::new("payments_payment_method", "payments", "payment_method");
//! let rule = DashboardFilterRule::new("filter-id", target, ConditionalOperator::Equals, ["credit_card".into()])
//!     .exclude_tile("chart-id-no-filter");
//! let filters = DashboardFilters { dimensions: vec![rule], ..Default::default() };
//!
//! let compressed = compress_dashboard_filters_to_param(&filters);
//! let json = serde_json::to_string(&compressed.dimensions[0].tile_targets).unwrap();
//! assert_eq!(json, r#"[{"chart-id-no-filter":false}]"#);
//!
//! assert_eq!(convert_dashboard_filters_param_to_dashboard_filters(&compressed), filters);
//! ```
//!
//! ## Filter Groups
//!
//! ```rust
//! use dashfilter_core::{ConditionalOperator, FieldTarget, FilterGroup, FilterRule, remove_field_from_filter_group};
//!
//! let group = FilterGroup::or("root", [
//!     FilterRule::new("r1", FieldTarget::new("orders_status"), ConditionalOperator::Equals, ["shipped".into()]).into(),
//!     FilterGroup::and("nested", [
//!         FilterRule::new("r2", FieldTarget::new("orders_amount"), ConditionalOperator::GreaterThan, [100.into()]).into(),
//!     ]).into(),
//! ]);
//!
//! let pruned = remove_field_from_filter_group(&group, "orders_amount").unwrap();
//! assert_eq!(pruned.children.len(), 1);
//! ```

pub mod codec;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod group;
pub mod logging;
pub mod param;
pub mod prune;
pub mod tile_target;

pub use codec::{
    compress_dashboard_filters_to_param, compress_rule, compress_tile_targets,
    convert_dashboard_filters_param_to_dashboard_filters, decompress_rule, decompress_tile_targets,
};
pub use dashboard::{
    CompressedDashboardFilterRule, CompressedDashboardFilters, DashboardFilterRule,
    DashboardFilters,
};
pub use error::{ErrorCode, ErrorContext, FilterError, FilterResult};
pub use filter::{ConditionalOperator, FieldTarget, FilterRule, FilterTarget, FilterValue, Target};
pub use group::{Combinator, FilterGroup, FilterGroupItem, Filters};
pub use param::{DEFAULT_PARAM_NAME, ParamCodec};
pub use prune::remove_field_from_filter_group;
pub use tile_target::{CompressedTileTargets, TileTarget, TileTargetEntry, TileTargets};

// Re-export logging utilities
pub use logging::{init as init_logging, init_with as init_logging_with, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::codec::{
        compress_dashboard_filters_to_param, convert_dashboard_filters_param_to_dashboard_filters,
    };
    pub use crate::dashboard::{CompressedDashboardFilters, DashboardFilterRule, DashboardFilters};
    pub use crate::error::{FilterError, FilterResult};
    pub use crate::filter::{ConditionalOperator, FieldTarget, FilterRule, FilterTarget, FilterValue};
    pub use crate::group::{Combinator, FilterGroup, FilterGroupItem, Filters};
    pub use crate::param::ParamCodec;
    pub use crate::prune::remove_field_from_filter_group;
    pub use crate::tile_target::{TileTarget, TileTargetEntry};
}
