//! Conversion between runtime and wire dashboard filters.
//!
//! Compression walks each rule's tile-target mapping in insertion order and
//! drops overrides that restate the rule's own target. Decompression rebuilds
//! the mapping, skipping legacy bare tile ids and letting later records win.
//!
//! ```rust
//! use dashfilter_core::codec::{compress_rule, decompress_rule};
//! use dashfilter_core::{ConditionalOperator, DashboardFilterRule, FilterTarget};
//!
//! let target = FilterTarget::new("payments_payment_method", "payments", "payment_method");
//! let rule = DashboardFilterRule::new("filter-id", target.clone(), ConditionalOperator::Equals, ["credit_card".into()])
//!     .tile_target("chart-id", target)
//!     .exclude_tile("chart-id-no-filter");
//!
//! let compressed = compress_rule(&rule);
//! assert_eq!(compressed.tile_targets.len(), 1);
//!
//! let restored = decompress_rule(&compressed);
//! assert!(restored.tile_targets.contains_key("chart-id-no-filter"));
//! assert!(!restored.tile_targets.contains_key("chart-id"));
//! ```

use tracing::{debug, trace};

use crate::dashboard::{
    CompressedDashboardFilterRule, CompressedDashboardFilters, DashboardFilterRule,
    DashboardFilters,
};
use crate::filter::FilterTarget;
use crate::tile_target::{CompressedTileTargets, TileTarget, TileTargetEntry, TileTargets};

/// Compress a runtime tile-target mapping against the rule's default target.
pub fn compress_tile_targets(default_target: &FilterTarget, tile_targets: &TileTargets) -> CompressedTileTargets {
    tile_targets
        .iter()
        .filter_map(|(tile_id, target)| match target {
            TileTarget::Override(target) if target == default_target => {
                trace!(tile_id = %tile_id, field_id = %target.field_id, "dropping redundant tile override");
                None
            }
            _ => Some(TileTargetEntry::new(tile_id.clone(), target.clone())),
        })
        .collect()
}

/// Rebuild a runtime tile-target mapping from its wire list.
pub fn decompress_tile_targets(entries: &[TileTargetEntry]) -> TileTargets {
    let mut tile_targets = TileTargets::with_capacity(entries.len());
    for entry in entries {
        match entry.clone().into_pair() {
            Some((tile_id, target)) => {
                tile_targets.insert(tile_id, target);
            }
            None => trace!(tile_id = %entry.tile_id(), "skipping legacy tile target"),
        }
    }
    tile_targets
}

/// Compress one rule. Only `tile_targets` changes.
pub fn compress_rule(rule: &DashboardFilterRule) -> CompressedDashboardFilterRule {
    rule.with_tile_targets(compress_tile_targets(&rule.target, &rule.tile_targets))
}

/// Decompress one rule. Only `tile_targets` changes.
pub fn decompress_rule(rule: &CompressedDashboardFilterRule) -> DashboardFilterRule {
    rule.with_tile_targets(decompress_tile_targets(&rule.tile_targets))
}

/// Compress a dashboard filter set for a URL or persisted config.
pub fn compress_dashboard_filters_to_param(filters: &DashboardFilters) -> CompressedDashboardFilters {
    debug!(rules = filters.rule_count(), "compressing dashboard filters");
    filters.map_rules(compress_rule)
}

/// Decompress a dashboard filter set read from a URL or persisted config.
pub fn convert_dashboard_filters_param_to_dashboard_filters(
    filters: &CompressedDashboardFilters,
) -> DashboardFilters {
    debug!(rules = filters.rule_count(), "decompressing dashboard filters");
    filters.map_rules(decompress_rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ConditionalOperator;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payment_method() -> FilterTarget {
        FilterTarget::new("payments_payment_method", "payments", "payment_method")
    }

    fn modified() -> FilterTarget {
        FilterTarget::new("a_different_field", "a_different_table", "a_different_field")
    }

    fn dimension() -> DashboardFilterRule {
        DashboardFilterRule::new(
            "filter-id",
            payment_method(),
            ConditionalOperator::Equals,
            ["credit_card".into()],
        )
        .label("A label")
    }

    fn only_dimension(rule: DashboardFilterRule) -> DashboardFilters {
        DashboardFilters {
            dimensions: vec![rule],
            ..Default::default()
        }
    }

    fn url_filter(tile_targets: serde_json::Value) -> CompressedDashboardFilters {
        serde_json::from_value(json!({
            "dimensions": [{
                "id": "url-dimension",
                "label": "a label",
                "operator": "equals",
                "target": {
                    "fieldId": "payments_payment_method",
                    "tableName": "payments",
                    "fieldName": "payment_method",
                },
                "tileTargets": tile_targets,
                "disabled": false,
                "values": ["credit_card"],
            }],
            "metrics": [],
            "tableCalculations": [],
        }))
        .unwrap()
    }

    #[test]
    fn test_compress_without_overrides() {
        let compressed = compress_dashboard_filters_to_param(&only_dimension(dimension()));
        assert_eq!(
            serde_json::to_value(&compressed).unwrap(),
            json!({
                "dimensions": [{
                    "id": "filter-id",
                    "label": "A label",
                    "operator": "equals",
                    "target": {
                        "fieldId": "payments_payment_method",
                        "tableName": "payments",
                        "fieldName": "payment_method",
                    },
                    "tileTargets": [],
                    "disabled": false,
                    "values": ["credit_card"],
                }],
                "metrics": [],
                "tableCalculations": [],
            })
        );
    }

    #[test]
    fn test_compress_keeps_disabled_tile() {
        let compressed =
            compress_dashboard_filters_to_param(&only_dimension(dimension().exclude_tile("chart-id-no-filter")));
        assert_eq!(
            serde_json::to_value(&compressed.dimensions[0].tile_targets).unwrap(),
            json!([{ "chart-id-no-filter": false }])
        );
    }

    #[test]
    fn test_compress_keeps_different_override() {
        let compressed = compress_dashboard_filters_to_param(&only_dimension(
            dimension().tile_target("chart-id-modified-filter", modified()),
        ));
        assert_eq!(
            compressed.dimensions[0].tile_targets,
            vec![TileTargetEntry::Override("chart-id-modified-filter".into(), modified())]
        );
    }

    #[test]
    fn test_compress_drops_matching_override() {
        let compressed =
            compress_dashboard_filters_to_param(&only_dimension(dimension().tile_target("chart-id", payment_method())));
        assert!(compressed.dimensions[0].tile_targets.is_empty());
    }

    #[test]
    fn test_compress_mixed_in_every_collection() {
        let mixed = |prefix: &str| {
            dimension()
                .tile_target(format!("{prefix}chart-id"), payment_method())
                .exclude_tile(format!("{prefix}chart-id-no-filter"))
                .tile_target(format!("{prefix}chart-id-modified-filter"), modified())
                .exclude_tile(format!("{prefix}chart-id-no-filter2"))
        };
        let filters = DashboardFilters {
            dimensions: vec![mixed("")],
            metrics: vec![mixed("metric-")],
            table_calculations: vec![],
        };

        let compressed = compress_dashboard_filters_to_param(&filters);

        assert_eq!(
            serde_json::to_value(&compressed.dimensions[0].tile_targets).unwrap(),
            json!([
                { "chart-id-no-filter": false },
                { "chart-id-modified-filter": {
                    "fieldId": "a_different_field",
                    "tableName": "a_different_table",
                    "fieldName": "a_different_field",
                } },
                { "chart-id-no-filter2": false },
            ])
        );
        let metric_tiles: Vec<_> = compressed.metrics[0].tile_targets.iter().map(|e| e.tile_id()).collect();
        assert_eq!(
            metric_tiles,
            ["metric-chart-id-no-filter", "metric-chart-id-modified-filter", "metric-chart-id-no-filter2"]
        );
        assert!(compressed.table_calculations.is_empty());
    }

    #[test]
    fn test_compress_leaves_input_untouched() {
        let filters = only_dimension(dimension().tile_target("chart-id", payment_method()));
        let before = filters.clone();
        let _ = compress_dashboard_filters_to_param(&filters);
        assert_eq!(filters, before);
    }

    #[test]
    fn test_decompress_without_tile_targets() {
        let filters = convert_dashboard_filters_param_to_dashboard_filters(&url_filter(json!([])));
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({
                "dimensions": [{
                    "id": "url-dimension",
                    "label": "a label",
                    "operator": "equals",
                    "target": {
                        "fieldId": "payments_payment_method",
                        "tableName": "payments",
                        "fieldName": "payment_method",
                    },
                    "tileTargets": {},
                    "disabled": false,
                    "values": ["credit_card"],
                }],
                "metrics": [],
                "tableCalculations": [],
            })
        );
    }

    #[test]
    fn test_decompress_override() {
        let filters = convert_dashboard_filters_param_to_dashboard_filters(&url_filter(json!([
            { "chart-id-modified-filter": { "fieldId": "other-field", "tableName": "other-table", "fieldName": "other-field" } },
        ])));
        assert_eq!(
            serde_json::to_value(&filters.dimensions[0].tile_targets).unwrap(),
            json!({ "chart-id-modified-filter": { "fieldId": "other-field", "tableName": "other-table", "fieldName": "other-field" } })
        );
    }

    #[test]
    fn test_decompress_disabled() {
        let filters =
            convert_dashboard_filters_param_to_dashboard_filters(&url_filter(json!([{ "chart-id-no-filter": false }])));
        assert_eq!(
            filters.dimensions[0].tile_targets,
            TileTargets::from([("chart-id-no-filter".to_string(), TileTarget::Disabled)])
        );
    }

    #[test]
    fn test_decompress_skips_legacy_strings() {
        let filters = convert_dashboard_filters_param_to_dashboard_filters(&url_filter(json!(["an-id"])));
        assert!(filters.dimensions[0].tile_targets.is_empty());
    }

    #[test]
    fn test_decompress_mixed_entries() {
        let filters = convert_dashboard_filters_param_to_dashboard_filters(&url_filter(json!([
            "an-id",
            { "chart-id-no-filter": false },
            "another-id",
            { "chart-id-modified-filter": { "fieldId": "other-field", "tableName": "other-table", "fieldName": "other-field" } },
        ])));
        assert_eq!(
            serde_json::to_value(&filters.dimensions[0].tile_targets).unwrap(),
            json!({
                "chart-id-no-filter": false,
                "chart-id-modified-filter": { "fieldId": "other-field", "tableName": "other-table", "fieldName": "other-field" },
            })
        );
    }

    #[test]
    fn test_decompress_last_record_wins() {
        let entries = vec![
            TileTargetEntry::Disabled("chart".into()),
            TileTargetEntry::Override("other".into(), modified()),
            TileTargetEntry::Override("chart".into(), modified()),
        ];
        let tile_targets = decompress_tile_targets(&entries);
        assert_eq!(tile_targets.len(), 2);
        assert_eq!(tile_targets["chart"], TileTarget::Override(modified()));
    }

    #[test]
    fn test_round_trip_without_redundant_entries() {
        let filters = DashboardFilters {
            dimensions: vec![dimension().exclude_tile("a").tile_target("b", modified())],
            metrics: vec![dimension()],
            table_calculations: vec![dimension().exclude_tile("c")],
        };
        let restored =
            convert_dashboard_filters_param_to_dashboard_filters(&compress_dashboard_filters_to_param(&filters));
        assert_eq!(restored, filters);
    }

    #[test]
    fn test_round_trip_drops_only_default_override() {
        let rule = dimension()
            .tile_target("same", payment_method())
            .exclude_tile("hidden")
            .tile_target("moved", modified());
        let restored = decompress_rule(&compress_rule(&rule));

        assert_eq!(restored.tile_targets.len(), 2);
        assert!(!restored.tile_targets.contains_key("same"));
        assert_eq!(restored.tile_targets["hidden"], TileTarget::Disabled);
        assert_eq!(restored.tile_targets["moved"], TileTarget::Override(modified()));
        assert_eq!(restored.target_for_tile("same"), Some(&payment_method()));
    }
}
