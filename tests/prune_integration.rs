//! Integration tests for removing a field from saved filters.

use dashfilter::{Combinator, FilterGroup, FilterGroupItem, Filters, remove_field_from_filter_group};
use pretty_assertions::assert_eq;
use serde_json::json;

fn saved_chart_filters() -> Filters {
    serde_json::from_value(json!({
        "dimensions": {
            "id": "dims",
            "or": [
                { "id": "d1", "target": { "fieldId": "orders_status" }, "operator": "equals", "values": ["shipped"] },
                {
                    "id": "dims-nested",
                    "and": [
                        { "id": "d2", "target": { "fieldId": "orders_customer" }, "operator": "startsWith", "values": ["A"] },
                        { "id": "d3", "target": { "fieldId": "orders_status" }, "operator": "notEquals", "values": ["returned"] },
                    ],
                },
            ],
        },
        "metrics": {
            "id": "metrics",
            "and": [
                { "id": "m1", "target": { "fieldId": "orders_total" }, "operator": "greaterThan", "values": [10] },
            ],
        },
    }))
    .unwrap()
}

/// Stored trees come back in the same JSON shape after pruning.
#[test]
fn test_prune_saved_filters_json() {
    let updated = saved_chart_filters().remove_field("orders_status");

    assert_eq!(
        serde_json::to_value(&updated).unwrap(),
        json!({
            "dimensions": {
                "id": "dims",
                "or": [{
                    "id": "dims-nested",
                    "and": [
                        { "id": "d2", "target": { "fieldId": "orders_customer" }, "operator": "startsWith", "values": ["A"] },
                    ],
                }],
            },
            "metrics": {
                "id": "metrics",
                "and": [
                    { "id": "m1", "target": { "fieldId": "orders_total" }, "operator": "greaterThan", "values": [10] },
                ],
            },
        })
    );
}

/// A tree whose every rule is removed disappears from the saved filters.
#[test]
fn test_prune_removes_collapsed_tree() {
    let updated = saved_chart_filters().remove_field("orders_total");
    assert_eq!(updated.metrics, None);
    assert!(updated.dimensions.is_some());
    assert!(!serde_json::to_value(&updated).unwrap().as_object().unwrap().contains_key("metrics"));
}

/// Pruning several fields in any order reaches the same result.
#[test]
fn test_prune_order_independent() {
    let filters = saved_chart_filters();
    let a = filters.remove_field("orders_status").remove_field("orders_customer");
    let b = filters.remove_field("orders_customer").remove_field("orders_status");
    assert_eq!(a, b);
    assert_eq!(a.dimensions, None);
}

/// Deep trees collapse level by level.
///
/// The tree here is deeper than serde_json will parse back, so it is only
/// pruned in memory.
#[test]
fn test_deep_tree_collapses() {
    let mut group = FilterGroup::and(
        "leaf-group",
        [dashfilter::FilterRule::new(
            "leaf",
            dashfilter::FieldTarget::new("gone"),
            dashfilter::ConditionalOperator::IsNull,
            [],
        )
        .into()],
    );
    for depth in 0..64 {
        let combinator = if depth % 2 == 0 { Combinator::Or } else { Combinator::And };
        group = FilterGroup::new(format!("level-{depth}"), combinator, [FilterGroupItem::Group(group)]);
    }

    assert!(group.references_field("gone"));
    assert_eq!(remove_field_from_filter_group(&group, "gone"), None);
    assert_eq!(remove_field_from_filter_group(&group, "kept").as_ref(), Some(&group));
}

/// Trees a few dozen levels deep survive a JSON round trip.
#[test]
fn test_deep_tree_json_round_trip() {
    let mut group = FilterGroup::or(
        "leaf-group",
        [dashfilter::FilterRule::new(
            "leaf",
            dashfilter::FieldTarget::new("kept"),
            dashfilter::ConditionalOperator::Equals,
            ["x".into()],
        )
        .into()],
    );
    for depth in 0..40 {
        group = FilterGroup::and(format!("level-{depth}"), [FilterGroupItem::Group(group)]);
    }

    let json = serde_json::to_string(&group).unwrap();
    let back: FilterGroup = serde_json::from_str(&json).unwrap();
    assert_eq!(back, group);
    assert_eq!(back.rule_count(), 1);
}
