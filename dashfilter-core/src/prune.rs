//! Removing a field from filter trees.
//!
//! When a field disappears from the underlying data model every rule that
//! targets it has to go. Groups left without children are dropped as well,
//! up to and including the root, so callers either get a smaller valid tree
//! or `None`.

use tracing::{debug, trace};

use crate::group::{FilterGroup, FilterGroupItem, Filters};

/// Remove every rule targeting `field_id` from `group`.
///
/// Returns a freshly built tree with the same ids, combinators and relative
/// order, or `None` when nothing is left. An unknown `field_id` yields a copy
/// equal to the input.
///
/// ```rust
/// use dashfilter_core::{ConditionalOperator, FieldTarget, FilterGroup, FilterGroupItem, FilterRule};
/// use dashfilter_core::prune::remove_field_from_filter_group;
///
/// let rule = |id: &str, field: &str| -> FilterGroupItem {
///     FilterRule::new(id, FieldTarget::new(field), ConditionalOperator::Equals, ["x".into()]).into()
/// };
/// let group = FilterGroup::and("root", [rule("r1", "gone"), rule("r2", "kept")]);
///
/// let pruned = remove_field_from_filter_group(&group, "gone").unwrap();
/// assert_eq!(pruned.rule_count(), 1);
/// assert!(remove_field_from_filter_group(&pruned, "kept").is_none());
/// ```
pub fn remove_field_from_filter_group(group: &FilterGroup, field_id: &str) -> Option<FilterGroup> {
    let children: Vec<FilterGroupItem> = group
        .children
        .iter()
        .filter_map(|child| match child {
            FilterGroupItem::Rule(rule) if rule.references_field(field_id) => {
                trace!(rule_id = %rule.id, field_id, "removing filter rule");
                None
            }
            FilterGroupItem::Rule(rule) => Some(FilterGroupItem::Rule(rule.clone())),
            FilterGroupItem::Group(subgroup) => {
                remove_field_from_filter_group(subgroup, field_id).map(FilterGroupItem::Group)
            }
        })
        .collect();

    if children.is_empty() {
        trace!(group_id = %group.id, "collapsing empty filter group");
        return None;
    }

    Some(FilterGroup::new(group.id.clone(), group.combinator, children))
}

impl FilterGroup {
    /// This tree without rules targeting `field_id`.
    ///
    /// See [`remove_field_from_filter_group`].
    pub fn without_field(&self, field_id: &str) -> Option<FilterGroup> {
        remove_field_from_filter_group(self, field_id)
    }
}

impl Filters {
    /// Remove `field_id` from all three trees; collapsed trees become absent.
    pub fn remove_field(&self, field_id: &str) -> Filters {
        debug!(field_id, "removing field from saved filters");
        let prune = |group: &Option<FilterGroup>| {
            group
                .as_ref()
                .and_then(|group| remove_field_from_filter_group(group, field_id))
        };
        Filters {
            dimensions: prune(&self.dimensions),
            metrics: prune(&self.metrics),
            table_calculations: prune(&self.table_calculations),
        }
    }
}
