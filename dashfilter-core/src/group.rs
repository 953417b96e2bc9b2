//! Recursive AND/OR filter groups.
//!
//! In memory a group carries an explicit [`Combinator`] and a single list of
//! children. On the wire the combinator is the key holding the children:
//!
//! ```json
//! { "id": "root", "and": [ { "id": "r1", "target": { "fieldId": "f1" }, "operator": "equals", "values": [1] } ] }
//! ```
//!
//! Exactly one of `and` / `or` must be present when decoding.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FilterError;
use crate::filter::FilterRule;

/// How the children of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Every child must match.
    And,
    /// At least one child must match.
    Or,
}

impl Combinator {
    /// Get the wire key for this combinator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A node of a filter tree.
///
/// Objects carrying an `and` or `or` key decode as groups, so a malformed
/// nested group reports its own error instead of falling back to a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterGroupItem {
    /// A nested group.
    Group(FilterGroup),
    /// A leaf rule.
    Rule(FilterRule),
}

impl<'de> Deserialize<'de> for FilterGroupItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_group = value
            .as_object()
            .is_some_and(|object| object.contains_key("and") || object.contains_key("or"));

        if is_group {
            FilterGroup::deserialize(value).map(Self::Group).map_err(D::Error::custom)
        } else {
            FilterRule::deserialize(value).map(Self::Rule).map_err(D::Error::custom)
        }
    }
}

impl From<FilterRule> for FilterGroupItem {
    fn from(rule: FilterRule) -> Self {
        Self::Rule(rule)
    }
}

impl From<FilterGroup> for FilterGroupItem {
    fn from(group: FilterGroup) -> Self {
        Self::Group(group)
    }
}

/// A recursive AND/OR composition of rules and subgroups.
///
/// Each level of nesting costs two levels of JSON. serde_json stops parsing
/// at 128 levels, so trees deeper than roughly 60 groups serialize but cannot
/// be read back with `serde_json::from_str`. Pruning has no depth limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterGroup", into = "RawFilterGroup")]
pub struct FilterGroup {
    /// Unique group id.
    pub id: String,
    /// How children are combined.
    pub combinator: Combinator,
    /// Rules and subgroups, in authored order.
    pub children: Vec<FilterGroupItem>,
}

impl FilterGroup {
    /// Create a group with the given combinator.
    pub fn new(
        id: impl Into<String>,
        combinator: Combinator,
        children: impl IntoIterator<Item = FilterGroupItem>,
    ) -> Self {
        Self {
            id: id.into(),
            combinator,
            children: children.into_iter().collect(),
        }
    }

    /// Create an AND group.
    pub fn and(id: impl Into<String>, children: impl IntoIterator<Item = FilterGroupItem>) -> Self {
        Self::new(id, Combinator::And, children)
    }

    /// Create an OR group.
    pub fn or(id: impl Into<String>, children: impl IntoIterator<Item = FilterGroupItem>) -> Self {
        Self::new(id, Combinator::Or, children)
    }

    /// Every rule in the tree, depth-first in document order.
    pub fn rules(&self) -> Vec<&FilterRule> {
        let mut rules = Vec::new();
        self.collect_rules(&mut rules);
        rules
    }

    fn collect_rules<'a>(&'a self, out: &mut Vec<&'a FilterRule>) {
        for child in &self.children {
            match child {
                FilterGroupItem::Rule(rule) => out.push(rule),
                FilterGroupItem::Group(group) => group.collect_rules(out),
            }
        }
    }

    /// Number of rules in the tree.
    pub fn rule_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                FilterGroupItem::Rule(_) => 1,
                FilterGroupItem::Group(group) => group.rule_count(),
            })
            .sum()
    }

    /// Check whether any rule in the tree filters on `field_id`.
    pub fn references_field(&self, field_id: &str) -> bool {
        self.children.iter().any(|child| match child {
            FilterGroupItem::Rule(rule) => rule.references_field(field_id),
            FilterGroupItem::Group(group) => group.references_field(field_id),
        })
    }
}

/// Saved-chart filters: one optional tree per field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Filters on dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<FilterGroup>,
    /// Filters on metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FilterGroup>,
    /// Filters on table calculations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_calculations: Option<FilterGroup>,
}

impl Filters {
    /// Check if no tree is present.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_none() && self.metrics.is_none() && self.table_calculations.is_none()
    }
}

/// Wire shape of a group: `{ id, and }` or `{ id, or }`.
#[derive(Serialize, Deserialize)]
struct RawFilterGroup {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    and: Option<Vec<FilterGroupItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    or: Option<Vec<FilterGroupItem>>,
}

impl TryFrom<RawFilterGroup> for FilterGroup {
    type Error = FilterError;

    fn try_from(raw: RawFilterGroup) -> Result<Self, Self::Error> {
        match (raw.and, raw.or) {
            (Some(children), None) => Ok(Self::new(raw.id, Combinator::And, children)),
            (None, Some(children)) => Ok(Self::new(raw.id, Combinator::Or, children)),
            (Some(_), Some(_)) => Err(FilterError::invalid_filter_group(
                raw.id,
                "has both `and` and `or`",
            )),
            (None, None) => Err(FilterError::invalid_filter_group(
                raw.id,
                "has neither `and` nor `or`",
            )),
        }
    }
}

impl From<FilterGroup> for RawFilterGroup {
    fn from(group: FilterGroup) -> Self {
        let (and, or) = match group.combinator {
            Combinator::And => (Some(group.children), None),
            Combinator::Or => (None, Some(group.children)),
        };
        Self {
            id: group.id,
            and,
            or,
        }
    }
}
