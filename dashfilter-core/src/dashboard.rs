//! Dashboard-level filters.
//!
//! A dashboard carries three flat, implicitly AND-combined lists of rules.
//! Rules are generic over their tile-target form so the same struct describes
//! the runtime shape ([`TileTargets`]) and the wire shape
//! ([`CompressedTileTargets`]).

use serde::{Deserialize, Serialize};

use crate::filter::{ConditionalOperator, FilterTarget, FilterValue};
use crate::tile_target::{CompressedTileTargets, TileTarget, TileTargets};

/// A dashboard filter rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct DashboardFilterRule<T = TileTargets> {
    /// Unique rule id.
    pub id: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// How `values` are interpreted.
    pub operator: ConditionalOperator,
    /// Default field the rule filters on.
    pub target: FilterTarget,
    /// Operand values.
    #[serde(default)]
    pub values: Vec<FilterValue>,
    /// Whether the rule is switched off.
    #[serde(default)]
    pub disabled: bool,
    /// Operator settings, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
    /// Per-tile exclusions and overrides.
    #[serde(default)]
    pub tile_targets: T,
}

/// A dashboard filter rule in wire form.
pub type CompressedDashboardFilterRule = DashboardFilterRule<CompressedTileTargets>;

impl<T> DashboardFilterRule<T> {
    /// Rebuild this rule with different tile targets, leaving everything else untouched.
    pub fn with_tile_targets<U>(&self, tile_targets: U) -> DashboardFilterRule<U> {
        DashboardFilterRule {
            id: self.id.clone(),
            label: self.label.clone(),
            operator: self.operator,
            target: self.target.clone(),
            values: self.values.clone(),
            disabled: self.disabled,
            settings: self.settings.clone(),
            tile_targets,
        }
    }
}

impl DashboardFilterRule {
    /// Create an enabled rule without tile targets.
    pub fn new(
        id: impl Into<String>,
        target: FilterTarget,
        operator: ConditionalOperator,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self {
            id: id.into(),
            label: None,
            operator,
            target,
            values: values.into_iter().collect(),
            disabled: false,
            settings: None,
            tile_targets: TileTargets::new(),
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add or replace a tile exception.
    pub fn tile_target(mut self, tile_id: impl Into<String>, target: impl Into<TileTarget>) -> Self {
        self.tile_targets.insert(tile_id.into(), target.into());
        self
    }

    /// Exclude a tile from this rule.
    pub fn exclude_tile(self, tile_id: impl Into<String>) -> Self {
        self.tile_target(tile_id, TileTarget::Disabled)
    }

    /// The field `tile_id` is filtered on, or `None` if the tile is excluded.
    pub fn target_for_tile(&self, tile_id: &str) -> Option<&FilterTarget> {
        match self.tile_targets.get(tile_id) {
            Some(TileTarget::Disabled) => None,
            Some(TileTarget::Override(target)) => Some(target),
            None => Some(&self.target),
        }
    }

    /// This rule as seen by one tile: target resolved, tile targets cleared.
    fn for_tile(&self, tile_id: &str) -> Option<Self> {
        let target = self.target_for_tile(tile_id)?.clone();
        let mut rule = self.with_tile_targets(TileTargets::new());
        rule.target = target;
        Some(rule)
    }
}

/// The filter set of a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct DashboardFilters<T = TileTargets> {
    /// Filters on dimensions.
    #[serde(default)]
    pub dimensions: Vec<DashboardFilterRule<T>>,
    /// Filters on metrics.
    #[serde(default)]
    pub metrics: Vec<DashboardFilterRule<T>>,
    /// Filters on table calculations.
    #[serde(default)]
    pub table_calculations: Vec<DashboardFilterRule<T>>,
}

/// A dashboard filter set in wire form.
pub type CompressedDashboardFilters = DashboardFilters<CompressedTileTargets>;

impl<T> Default for DashboardFilters<T> {
    fn default() -> Self {
        Self {
            dimensions: Vec::new(),
            metrics: Vec::new(),
            table_calculations: Vec::new(),
        }
    }
}

impl<T> DashboardFilters<T> {
    /// Check if no collection holds a rule.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.metrics.is_empty() && self.table_calculations.is_empty()
    }

    /// Total number of rules across the three collections.
    pub fn rule_count(&self) -> usize {
        self.dimensions.len() + self.metrics.len() + self.table_calculations.len()
    }

    /// All rules, dimensions first, then metrics, then table calculations.
    pub fn rules(&self) -> impl Iterator<Item = &DashboardFilterRule<T>> {
        self.dimensions
            .iter()
            .chain(self.metrics.iter())
            .chain(self.table_calculations.iter())
    }

    /// Apply `f` to every rule, keeping collection and rule order.
    pub fn map_rules<U>(&self, mut f: impl FnMut(&DashboardFilterRule<T>) -> DashboardFilterRule<U>) -> DashboardFilters<U> {
        DashboardFilters {
            dimensions: self.dimensions.iter().map(&mut f).collect(),
            metrics: self.metrics.iter().map(&mut f).collect(),
            table_calculations: self.table_calculations.iter().map(&mut f).collect(),
        }
    }
}

impl DashboardFilters {
    /// The filters one tile sees.
    ///
    /// Rules excluding the tile are dropped, overrides replace the rule
    /// target, and the returned rules carry no tile targets.
    pub fn for_tile(&self, tile_id: &str) -> Self {
        let resolve = |rules: &[DashboardFilterRule]| -> Vec<DashboardFilterRule> {
            rules.iter().filter_map(|rule| rule.for_tile(tile_id)).collect()
        };
        Self {
            dimensions: resolve(&self.dimensions),
            metrics: resolve(&self.metrics),
            table_calculations: resolve(&self.table_calculations),
        }
    }
}
