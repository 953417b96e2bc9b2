//! Per-tile exceptions to a dashboard filter rule.
//!
//! A dashboard rule applies to every tile on its own target unless the tile
//! appears in the rule's tile targets, where it is either excluded (`false`)
//! or redirected to a different field.
//!
//! Two representations exist:
//!
//! - [`TileTargets`]: the runtime mapping, keyed by tile id, insertion ordered.
//! - [`CompressedTileTargets`]: the wire list of [`TileTargetEntry`] records.
//!
//! ```json
//! ["legacy-tile", { "chart-a": false }, { "chart-b": { "fieldId": "orders_status", "tableName": "orders", "fieldName": "status" } }]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::filter::FilterTarget;

/// How one tile deviates from a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTileTarget", into = "RawTileTarget")]
pub enum TileTarget {
    /// The rule does not apply to this tile. Serialized as `false`.
    Disabled,
    /// The rule applies to this tile on a different field.
    Override(FilterTarget),
}

impl TileTarget {
    /// Check if the tile is excluded from the rule.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// The override target, if any.
    pub fn as_override(&self) -> Option<&FilterTarget> {
        match self {
            Self::Override(target) => Some(target),
            Self::Disabled => None,
        }
    }
}

impl From<FilterTarget> for TileTarget {
    fn from(target: FilterTarget) -> Self {
        Self::Override(target)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTileTarget {
    Flag(bool),
    Target(FilterTarget),
}

impl TryFrom<RawTileTarget> for TileTarget {
    type Error = FilterError;

    fn try_from(raw: RawTileTarget) -> Result<Self, Self::Error> {
        match raw {
            RawTileTarget::Flag(false) => Ok(Self::Disabled),
            RawTileTarget::Flag(true) => Err(FilterError::invalid_tile_target(
                "`true` is not a valid tile target, expected `false` or a field target",
            )),
            RawTileTarget::Target(target) => Ok(Self::Override(target)),
        }
    }
}

impl From<TileTarget> for RawTileTarget {
    fn from(target: TileTarget) -> Self {
        match target {
            TileTarget::Disabled => Self::Flag(false),
            TileTarget::Override(target) => Self::Target(target),
        }
    }
}

/// Runtime tile targets: tile id to exception, in insertion order.
pub type TileTargets = IndexMap<String, TileTarget>;

/// Wire tile targets: an ordered list of single-key records.
pub type CompressedTileTargets = Vec<TileTargetEntry>;

/// One element of the wire tile-target list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTileTargetEntry", into = "RawTileTargetEntry")]
pub enum TileTargetEntry {
    /// A bare tile id from an older format. Carries no information.
    Legacy(String),
    /// `{tileId: false}`.
    Disabled(String),
    /// `{tileId: FilterTarget}`.
    Override(String, FilterTarget),
}

impl TileTargetEntry {
    /// Build an entry from a runtime pair.
    pub fn new(tile_id: impl Into<String>, target: TileTarget) -> Self {
        let tile_id = tile_id.into();
        match target {
            TileTarget::Disabled => Self::Disabled(tile_id),
            TileTarget::Override(target) => Self::Override(tile_id, target),
        }
    }

    /// The tile this entry refers to.
    pub fn tile_id(&self) -> &str {
        match self {
            Self::Legacy(id) | Self::Disabled(id) | Self::Override(id, _) => id,
        }
    }

    /// The runtime value this entry carries; `None` for legacy entries.
    pub fn into_pair(self) -> Option<(String, TileTarget)> {
        match self {
            Self::Legacy(_) => None,
            Self::Disabled(id) => Some((id, TileTarget::Disabled)),
            Self::Override(id, target) => Some((id, TileTarget::Override(target))),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTileTargetEntry {
    Legacy(String),
    Keyed(IndexMap<String, TileTarget>),
}

impl TryFrom<RawTileTargetEntry> for TileTargetEntry {
    type Error = FilterError;

    fn try_from(raw: RawTileTargetEntry) -> Result<Self, Self::Error> {
        match raw {
            RawTileTargetEntry::Legacy(tile_id) => Ok(Self::Legacy(tile_id)),
            RawTileTargetEntry::Keyed(map) => {
                if map.len() != 1 {
                    return Err(FilterError::invalid_tile_target(format!(
                        "tile target record must have exactly one key, found {}",
                        map.len()
                    )));
                }
                let (tile_id, target) = map
                    .into_iter()
                    .next()
                    .ok_or_else(|| FilterError::invalid_tile_target("empty tile target record"))?;
                Ok(Self::new(tile_id, target))
            }
        }
    }
}

impl From<TileTargetEntry> for RawTileTargetEntry {
    fn from(entry: TileTargetEntry) -> Self {
        match entry {
            TileTargetEntry::Legacy(tile_id) => Self::Legacy(tile_id),
            TileTargetEntry::Disabled(tile_id) => {
                Self::Keyed(IndexMap::from([(tile_id, TileTarget::Disabled)]))
            }
            TileTargetEntry::Override(tile_id, target) => {
                Self::Keyed(IndexMap::from([(tile_id, TileTarget::Override(target))]))
            }
        }
    }
}
