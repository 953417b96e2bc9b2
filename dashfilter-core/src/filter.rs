//! Filter rule types shared by saved queries and dashboards.

use serde::{Deserialize, Serialize};

/// Anything a filter rule can point at.
pub trait Target {
    /// The id of the referenced field.
    fn field_id(&self) -> &str;
}

/// A field referenced by a saved-query filter rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTarget {
    /// Field id, e.g. `payments_payment_method`.
    pub field_id: String,
}

impl FieldTarget {
    /// Create a new field target.
    pub fn new(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
        }
    }
}

impl Target for FieldTarget {
    fn field_id(&self) -> &str {
        &self.field_id
    }
}

/// A field referenced by a dashboard filter rule or a tile override.
///
/// Equality is structural over all three components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTarget {
    /// Field id, e.g. `payments_payment_method`.
    pub field_id: String,
    /// Table the field belongs to.
    pub table_name: String,
    /// Field name within the table.
    pub field_name: String,
}

impl FilterTarget {
    /// Create a new filter target.
    pub fn new(
        field_id: impl Into<String>,
        table_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            table_name: table_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl Target for FilterTarget {
    fn field_id(&self) -> &str {
        &self.field_id
    }
}

impl From<&FilterTarget> for FieldTarget {
    fn from(target: &FilterTarget) -> Self {
        Self::new(target.field_id.clone())
    }
}

/// Operator deciding how a rule's values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalOperator {
    /// Field is null.
    IsNull,
    /// Field is not null.
    NotNull,
    /// Equal to any value.
    Equals,
    /// Equal to none of the values.
    NotEquals,
    /// Starts with.
    StartsWith,
    /// Ends with.
    EndsWith,
    /// Contains.
    Include,
    /// Does not contain.
    DoesNotInclude,
    /// Less than.
    LessThan,
    /// Less than or equal.
    LessThanOrEqual,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterThanOrEqual,
    /// Within the last N units.
    InThePast,
    /// Not within the last N units.
    NotInThePast,
    /// Within the next N units.
    InTheNext,
    /// Within the current unit.
    InTheCurrent,
    /// Not within the current unit.
    NotInTheCurrent,
    /// Between two values.
    InBetween,
    /// Outside two values.
    NotInBetween,
}

impl ConditionalOperator {
    /// Get the wire name of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsNull => "isNull",
            Self::NotNull => "notNull",
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Include => "include",
            Self::DoesNotInclude => "doesNotInclude",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::InThePast => "inThePast",
            Self::NotInThePast => "notInThePast",
            Self::InTheNext => "inTheNext",
            Self::InTheCurrent => "inTheCurrent",
            Self::NotInTheCurrent => "notInTheCurrent",
            Self::InBetween => "inBetween",
            Self::NotInBetween => "notInBetween",
        }
    }
}

/// A scalar filter value.
///
/// Integers decode as [`FilterValue::Int`] when they fit in `i64` and as
/// [`FilterValue::UInt`] above that, so any JSON integer in `i64::MIN..=u64::MAX`
/// survives a decode and encode unchanged. Integers below `i64::MIN` are
/// parsed as floats by serde_json and stay [`FilterValue::Float`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for FilterValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// A single predicate over one field.
///
/// Saved-query rules use the default [`FieldTarget`]; the generic parameter
/// lets the same shape carry richer targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule<T = FieldTarget> {
    /// Unique rule id.
    pub id: String,
    /// The field this rule filters on.
    pub target: T,
    /// How `values` are interpreted.
    pub operator: ConditionalOperator,
    /// Operand values.
    #[serde(default)]
    pub values: Vec<FilterValue>,
    /// Whether the rule is switched off.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    /// Operator settings (date units and the like), kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

impl<T: Target> FilterRule<T> {
    /// Create an enabled rule.
    pub fn new(
        id: impl Into<String>,
        target: T,
        operator: ConditionalOperator,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self {
            id: id.into(),
            target,
            operator,
            values: values.into_iter().collect(),
            disabled: false,
            settings: None,
        }
    }

    /// Check whether this rule filters on `field_id`.
    pub fn references_field(&self, field_id: &str) -> bool {
        self.target.field_id() == field_id
    }
}
