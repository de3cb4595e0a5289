//! Filter and sort clauses of a search request.
//!
//! Clauses are pure data with structural equality. Serialization targets the
//! backend wire format directly: a scalar clause becomes
//! `{"parameter": ..., "operator": ..., "value": ...}` and a vector clause
//! carries `"values"` instead. Operator spellings on the wire include the
//! space-separated forms `"not like"` and `"not in"`.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ===== Operators =====

/// Comparison operator for a single-value filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarOp {
    /// Equal.
    #[serde(rename = "eq")]
    Eq,
    /// Not equal.
    #[serde(rename = "neq")]
    Neq,
    /// Greater than.
    #[serde(rename = "gt")]
    Gt,
    /// Less than.
    #[serde(rename = "lt")]
    Lt,
    /// Substring/pattern match.
    #[serde(rename = "like")]
    Like,
    /// Negated substring/pattern match.
    #[serde(rename = "not like")]
    NotLike,
    /// Regular expression match.
    #[serde(rename = "regex")]
    Regex,
}

/// Set-membership operator for a multi-value filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VectorOp {
    /// Value is one of the given set.
    #[serde(rename = "in")]
    In,
    /// Value is none of the given set.
    #[serde(rename = "not in")]
    NotIn,
}

// ===== Scalar values =====

/// A filter value: the closed set of scalar types the backend accepts.
///
/// Anything else is rejected at construction time by simply not being
/// representable. Dates serialize as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Timestamp value.
    Date(DateTime<Utc>),
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<u16> for ScalarValue {
    fn from(v: u16) -> Self {
        ScalarValue::Int(i64::from(v))
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Float(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for ScalarValue {
    fn from(v: DateTime<Utc>) -> Self {
        ScalarValue::Date(v)
    }
}

// ===== Filter clauses =====

/// One filter predicate of a search request.
///
/// Sum type over the two wire shapes: scalar (one value) and vector (set
/// membership). Field names are validated against the target resource when
/// the clause enters the controller, not here; construction is infallible.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterClause {
    /// Single-value comparison.
    Scalar {
        /// Attribute to filter on.
        #[serde(rename = "parameter")]
        field: String,
        /// Comparison operator.
        #[serde(rename = "operator")]
        op: ScalarOp,
        /// Value to compare against.
        value: ScalarValue,
    },
    /// Set-membership test.
    Vector {
        /// Attribute to filter on.
        #[serde(rename = "parameter")]
        field: String,
        /// Membership operator.
        #[serde(rename = "operator")]
        op: VectorOp,
        /// Values forming the set.
        values: Vec<ScalarValue>,
    },
}

impl FilterClause {
    /// Build a scalar clause.
    pub fn scalar(field: impl Into<String>, op: ScalarOp, value: impl Into<ScalarValue>) -> Self {
        FilterClause::Scalar {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Build a vector clause.
    pub fn vector(
        field: impl Into<String>,
        op: VectorOp,
        values: impl IntoIterator<Item = ScalarValue>,
    ) -> Self {
        FilterClause::Vector {
            field: field.into(),
            op,
            values: values.into_iter().collect(),
        }
    }

    /// The attribute this clause filters on.
    pub fn field(&self) -> &str {
        match self {
            FilterClause::Scalar { field, .. } | FilterClause::Vector { field, .. } => field,
        }
    }
}

// ===== Sort clauses =====

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sorting on a single attribute.
///
/// A request carries an ordered sequence of these; the first clause is the
/// primary sort and later clauses break ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortClause {
    /// Attribute to sort by.
    #[serde(rename = "parameter")]
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortClause {
    /// Build a sort clause.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        SortClause {
            field: field.into(),
            direction,
        }
    }
}

#[cfg(test)]
#[path = "clause_tests.rs"]
mod tests;
