use serde::{Deserialize, Serialize};
use std::fmt;

/// Right-hand side of a condition, written as the bare JSON value:
/// `"VLT"`, `3`, `2.2`, `true`, `null`, `[1, 2]`.
///
/// Coded attributes compare by code, flags by bool, drive voltage by volts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FilterValue>),
    Null,
}

impl FilterValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Int(n) => Some(*n as f64),
            FilterValue::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Float(x) => write!(f, "{}", x),
            FilterValue::String(s) => write!(f, "'{}'", s),
            FilterValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
            FilterValue::Null => f.write_str("NULL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `%` matches any run, `_` one character; case-insensitive.
    Like,
    /// Value must be a list.
    In,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

/// Dotted path from the queried entity to a column, e.g. `brand.country.name`.
///
/// Travels as the dotted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    pub segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        FieldPath {
            segments: path.split('.').map(|s| s.trim().to_string()).collect(),
        }
    }

    /// True when the path leaves the queried entity (`brand.name` on Series).
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn root(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::parse(&path)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> String {
        path.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: FieldPath,
    pub op: ComparisonOp,
    #[serde(default = "null_value")]
    pub value: FilterValue,
}

fn null_value() -> FilterValue {
    FilterValue::Null
}

/// `{"condition": {...}}` or `{"binary": {"left": ..., "op": "or", "right": ...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterExpr {
    Condition(FilterCondition),
    Binary {
        left: Box<FilterExpr>,
        op: LogicalOp,
        right: Box<FilterExpr>,
    },
}

impl FilterExpr {
    pub fn condition(field: &str, op: ComparisonOp, value: FilterValue) -> Self {
        FilterExpr::Condition(FilterCondition {
            field: FieldPath::parse(field),
            op,
            value,
        })
    }

    pub fn and(self, other: FilterExpr) -> Self {
        self.combine(LogicalOp::And, other)
    }

    pub fn or(self, other: FilterExpr) -> Self {
        self.combine(LogicalOp::Or, other)
    }

    fn combine(self, op: LogicalOp, other: FilterExpr) -> Self {
        FilterExpr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(other),
        }
    }
}
