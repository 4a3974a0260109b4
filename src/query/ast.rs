use serde::{Deserialize, Serialize};

use super::filter::FilterExpr;
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One sort key. `{"field": "power"}` sorts ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByClause {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Browsing request from the storefront or the admin layer.
///
/// Rows come back in the catalog listing order (brand, series, voltage,
/// power for drives), re-sorted by `order_by` when present, then windowed by
/// `offset` and `limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// "Series" or "FrequencyDrive"
    pub entity: String,

    /// Every filter must hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterExpr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderByClause>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl Query {
    pub fn new(entity: &str) -> Self {
        Query {
            entity: entity.to_string(),
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Parse a query document, e.g. `{"entity": "Series", "limit": 10}`
    pub fn from_json(input: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(input)
            .map_err(|e| CatalogError::invalid("Query", "document", e.to_string()))
    }

    pub fn filter(mut self, expr: FilterExpr) -> Self {
        self.filters.push(expr);
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by.push(OrderByClause {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}
