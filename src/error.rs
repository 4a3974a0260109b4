use serde::Serialize;
use thiserror::Error;

/// Every way a catalog write or lookup can be rejected.
///
/// Serialized as `{"kind": ..., "data": ...}` so the administrative layer on
/// the other side of the C boundary can branch on the kind.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum CatalogError {
    #[error("{entity} named '{name}' already exists")]
    DuplicateName { entity: String, name: String },

    #[error("{entity} with article '{article}' already exists")]
    DuplicateArticle { entity: String, article: String },

    #[error("Supplier {supplier} already quotes {item}")]
    DuplicatePrice { supplier: u32, item: String },

    #[error("Cannot delete {entity} {id}: still referenced by {referenced_by}")]
    ReferentialIntegrity {
        entity: String,
        id: u32,
        referenced_by: String,
    },

    #[error("Value '{value}' is not a valid choice for '{field}'")]
    InvalidChoice { field: String, value: String },

    #[error("{entity}.{field} is required")]
    MissingRequiredField { entity: String, field: String },

    #[error("Invalid price binding: {0}")]
    InvalidPriceBinding(String),

    #[error("Invalid value for {entity}.{field}: {reason}")]
    InvalidValue {
        entity: String,
        field: String,
        reason: String,
    },

    #[error("{entity}.{field} exceeds {max} characters")]
    FieldTooLong {
        entity: String,
        field: String,
        max: usize,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: u32 },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Unknown field '{field}' in entity '{entity}'")]
    UnknownField { entity: String, field: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl CatalogError {
    pub(crate) fn missing(entity: &str, field: &str) -> Self {
        CatalogError::MissingRequiredField {
            entity: entity.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(entity: &str, field: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidValue {
            entity: entity.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(entity: &str, id: u32) -> Self {
        CatalogError::NotFound {
            entity: entity.to_string(),
            id,
        }
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::DuplicateName { .. } => "DuplicateName",
            CatalogError::DuplicateArticle { .. } => "DuplicateArticle",
            CatalogError::DuplicatePrice { .. } => "DuplicatePrice",
            CatalogError::ReferentialIntegrity { .. } => "ReferentialIntegrity",
            CatalogError::InvalidChoice { .. } => "InvalidChoice",
            CatalogError::MissingRequiredField { .. } => "MissingRequiredField",
            CatalogError::InvalidPriceBinding(_) => "InvalidPriceBinding",
            CatalogError::InvalidValue { .. } => "InvalidValue",
            CatalogError::FieldTooLong { .. } => "FieldTooLong",
            CatalogError::NotFound { .. } => "NotFound",
            CatalogError::UnknownEntity(_) => "UnknownEntity",
            CatalogError::UnknownField { .. } => "UnknownField",
            CatalogError::Config(_) => "Config",
            CatalogError::Snapshot(_) => "Snapshot",
        }
    }
}
