pub mod catalog;
pub mod choices;
pub mod config;
pub mod error;
pub mod ffi;
pub mod model;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod sql;

pub use catalog::{Catalog, CatalogSnapshot, SpecLine};
pub use config::{CatalogConfig, FieldLimits};
pub use error::CatalogError;
pub use model::*;
pub use mutation::apply_mutation;
pub use query::Query;
pub use schema::{catalog_schema, schema_with_limits, Schema};
pub use sql::{generate_ddl, GeneratedDdl};

// Re-export FFI functions for external use
pub use ffi::{
    vfd_catalog_apply_mutation,
    vfd_catalog_choice_label,
    vfd_catalog_free_string,
    vfd_catalog_generate_ddl,
    vfd_catalog_init,
    vfd_catalog_query,
    vfd_catalog_reset,
    vfd_catalog_save,
    vfd_catalog_version,
    VfdResult,
};
