//! Catalog configuration.
//!
//! Column widths default to the ones the catalog has always used; a JSON file
//! can override any subset. `VFD_CATALOG_CONFIG` points at that file and
//! `VFD_CATALOG_SNAPSHOT` overrides where the snapshot lives.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

pub const CONFIG_ENV: &str = "VFD_CATALOG_CONFIG";
pub const SNAPSHOT_ENV: &str = "VFD_CATALOG_SNAPSHOT";

/// Maximum lengths of text columns, in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub country_name: usize,
    pub equipment_line_name: usize,
    pub supplier_name: usize,
    pub supplier_site: usize,
    pub brand_name: usize,
    pub brand_site: usize,
    /// Application, category, accessory type and series names.
    pub label_name: usize,
    pub article: usize,
    /// Free-form names of drive models and accessories.
    pub product_name: usize,
    /// Brand logos and series images.
    pub asset_path: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        FieldLimits {
            country_name: 30,
            equipment_line_name: 50,
            supplier_name: 50,
            supplier_site: 100,
            brand_name: 200,
            brand_site: 150,
            label_name: 200,
            article: 30,
            product_name: 200,
            asset_path: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub limits: FieldLimits,
    /// JSON snapshot the catalog is loaded from and saved to.
    pub snapshot_path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn from_json_str(input: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(input).map_err(|e| CatalogError::Config(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("reading {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// Build the configuration from the process environment.
    ///
    /// Without `VFD_CATALOG_CONFIG` the defaults apply. An empty
    /// `VFD_CATALOG_SNAPSHOT` is ignored.
    pub fn from_env() -> Result<Self, CatalogError> {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim()))?,
            _ => CatalogConfig::default(),
        };
        if let Ok(snapshot) = env::var(SNAPSHOT_ENV) {
            if !snapshot.trim().is_empty() {
                config.snapshot_path = Some(PathBuf::from(snapshot.trim()));
            }
        }
        Ok(config)
    }
}
