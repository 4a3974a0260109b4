//! In-memory authoritative catalog store.
//!
//! Every write goes through a `Catalog` method that validates the draft,
//! checks uniqueness and foreign keys, and only then touches a table. Deletes
//! are rejected while any other row still points at the target
//! (protect-on-delete); links owned by the deleted row go with it.

mod accessory;
mod display;
mod party;
mod pricing;
mod product;
mod reference;
mod snapshot;

pub use display::SpecLine;
pub use snapshot::{CatalogSnapshot, SNAPSHOT_VERSION};

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::*;

/// Rows of one table keyed by their typed id.
#[derive(Debug, Clone)]
pub(crate) struct Table<I, T> {
    rows: BTreeMap<I, T>,
    next_id: u32,
}

impl<I: EntityId, T> Default for Table<I, T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<I: EntityId, T> Table<I, T> {
    /// Allocate the next id and store the row built for it.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(I) -> T) -> Result<I, CatalogError> {
        let next = self.next_id.checked_add(1).ok_or_else(|| {
            CatalogError::invalid(I::ENTITY, "id", format!("id space exhausted at {}", self.next_id))
        })?;
        let id = I::from_raw(self.next_id);
        self.next_id = next;
        self.rows.insert(id, build(id));
        Ok(id)
    }

    /// Put back a row under an id it already had.
    ///
    /// Id 0 is never allocated and `u32::MAX` would leave no room for the
    /// next insert, so both are refused along with clashes.
    pub(crate) fn restore(&mut self, id: I, row: T) -> Result<(), CatalogError> {
        let raw = id.raw();
        if raw == 0 || raw == u32::MAX {
            return Err(CatalogError::Snapshot(format!("invalid {} id {}", I::ENTITY, raw)));
        }
        if self.rows.contains_key(&id) {
            return Err(CatalogError::Snapshot(format!("duplicate {} id {}", I::ENTITY, raw)));
        }
        self.next_id = self.next_id.max(raw + 1);
        self.rows.insert(id, row);
        Ok(())
    }

    pub(crate) fn get(&self, id: I) -> Option<&T> {
        self.rows.get(&id)
    }

    pub(crate) fn require(&self, id: I) -> Result<&T, CatalogError> {
        self.rows
            .get(&id)
            .ok_or_else(|| CatalogError::not_found(I::ENTITY, id.raw()))
    }

    pub(crate) fn require_mut(&mut self, id: I) -> Result<&mut T, CatalogError> {
        self.rows
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(I::ENTITY, id.raw()))
    }

    pub(crate) fn remove(&mut self, id: I) -> Option<T> {
        self.rows.remove(&id)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The whole catalog: reference data, trade parties, products and prices.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    config: CatalogConfig,
    countries: Table<CountryId, Country>,
    equipment_lines: Table<EquipmentLineId, EquipmentLine>,
    applications: Table<ApplicationId, Application>,
    categories: Table<CategoryId, Category>,
    accessory_types: Table<AccessoryTypeId, AccessoryType>,
    suppliers: Table<SupplierId, Supplier>,
    brands: Table<BrandId, Brand>,
    series: Table<SeriesId, Series>,
    drives: Table<FrequencyDriveId, FrequencyDrive>,
    accessories: Table<AccessoryId, Accessory>,
    prices: Table<PriceId, Price>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Catalog {
            config,
            ..Catalog::default()
        }
    }

    /// Open the catalog described by `config`: load its snapshot when the file
    /// exists, start empty otherwise.
    pub fn open(config: CatalogConfig) -> Result<Self, CatalogError> {
        match config.snapshot_path.clone() {
            Some(path) if path.exists() => Catalog::load_snapshot(&path, config),
            Some(path) => {
                info!(path = %path.display(), "snapshot not found, starting with an empty catalog");
                Ok(Catalog::with_config(config))
            }
            None => Ok(Catalog::with_config(config)),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Number of rows per table, keyed by entity name.
    pub fn row_counts(&self) -> BTreeMap<&'static str, usize> {
        BTreeMap::from([
            (CountryId::ENTITY, self.countries.len()),
            (EquipmentLineId::ENTITY, self.equipment_lines.len()),
            (ApplicationId::ENTITY, self.applications.len()),
            (CategoryId::ENTITY, self.categories.len()),
            (AccessoryTypeId::ENTITY, self.accessory_types.len()),
            (SupplierId::ENTITY, self.suppliers.len()),
            (BrandId::ENTITY, self.brands.len()),
            (SeriesId::ENTITY, self.series.len()),
            (FrequencyDriveId::ENTITY, self.drives.len()),
            (AccessoryId::ENTITY, self.accessories.len()),
            (PriceId::ENTITY, self.prices.len()),
        ])
    }
}

// ─── VALIDATION HELPERS ───

/// Trim a required text field and check its length.
pub(crate) fn required_text(
    entity: &str,
    field: &str,
    value: &str,
    max: usize,
) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::missing(entity, field));
    }
    check_length(entity, field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Trim a text field that may be left empty.
pub(crate) fn plain_text(
    entity: &str,
    field: &str,
    value: &str,
    max: usize,
) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    check_length(entity, field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
pub(crate) fn optional_text(
    entity: &str,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, CatalogError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => {
            check_length(entity, field, text, max)?;
            Ok(Some(text.to_string()))
        }
        _ => Ok(None),
    }
}

fn check_length(entity: &str, field: &str, value: &str, max: usize) -> Result<(), CatalogError> {
    if value.chars().count() > max {
        return Err(CatalogError::FieldTooLong {
            entity: entity.to_string(),
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Asset references are relative paths inside the file store.
pub(crate) fn asset_path(
    entity: &str,
    field: &str,
    value: Option<&AssetPath>,
    max: usize,
) -> Result<Option<AssetPath>, CatalogError> {
    let Some(path) = value.map(|p| p.as_str().trim()) else {
        return Ok(None);
    };
    if path.is_empty() {
        return Ok(None);
    }
    if path.starts_with('/') || path.split('/').any(|segment| segment == "..") {
        return Err(CatalogError::invalid(
            entity,
            field,
            format!("'{}' must be a relative path inside the file store", path),
        ));
    }
    check_length(entity, field, path, max)?;
    Ok(Some(AssetPath(path.to_string())))
}

pub(crate) fn positive(entity: &str, field: &str, value: f64) -> Result<f64, CatalogError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CatalogError::invalid(
            entity,
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(value)
}

/// True when another row (not `except`) already uses `name`.
pub(crate) fn name_taken<'a, I: EntityId + 'a>(
    mut rows: impl Iterator<Item = (I, &'a str)>,
    name: &str,
    except: Option<I>,
) -> bool {
    rows.any(|(id, existing)| existing == name && Some(id) != except)
}

pub(crate) fn duplicate_name(entity: &str, name: &str) -> CatalogError {
    warn!(entity, name, "rejected duplicate name");
    CatalogError::DuplicateName {
        entity: entity.to_string(),
        name: name.to_string(),
    }
}

pub(crate) fn duplicate_article(entity: &str, article: &str) -> CatalogError {
    warn!(entity, article, "rejected duplicate article");
    CatalogError::DuplicateArticle {
        entity: entity.to_string(),
        article: article.to_string(),
    }
}

/// Fail with `ReferentialIntegrity` when `referenced_by` names a dependent table.
pub(crate) fn protect<I: EntityId>(id: I, referenced_by: Option<&str>) -> Result<(), CatalogError> {
    match referenced_by {
        Some(dependent) => {
            warn!(entity = I::ENTITY, %id, dependent, "rejected delete of referenced row");
            Err(CatalogError::ReferentialIntegrity {
                entity: I::ENTITY.to_string(),
                id: id.raw(),
                referenced_by: dependent.to_string(),
            })
        }
        None => Ok(()),
    }
}

/// Every id in `ids` must exist in `table`; duplicates collapse.
pub(crate) fn existing_ids<I: EntityId, T>(
    table: &Table<I, T>,
    ids: impl IntoIterator<Item = I>,
) -> Result<std::collections::BTreeSet<I>, CatalogError> {
    let mut set = std::collections::BTreeSet::new();
    for id in ids {
        table.require(id)?;
        set.insert(id);
    }
    Ok(set)
}
