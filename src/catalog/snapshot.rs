//! JSON snapshots of the whole catalog.
//!
//! Loading replays every row through the same checks as a live write, in
//! dependency order, so a hand-edited snapshot cannot smuggle in a dangling
//! reference or a duplicate name.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use super::{duplicate_name, name_taken, required_text, Catalog, Table};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::model::*;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Every table of the catalog, rows in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u32,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub equipment_lines: Vec<EquipmentLine>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub accessory_types: Vec<AccessoryType>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub frequency_drives: Vec<FrequencyDrive>,
    #[serde(default)]
    pub accessories: Vec<Accessory>,
    #[serde(default)]
    pub prices: Vec<Price>,
}

fn snapshot_error(context: impl std::fmt::Display, err: impl std::fmt::Display) -> CatalogError {
    CatalogError::Snapshot(format!("{}: {}", context, err))
}

fn restore_named<I: EntityId>(
    table: &mut Table<I, NamedRecord<I>>,
    rows: Vec<NamedRecord<I>>,
    max: usize,
) -> Result<(), CatalogError> {
    for row in rows {
        let name = required_text(I::ENTITY, "name", &row.name, max)?;
        if name_taken(table.values().map(|r| (r.id, r.name.as_str())), &name, None) {
            return Err(duplicate_name(I::ENTITY, &name));
        }
        table.restore(row.id, NamedRecord { id: row.id, name })?;
    }
    Ok(())
}

impl Catalog {
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            version: SNAPSHOT_VERSION,
            countries: self.countries.values().cloned().collect(),
            equipment_lines: self.equipment_lines.values().cloned().collect(),
            applications: self.applications.values().cloned().collect(),
            categories: self.categories.values().cloned().collect(),
            accessory_types: self.accessory_types.values().cloned().collect(),
            suppliers: self.suppliers.values().cloned().collect(),
            brands: self.brands.values().cloned().collect(),
            series: self.series.values().cloned().collect(),
            frequency_drives: self.drives.values().cloned().collect(),
            accessories: self.accessories.values().cloned().collect(),
            prices: self.prices.values().cloned().collect(),
        }
    }

    /// Rebuild a catalog from a snapshot, validating every row.
    pub fn from_snapshot(
        snapshot: CatalogSnapshot,
        config: CatalogConfig,
    ) -> Result<Self, CatalogError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CatalogError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        let mut catalog = Catalog::with_config(config);
        let limits = catalog.config.limits.clone();

        restore_named(&mut catalog.countries, snapshot.countries, limits.country_name)?;
        restore_named(
            &mut catalog.equipment_lines,
            snapshot.equipment_lines,
            limits.equipment_line_name,
        )?;
        restore_named(&mut catalog.applications, snapshot.applications, limits.label_name)?;
        restore_named(&mut catalog.categories, snapshot.categories, limits.label_name)?;
        restore_named(&mut catalog.accessory_types, snapshot.accessory_types, limits.label_name)?;

        for row in snapshot.suppliers {
            let draft = catalog.check_supplier(
                &NewSupplier {
                    name: row.name,
                    site: row.site,
                    country: row.country,
                    currency: row.currency,
                },
                None,
            )?;
            let supplier = Supplier {
                id: row.id,
                name: draft.name,
                site: draft.site,
                country: draft.country,
                currency: draft.currency,
            };
            catalog.suppliers.restore(row.id, supplier)?;
        }

        for row in snapshot.brands {
            let draft = NewBrand {
                name: row.name,
                site: row.site,
                country: row.country,
                description: row.description,
                logo: row.logo,
                equipment_lines: row.equipment_lines.into_iter().collect(),
                suppliers: row.suppliers.into_iter().collect(),
            };
            let brand = catalog.check_brand(&draft, None)?;
            catalog.brands.restore(row.id, Brand { id: row.id, ..brand })?;
        }

        for row in snapshot.series {
            let draft = NewSeries {
                brand: row.brand,
                name: row.name,
                category: row.category,
                image: row.image,
                applications: row.applications.into_iter().collect(),
                attributes: row.attributes,
                description: row.description,
            };
            let series = catalog.check_series(&draft, None)?;
            catalog.series.restore(row.id, Series { id: row.id, ..series })?;
        }

        for row in snapshot.frequency_drives {
            let draft = NewFrequencyDrive {
                article: row.article,
                name: row.name,
                series: row.series,
                power: row.power,
                current: row.current,
                voltage: row.voltage,
            };
            let drive = catalog.check_drive(&draft, None)?;
            catalog.drives.restore(row.id, FrequencyDrive { id: row.id, ..drive })?;
        }

        for row in snapshot.accessories {
            let draft = NewAccessory {
                article: row.article,
                name: row.name,
                accessory_type: row.accessory_type,
                series: row.series.into_iter().collect(),
            };
            let accessory = catalog.check_accessory(&draft, None)?;
            catalog
                .accessories
                .restore(row.id, Accessory { id: row.id, ..accessory })?;
        }

        for row in snapshot.prices {
            let draft = NewPrice {
                frequency_drive: row.item.frequency_drive(),
                accessory: row.item.accessory(),
                supplier: row.supplier,
                price: row.price,
            };
            let price = catalog.check_price(&draft, None)?;
            catalog.prices.restore(row.id, Price { id: row.id, ..price })?;
        }

        Ok(catalog)
    }

    /// Write the catalog as pretty JSON. The file is replaced atomically.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| snapshot_error("serializing catalog", e))?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| snapshot_error(staging.display(), e))?;
        fs::rename(&staging, path).map_err(|e| snapshot_error(path.display(), e))?;
        info!(path = %path.display(), rows = ?self.row_counts(), "snapshot saved");
        Ok(())
    }

    pub fn load_snapshot(path: &Path, config: CatalogConfig) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|e| snapshot_error(path.display(), e))?;
        let snapshot: CatalogSnapshot =
            serde_json::from_str(&raw).map_err(|e| snapshot_error(path.display(), e))?;
        let catalog = Catalog::from_snapshot(snapshot, config)?;
        info!(path = %path.display(), rows = ?catalog.row_counts(), "snapshot loaded");
        Ok(catalog)
    }
}
