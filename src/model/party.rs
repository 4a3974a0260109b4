use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::{BrandId, CountryId, EquipmentLineId, SupplierId};
use super::reference::AssetPath;
use crate::choices::Currency;

/// Company selling equipment, quoting prices in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub site: String,
    pub country: CountryId,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub site: String,
    pub country: CountryId,
    pub currency: Currency,
}

/// Equipment manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub site: String,
    pub country: CountryId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<AssetPath>,
    #[serde(default)]
    pub equipment_lines: BTreeSet<EquipmentLineId>,
    #[serde(default)]
    pub suppliers: BTreeSet<SupplierId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBrand {
    pub name: String,
    pub site: String,
    pub country: CountryId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: Option<AssetPath>,
    #[serde(default)]
    pub equipment_lines: Vec<EquipmentLineId>,
    #[serde(default)]
    pub suppliers: Vec<SupplierId>,
}

