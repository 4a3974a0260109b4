use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccessoryId, EntityId, FrequencyDriveId, PriceId, SupplierId};
use crate::choices::Currency;
use crate::error::CatalogError;

/// The product a price row is about. Exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PricedItem {
    FrequencyDrive(FrequencyDriveId),
    Accessory(AccessoryId),
}

impl PricedItem {
    /// Build the item from the two optional references of a price form.
    ///
    /// Both set or neither set is an `InvalidPriceBinding`.
    pub fn from_refs(
        frequency_drive: Option<FrequencyDriveId>,
        accessory: Option<AccessoryId>,
    ) -> Result<Self, CatalogError> {
        match (frequency_drive, accessory) {
            (Some(drive), None) => Ok(PricedItem::FrequencyDrive(drive)),
            (None, Some(accessory)) => Ok(PricedItem::Accessory(accessory)),
            (Some(_), Some(_)) => Err(CatalogError::InvalidPriceBinding(
                "both frequency_drive and accessory are set".to_string(),
            )),
            (None, None) => Err(CatalogError::InvalidPriceBinding(
                "neither frequency_drive nor accessory is set".to_string(),
            )),
        }
    }

    pub fn frequency_drive(self) -> Option<FrequencyDriveId> {
        match self {
            PricedItem::FrequencyDrive(id) => Some(id),
            PricedItem::Accessory(_) => None,
        }
    }

    pub fn accessory(self) -> Option<AccessoryId> {
        match self {
            PricedItem::Accessory(id) => Some(id),
            PricedItem::FrequencyDrive(_) => None,
        }
    }
}

impl fmt::Display for PricedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricedItem::FrequencyDrive(id) => write!(f, "{} {}", FrequencyDriveId::ENTITY, id),
            PricedItem::Accessory(id) => write!(f, "{} {}", AccessoryId::ENTITY, id),
        }
    }
}

/// Current price of one product from one supplier, in the supplier's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub id: PriceId,
    pub item: PricedItem,
    pub supplier: SupplierId,
    pub price: Decimal,
}

/// Price form as submitted: two optional product references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrice {
    #[serde(default)]
    pub frequency_drive: Option<FrequencyDriveId>,
    #[serde(default)]
    pub accessory: Option<AccessoryId>,
    pub supplier: SupplierId,
    pub price: Decimal,
}

impl NewPrice {
    pub fn for_drive(drive: FrequencyDriveId, supplier: SupplierId, price: Decimal) -> Self {
        NewPrice {
            frequency_drive: Some(drive),
            accessory: None,
            supplier,
            price,
        }
    }

    pub fn for_accessory(accessory: AccessoryId, supplier: SupplierId, price: Decimal) -> Self {
        NewPrice {
            frequency_drive: None,
            accessory: Some(accessory),
            supplier,
            price,
        }
    }
}

/// A resolved offer: price plus the currency it is quoted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub supplier: SupplierId,
    pub supplier_name: String,
    pub price: Decimal,
    pub currency: Currency,
}
