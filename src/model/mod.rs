//! Catalog records.
//!
//! Stored records (`Supplier`, `Series`, ...) carry their id and hold
//! many-to-many links as sets on the owning side. Write drafts (`NewSupplier`,
//! `NewSeries`, ...) are what the administrative layer submits; the catalog
//! validates them before anything is stored.

pub mod accessory;
pub mod attributes;
pub mod ids;
pub mod party;
pub mod price;
pub mod product;
pub mod reference;

pub use accessory::{Accessory, NewAccessory};
pub use attributes::{
    attribute_descriptor, attribute_descriptors, choice_label, AttributeDescriptor,
    AttributeKind, AttributeValue, SeriesAttributes,
};
pub use ids::*;
pub use party::{Brand, NewBrand, NewSupplier, Supplier};
pub use price::{NewPrice, Price, PricedItem, Quote};
pub use product::{FrequencyDrive, NewFrequencyDrive, NewSeries, Series};
pub use reference::{AccessoryType, Application, AssetPath, Category, Country, EquipmentLine, NamedRecord};
