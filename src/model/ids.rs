use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier of one catalog table.
///
/// Each table gets its own newtype so a supplier id can never be passed where
/// a brand id is expected.
pub trait EntityId: Copy + Ord + fmt::Debug + fmt::Display {
    /// Entity name as it appears in the schema and in errors.
    const ENTITY: &'static str;

    fn from_raw(raw: u32) -> Self;

    fn raw(self) -> u32;
}

macro_rules! entity_id {
    ($( $(#[$meta:meta])* $name:ident => $entity:literal ),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub u32);

            impl EntityId for $name {
                const ENTITY: &'static str = $entity;

                fn from_raw(raw: u32) -> Self {
                    $name(raw)
                }

                fn raw(self) -> u32 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )+
    };
}

entity_id! {
    CountryId => "Country",
    EquipmentLineId => "EquipmentLine",
    SupplierId => "Supplier",
    BrandId => "Brand",
    ApplicationId => "Application",
    CategoryId => "Category",
    SeriesId => "Series",
    FrequencyDriveId => "FrequencyDrive",
    AccessoryTypeId => "AccessoryType",
    AccessoryId => "Accessory",
    PriceId => "Price",
}
