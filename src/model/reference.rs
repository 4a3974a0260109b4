use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccessoryTypeId, ApplicationId, CategoryId, CountryId, EquipmentLineId};

/// Row of a name-only reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord<I> {
    pub id: I,
    pub name: String,
}

impl<I> fmt::Display for NamedRecord<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub type Country = NamedRecord<CountryId>;
/// Kind of equipment a brand manufactures (drives, PLCs, servo, ...).
pub type EquipmentLine = NamedRecord<EquipmentLineId>;
/// Field of use of a series (HVAC, pumps, conveyors, ...).
pub type Application = NamedRecord<ApplicationId>;
pub type Category = NamedRecord<CategoryId>;
pub type AccessoryType = NamedRecord<AccessoryTypeId>;

/// Reference to a binary asset held by the file-storage collaborator.
///
/// The catalog never sees the bytes, only this relative path
/// (e.g. `logos/danfoss.png`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetPath(pub String);

impl AssetPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
