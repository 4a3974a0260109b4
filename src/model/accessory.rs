use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::{AccessoryId, AccessoryTypeId, SeriesId};

/// Add-on equipment (filters, chokes, panels, ...) compatible with a set of series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    pub id: AccessoryId,
    pub article: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub accessory_type: AccessoryTypeId,
    #[serde(default)]
    pub series: BTreeSet<SeriesId>,
}

impl Accessory {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.article,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccessory {
    pub article: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub accessory_type: AccessoryTypeId,
    #[serde(default)]
    pub series: Vec<SeriesId>,
}
