use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::attributes::SeriesAttributes;
use super::ids::{ApplicationId, BrandId, CategoryId, FrequencyDriveId, SeriesId};
use super::reference::AssetPath;
use crate::choices::Voltage;

/// Product line of one brand sharing a common technical specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub brand: BrandId,
    pub name: String,
    pub category: CategoryId,
    #[serde(default)]
    pub image: Option<AssetPath>,
    #[serde(default)]
    pub applications: BTreeSet<ApplicationId>,
    #[serde(default)]
    pub attributes: SeriesAttributes,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSeries {
    pub brand: BrandId,
    pub name: String,
    pub category: CategoryId,
    #[serde(default)]
    pub image: Option<AssetPath>,
    #[serde(default)]
    pub applications: Vec<ApplicationId>,
    #[serde(default)]
    pub attributes: SeriesAttributes,
    #[serde(default)]
    pub description: String,
}

impl NewSeries {
    /// Draft with no optional data filled in.
    pub fn new(brand: BrandId, name: &str, category: CategoryId) -> Self {
        NewSeries {
            brand,
            name: name.to_string(),
            category,
            image: None,
            applications: Vec::new(),
            attributes: SeriesAttributes::default(),
            description: String::new(),
        }
    }
}

/// Concrete sellable drive model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDrive {
    pub id: FrequencyDriveId,
    pub article: String,
    #[serde(default)]
    pub name: Option<String>,
    pub series: SeriesId,
    /// Rated power, kW.
    pub power: f64,
    /// Rated output current, A.
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub voltage: Voltage,
}

impl FrequencyDrive {
    /// Name for listings; falls back to the article when no name is set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.article,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFrequencyDrive {
    pub article: String,
    #[serde(default)]
    pub name: Option<String>,
    pub series: SeriesId,
    pub power: f64,
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub voltage: Voltage,
}

impl NewFrequencyDrive {
    pub fn new(article: &str, series: SeriesId, power: f64) -> Self {
        NewFrequencyDrive {
            article: article.to_string(),
            name: None,
            series,
            power,
            current: None,
            voltage: Voltage::default(),
        }
    }
}
