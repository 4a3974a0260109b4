use serde::Serialize;

use super::Catalog;
use crate::error::CatalogError;
use crate::model::*;

/// One rendered line of a series specification sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecLine {
    pub field: &'static str,
    pub display_name: &'static str,
    pub value: String,
}

impl Catalog {
    /// "<brand> <series>", e.g. "Danfoss VLT".
    pub fn series_display_name(&self, id: SeriesId) -> Result<String, CatalogError> {
        let series = self.series.require(id)?;
        let brand = self.brands.require(series.brand)?;
        Ok(format!("{} {}", brand.name, series.name))
    }

    /// Every attribute of a series that has a value, rendered with its label.
    /// Unset attributes are left out.
    pub fn series_spec_sheet(&self, id: SeriesId) -> Result<Vec<SpecLine>, CatalogError> {
        let series = self.series.require(id)?;
        Ok(series
            .attributes
            .present()
            .into_iter()
            .filter_map(|(descriptor, value)| {
                descriptor.label_for(value).map(|label| SpecLine {
                    field: descriptor.name,
                    display_name: descriptor.display_name,
                    value: label,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{ControlMethods, Humidity};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spec_sheet_renders_labels() {
        let mut catalog = Catalog::new();
        let de = catalog.create_country("Germany").unwrap();
        let brand = catalog
            .create_brand(NewBrand {
                name: "Danfoss".into(),
                site: String::new(),
                country: de,
                description: String::new(),
                logo: None,
                equipment_lines: vec![],
                suppliers: vec![],
            })
            .unwrap();
        let category = catalog.create_category("General").unwrap();
        let mut draft = NewSeries::new(brand, "VLT", category);
        draft.attributes.control_methods = Some(ControlMethods::ScalarSensorless);
        draft.attributes.use_relative_humidity = Some(Humidity::Max95);
        draft.attributes.sleep_mode = Some(false);
        draft.attributes.pid_controller = Some(1);
        let id = catalog.create_series(draft).unwrap();

        assert_eq!(catalog.series_display_name(id).unwrap(), "Danfoss VLT");

        let sheet = catalog.series_spec_sheet(id).unwrap();
        let fields: Vec<&str> = sheet.iter().map(|l| l.field).collect();
        assert_eq!(
            fields,
            vec!["control_methods", "use_relative_humidity", "sleep_mode", "pid_controller"]
        );
        assert_eq!(sheet[0].value, ControlMethods::ScalarSensorless.label());
        assert_eq!(sheet[1].value, Humidity::Max95.label());
        assert_eq!(sheet[2].value, "Нет");
        assert_eq!(sheet[3].value, "1");
    }

    #[test]
    fn test_missing_series() {
        let catalog = Catalog::new();
        assert!(matches!(
            catalog.series_spec_sheet(SeriesId(4)),
            Err(CatalogError::NotFound { .. })
        ));
    }
}
