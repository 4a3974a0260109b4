use std::cmp::Ordering;
use tracing::{debug, info, warn};

use super::{
    asset_path, duplicate_article, duplicate_name, existing_ids, name_taken, optional_text,
    positive, protect, required_text, Catalog,
};
use crate::error::CatalogError;
use crate::model::*;

const SERIES: &str = SeriesId::ENTITY;
const DRIVE: &str = FrequencyDriveId::ENTITY;

impl Catalog {
    pub(crate) fn check_series(
        &self,
        draft: &NewSeries,
        except: Option<SeriesId>,
    ) -> Result<Series, CatalogError> {
        let name = required_text(SERIES, "name", &draft.name, self.config.limits.label_name)?;
        self.brands.require(draft.brand)?;
        self.categories.require(draft.category)?;
        let image = asset_path(SERIES, "image", draft.image.as_ref(), self.config.limits.asset_path)?;
        let applications = existing_ids(&self.applications, draft.applications.iter().copied())?;
        if name_taken(
            self.series.values().map(|s| (s.id, s.name.as_str())),
            &name,
            except,
        ) {
            return Err(duplicate_name(SERIES, &name));
        }
        Ok(Series {
            id: except.unwrap_or(SeriesId(0)),
            brand: draft.brand,
            name,
            category: draft.category,
            image,
            applications,
            attributes: draft.attributes.clone(),
            description: draft.description.trim().to_string(),
        })
    }

    pub fn create_series(&mut self, draft: NewSeries) -> Result<SeriesId, CatalogError> {
        let series = self.check_series(&draft, None)?;
        let id = self.series.insert_with(|id| Series { id, ..series })?;
        debug!(entity = SERIES, %id, "created");
        Ok(id)
    }

    /// Replace every column of a series, including all technical attributes.
    pub fn update_series(&mut self, id: SeriesId, draft: NewSeries) -> Result<(), CatalogError> {
        self.series.require(id)?;
        let series = self.check_series(&draft, Some(id))?;
        *self.series.require_mut(id)? = series;
        debug!(entity = SERIES, %id, "updated");
        Ok(())
    }

    /// Set or clear one technical attribute by field name.
    pub fn set_series_attribute(
        &mut self,
        id: SeriesId,
        field: &str,
        value: Option<AttributeValue>,
    ) -> Result<(), CatalogError> {
        let series = self.series.require_mut(id)?;
        series.attributes.set(field, value).map_err(|err| {
            warn!(%id, field, error = %err, "rejected attribute value");
            err
        })?;
        debug!(entity = SERIES, %id, field, "attribute set");
        Ok(())
    }

    pub fn series(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id)
    }

    pub fn series_by_name(&self, name: &str) -> Option<&Series> {
        let name = name.trim();
        self.series.values().find(|s| s.name == name)
    }

    /// All series ordered by brand name, then series name.
    pub fn all_series(&self) -> Vec<&Series> {
        let mut rows: Vec<_> = self.series.values().collect();
        rows.sort_by(|a, b| self.series_order(a, b));
        rows
    }

    /// Series of one brand, ordered by name.
    pub fn brand_series(&self, brand: BrandId) -> Result<Vec<&Series>, CatalogError> {
        self.brands.require(brand)?;
        let mut rows: Vec<_> = self.series.values().filter(|s| s.brand == brand).collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    pub(crate) fn series_order(&self, a: &Series, b: &Series) -> Ordering {
        let brand_name = |s: &Series| self.brands.get(s.brand).map(|b| b.name.as_str());
        brand_name(a)
            .cmp(&brand_name(b))
            .then_with(|| a.name.cmp(&b.name))
    }

    /// Delete a series no drive or accessory refers to. Its application links go with it.
    pub fn delete_series(&mut self, id: SeriesId) -> Result<(), CatalogError> {
        self.series.require(id)?;
        let referenced_by = if self.drives.values().any(|d| d.series == id) {
            Some(DRIVE)
        } else if self.accessories.values().any(|a| a.series.contains(&id)) {
            Some(AccessoryId::ENTITY)
        } else {
            None
        };
        protect(id, referenced_by)?;
        self.series.remove(id);
        info!(entity = SERIES, %id, "deleted");
        Ok(())
    }

    pub fn link_series_application(
        &mut self,
        series: SeriesId,
        application: ApplicationId,
    ) -> Result<bool, CatalogError> {
        self.applications.require(application)?;
        let added = self.series.require_mut(series)?.applications.insert(application);
        debug!(%series, %application, added, "linked series to application");
        Ok(added)
    }

    pub fn unlink_series_application(
        &mut self,
        series: SeriesId,
        application: ApplicationId,
    ) -> Result<bool, CatalogError> {
        let removed = self.series.require_mut(series)?.applications.remove(&application);
        debug!(%series, %application, removed, "unlinked series from application");
        Ok(removed)
    }

    /// Applications of a series, ordered by name.
    pub fn series_applications(&self, id: SeriesId) -> Result<Vec<&Application>, CatalogError> {
        let series = self.series.require(id)?;
        Ok(super::party::resolve_sorted(
            &series.applications,
            &self.applications,
            |a| a.name.as_str(),
        ))
    }

    // ─── FREQUENCY DRIVE ───

    pub(crate) fn check_drive(
        &self,
        draft: &NewFrequencyDrive,
        except: Option<FrequencyDriveId>,
    ) -> Result<FrequencyDrive, CatalogError> {
        let limits = &self.config.limits;
        let article = required_text(DRIVE, "article", &draft.article, limits.article)?;
        let name = optional_text(DRIVE, "name", draft.name.as_deref(), limits.product_name)?;
        self.series.require(draft.series)?;
        let power = positive(DRIVE, "power", draft.power)?;
        let current = draft
            .current
            .map(|current| positive(DRIVE, "current", current))
            .transpose()?;
        if name_taken(
            self.drives.values().map(|d| (d.id, d.article.as_str())),
            &article,
            except,
        ) {
            return Err(duplicate_article(DRIVE, &article));
        }
        Ok(FrequencyDrive {
            id: except.unwrap_or(FrequencyDriveId(0)),
            article,
            name,
            series: draft.series,
            power,
            current,
            voltage: draft.voltage,
        })
    }

    pub fn create_drive(&mut self, draft: NewFrequencyDrive) -> Result<FrequencyDriveId, CatalogError> {
        let drive = self.check_drive(&draft, None)?;
        let id = self.drives.insert_with(|id| FrequencyDrive { id, ..drive })?;
        debug!(entity = DRIVE, %id, "created");
        Ok(id)
    }

    pub fn update_drive(
        &mut self,
        id: FrequencyDriveId,
        draft: NewFrequencyDrive,
    ) -> Result<(), CatalogError> {
        self.drives.require(id)?;
        let drive = self.check_drive(&draft, Some(id))?;
        *self.drives.require_mut(id)? = drive;
        debug!(entity = DRIVE, %id, "updated");
        Ok(())
    }

    pub fn drive(&self, id: FrequencyDriveId) -> Option<&FrequencyDrive> {
        self.drives.get(id)
    }

    pub fn drive_by_article(&self, article: &str) -> Option<&FrequencyDrive> {
        let article = article.trim();
        self.drives.values().find(|d| d.article == article)
    }

    /// All drives ordered by brand, series, voltage, then power.
    pub fn drives(&self) -> Vec<&FrequencyDrive> {
        let mut rows: Vec<_> = self.drives.values().collect();
        rows.sort_by(|a, b| self.drive_order(a, b));
        rows
    }

    /// Drives of one series, ordered by voltage then power.
    pub fn series_drives(&self, series: SeriesId) -> Result<Vec<&FrequencyDrive>, CatalogError> {
        self.series.require(series)?;
        let mut rows: Vec<_> = self.drives.values().filter(|d| d.series == series).collect();
        rows.sort_by(|a, b| self.drive_order(a, b));
        Ok(rows)
    }

    fn drive_order(&self, a: &FrequencyDrive, b: &FrequencyDrive) -> Ordering {
        let series_order = match (self.series.get(a.series), self.series.get(b.series)) {
            (Some(sa), Some(sb)) => self.series_order(sa, sb),
            _ => a.series.cmp(&b.series),
        };
        series_order
            .then_with(|| a.voltage.volts().cmp(&b.voltage.volts()))
            .then_with(|| a.power.total_cmp(&b.power))
            .then_with(|| a.article.cmp(&b.article))
    }

    pub fn delete_drive(&mut self, id: FrequencyDriveId) -> Result<(), CatalogError> {
        self.drives.require(id)?;
        let referenced_by = self
            .prices
            .values()
            .any(|p| p.item == PricedItem::FrequencyDrive(id))
            .then_some(PriceId::ENTITY);
        protect(id, referenced_by)?;
        self.drives.remove(id);
        info!(entity = DRIVE, %id, "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{Motors, ProtectionDegree, Voltage};
    use pretty_assertions::assert_eq;

    struct Fixture {
        catalog: Catalog,
        brand: BrandId,
        category: CategoryId,
    }

    fn fixture() -> Fixture {
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
        Fixture {
            catalog,
            brand,
            category,
        }
    }

    #[test]
    fn test_series_names_unique_across_brands() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        catalog.create_series(NewSeries::new(brand, "VLT", category)).unwrap();
        let err = catalog
            .create_series(NewSeries::new(brand, "VLT", category))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateName {
                entity: "Series".into(),
                name: "VLT".into()
            }
        );
    }

    #[test]
    fn test_set_series_attribute() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        let id = catalog.create_series(NewSeries::new(brand, "VLT", category)).unwrap();

        catalog
            .set_series_attribute(id, "protection_degree", Some(AttributeValue::Code(3)))
            .unwrap();
        catalog
            .set_series_attribute(id, "fire_mode", Some(AttributeValue::Flag(true)))
            .unwrap();
        let attrs = &catalog.series(id).unwrap().attributes;
        assert_eq!(attrs.protection_degree, Some(ProtectionDegree::Ip55));
        assert_eq!(attrs.fire_mode, Some(true));

        let err = catalog
            .set_series_attribute(id, "motors", Some(AttributeValue::Code(7)))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidChoice { .. }));
        assert_eq!(catalog.series(id).unwrap().attributes.motors, None);

        catalog.set_series_attribute(id, "fire_mode", None).unwrap();
        assert_eq!(catalog.series(id).unwrap().attributes.fire_mode, None);
    }

    #[test]
    fn test_update_series_replaces_attributes() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        let mut draft = NewSeries::new(brand, "VLT", category);
        draft.attributes.motors = Some(Motors::ImPm);
        let id = catalog.create_series(draft).unwrap();

        catalog
            .update_series(id, NewSeries::new(brand, "VLT Micro", category))
            .unwrap();
        let stored = catalog.series(id).unwrap();
        assert_eq!(stored.name, "VLT Micro");
        assert_eq!(stored.attributes, SeriesAttributes::default());
    }

    #[test]
    fn test_drive_validation() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        let series = catalog.create_series(NewSeries::new(brand, "VLT", category)).unwrap();

        let mut draft = NewFrequencyDrive::new("VLT-001", series, 0.0);
        assert!(matches!(
            catalog.create_drive(draft.clone()),
            Err(CatalogError::InvalidValue { .. })
        ));
        draft.power = 2.2;
        draft.current = Some(-1.0);
        assert!(catalog.create_drive(draft.clone()).is_err());
        draft.current = Some(5.3);
        let id = catalog.create_drive(draft.clone()).unwrap();
        assert_eq!(catalog.drive(id).unwrap().voltage, Voltage::V400);

        assert!(matches!(
            catalog.create_drive(draft),
            Err(CatalogError::DuplicateArticle { .. })
        ));
        assert_eq!(catalog.drive_by_article(" VLT-001 ").unwrap().id, id);
    }

    #[test]
    fn test_drive_ordering() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        let series = catalog.create_series(NewSeries::new(brand, "VLT", category)).unwrap();
        let mut big = NewFrequencyDrive::new("A-3", series, 7.5);
        big.voltage = Voltage::V400;
        let mut single_phase = NewFrequencyDrive::new("A-2", series, 2.2);
        single_phase.voltage = Voltage::V230;
        let small = NewFrequencyDrive::new("A-1", series, 0.75);
        for draft in [big, single_phase, small] {
            catalog.create_drive(draft).unwrap();
        }
        let articles: Vec<&str> = catalog.drives().iter().map(|d| d.article.as_str()).collect();
        assert_eq!(articles, vec!["A-2", "A-1", "A-3"]);
    }

    #[test]
    fn test_series_with_drives_is_protected() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        let series = catalog.create_series(NewSeries::new(brand, "VLT", category)).unwrap();
        let drive = catalog
            .create_drive(NewFrequencyDrive::new("VLT-001", series, 2.2))
            .unwrap();
        assert!(matches!(
            catalog.delete_series(series),
            Err(CatalogError::ReferentialIntegrity { .. })
        ));
        assert!(matches!(
            catalog.delete_brand(brand),
            Err(CatalogError::ReferentialIntegrity { .. })
        ));
        assert!(matches!(
            catalog.delete_category(category),
            Err(CatalogError::ReferentialIntegrity { .. })
        ));
        catalog.delete_drive(drive).unwrap();
        catalog.delete_series(series).unwrap();
        catalog.delete_category(category).unwrap();
    }

    #[test]
    fn test_application_links() {
        let Fixture {
            mut catalog,
            brand,
            category,
        } = fixture();
        let hvac = catalog.create_application("HVAC").unwrap();
        let pumps = catalog.create_application("Pumps").unwrap();
        let mut draft = NewSeries::new(brand, "VLT", category);
        draft.applications = vec![pumps];
        let series = catalog.create_series(draft).unwrap();
        assert!(catalog.link_series_application(series, hvac).unwrap());

        let names: Vec<&str> = catalog
            .series_applications(series)
            .unwrap()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["HVAC", "Pumps"]);

        assert!(catalog.delete_application(hvac).is_err());
        catalog.unlink_series_application(series, hvac).unwrap();
        catalog.delete_application(hvac).unwrap();
    }
}
