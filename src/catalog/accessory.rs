use tracing::{debug, info};

use super::{
    duplicate_article, existing_ids, name_taken, optional_text, protect, required_text, Catalog,
};
use crate::error::CatalogError;
use crate::model::*;

const ACCESSORY: &str = AccessoryId::ENTITY;

impl Catalog {
    pub(crate) fn check_accessory(
        &self,
        draft: &NewAccessory,
        except: Option<AccessoryId>,
    ) -> Result<Accessory, CatalogError> {
        let limits = &self.config.limits;
        let article = required_text(ACCESSORY, "article", &draft.article, limits.article)?;
        let name = optional_text(ACCESSORY, "name", draft.name.as_deref(), limits.product_name)?;
        self.accessory_types.require(draft.accessory_type)?;
        let series = existing_ids(&self.series, draft.series.iter().copied())?;
        if name_taken(
            self.accessories.values().map(|a| (a.id, a.article.as_str())),
            &article,
            except,
        ) {
            return Err(duplicate_article(ACCESSORY, &article));
        }
        Ok(Accessory {
            id: except.unwrap_or(AccessoryId(0)),
            article,
            name,
            accessory_type: draft.accessory_type,
            series,
        })
    }

    pub fn create_accessory(&mut self, draft: NewAccessory) -> Result<AccessoryId, CatalogError> {
        let accessory = self.check_accessory(&draft, None)?;
        let id = self.accessories.insert_with(|id| Accessory { id, ..accessory })?;
        debug!(entity = ACCESSORY, %id, "created");
        Ok(id)
    }

    pub fn update_accessory(&mut self, id: AccessoryId, draft: NewAccessory) -> Result<(), CatalogError> {
        self.accessories.require(id)?;
        let accessory = self.check_accessory(&draft, Some(id))?;
        *self.accessories.require_mut(id)? = accessory;
        debug!(entity = ACCESSORY, %id, "updated");
        Ok(())
    }

    pub fn accessory(&self, id: AccessoryId) -> Option<&Accessory> {
        self.accessories.get(id)
    }

    pub fn accessory_by_article(&self, article: &str) -> Option<&Accessory> {
        let article = article.trim();
        self.accessories.values().find(|a| a.article == article)
    }

    /// Accessories ordered by type name, then article.
    pub fn accessories(&self) -> Vec<&Accessory> {
        let mut rows: Vec<_> = self.accessories.values().collect();
        let type_name = |a: &Accessory| {
            self.accessory_types
                .get(a.accessory_type)
                .map(|t| t.name.as_str())
        };
        rows.sort_by(|a, b| {
            type_name(a)
                .cmp(&type_name(b))
                .then_with(|| a.article.cmp(&b.article))
        });
        rows
    }

    /// Delete an unpriced accessory. Its series links go with it.
    pub fn delete_accessory(&mut self, id: AccessoryId) -> Result<(), CatalogError> {
        self.accessories.require(id)?;
        let referenced_by = self
            .prices
            .values()
            .any(|p| p.item == PricedItem::Accessory(id))
            .then_some(PriceId::ENTITY);
        protect(id, referenced_by)?;
        self.accessories.remove(id);
        info!(entity = ACCESSORY, %id, "deleted");
        Ok(())
    }

    pub fn link_accessory_series(
        &mut self,
        accessory: AccessoryId,
        series: SeriesId,
    ) -> Result<bool, CatalogError> {
        self.series.require(series)?;
        let added = self.accessories.require_mut(accessory)?.series.insert(series);
        debug!(%accessory, %series, added, "linked accessory to series");
        Ok(added)
    }

    pub fn unlink_accessory_series(
        &mut self,
        accessory: AccessoryId,
        series: SeriesId,
    ) -> Result<bool, CatalogError> {
        let removed = self.accessories.require_mut(accessory)?.series.remove(&series);
        debug!(%accessory, %series, removed, "unlinked accessory from series");
        Ok(removed)
    }

    /// Accessories compatible with a series, in listing order.
    pub fn compatible_accessories(&self, series: SeriesId) -> Result<Vec<&Accessory>, CatalogError> {
        self.series.require(series)?;
        Ok(self
            .accessories()
            .into_iter()
            .filter(|a| a.series.contains(&series))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog_with_series() -> (Catalog, SeriesId, AccessoryTypeId) {
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
        let series = catalog
            .create_series(NewSeries::new(brand, "VLT", category))
            .unwrap();
        let filters = catalog.create_accessory_type("Filters").unwrap();
        (catalog, series, filters)
    }

    fn accessory(article: &str, accessory_type: AccessoryTypeId, series: Vec<SeriesId>) -> NewAccessory {
        NewAccessory {
            article: article.to_string(),
            name: None,
            accessory_type,
            series,
        }
    }

    #[test]
    fn test_articles_unique_within_accessories_only() {
        let (mut catalog, series, filters) = catalog_with_series();
        catalog
            .create_drive(NewFrequencyDrive::new("X-1", series, 1.5))
            .unwrap();
        catalog.create_accessory(accessory("X-1", filters, vec![])).unwrap();
        assert!(matches!(
            catalog.create_accessory(accessory("X-1", filters, vec![])),
            Err(CatalogError::DuplicateArticle { .. })
        ));
    }

    #[test]
    fn test_compatibility_and_protection() {
        let (mut catalog, series, filters) = catalog_with_series();
        let chokes = catalog.create_accessory_type("Chokes").unwrap();
        let emc = catalog
            .create_accessory(accessory("EMC-1", filters, vec![series, series]))
            .unwrap();
        let choke = catalog.create_accessory(accessory("CH-1", chokes, vec![])).unwrap();
        catalog.link_accessory_series(choke, series).unwrap();

        let articles: Vec<&str> = catalog
            .compatible_accessories(series)
            .unwrap()
            .iter()
            .map(|a| a.article.as_str())
            .collect();
        assert_eq!(articles, vec!["CH-1", "EMC-1"]);
        assert_eq!(catalog.accessory(emc).unwrap().series.len(), 1);

        assert!(matches!(
            catalog.delete_series(series),
            Err(CatalogError::ReferentialIntegrity { .. })
        ));
        assert!(matches!(
            catalog.delete_accessory_type(filters),
            Err(CatalogError::ReferentialIntegrity { .. })
        ));

        catalog.delete_accessory(emc).unwrap();
        catalog.unlink_accessory_series(choke, series).unwrap();
        catalog.delete_series(series).unwrap();
    }

    #[test]
    fn test_display_name_and_lookup() {
        let (mut catalog, _, filters) = catalog_with_series();
        let mut draft = accessory("EMC-1", filters, vec![]);
        draft.name = Some("  ".to_string());
        let id = catalog.create_accessory(draft).unwrap();
        let stored = catalog.accessory_by_article("EMC-1").unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.name, None);
        assert_eq!(stored.display_name(), "EMC-1");
    }
}
