//! Name-only reference tables: countries, equipment lines, applications,
//! categories and accessory types.

use tracing::{debug, info};

use super::{duplicate_name, name_taken, protect, required_text, Catalog, Table};
use crate::error::CatalogError;
use crate::model::*;

fn create_named<I: EntityId>(
    table: &mut Table<I, NamedRecord<I>>,
    name: &str,
    max: usize,
) -> Result<I, CatalogError> {
    let name = required_text(I::ENTITY, "name", name, max)?;
    if name_taken(table.values().map(|r| (r.id, r.name.as_str())), &name, None) {
        return Err(duplicate_name(I::ENTITY, &name));
    }
    let id = table.insert_with(|id| NamedRecord {
        id,
        name: name.clone(),
    })?;
    debug!(entity = I::ENTITY, %id, name = %name, "created");
    Ok(id)
}

fn rename_named<I: EntityId>(
    table: &mut Table<I, NamedRecord<I>>,
    id: I,
    name: &str,
    max: usize,
) -> Result<(), CatalogError> {
    table.require(id)?;
    let name = required_text(I::ENTITY, "name", name, max)?;
    if name_taken(table.values().map(|r| (r.id, r.name.as_str())), &name, Some(id)) {
        return Err(duplicate_name(I::ENTITY, &name));
    }
    table.require_mut(id)?.name = name;
    debug!(entity = I::ENTITY, %id, "renamed");
    Ok(())
}

fn list_named<I: EntityId>(table: &Table<I, NamedRecord<I>>) -> Vec<&NamedRecord<I>> {
    let mut rows: Vec<_> = table.values().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

fn delete_named<I: EntityId>(
    table: &mut Table<I, NamedRecord<I>>,
    id: I,
    referenced_by: Option<&str>,
) -> Result<(), CatalogError> {
    table.require(id)?;
    protect(id, referenced_by)?;
    table.remove(id);
    info!(entity = I::ENTITY, %id, "deleted");
    Ok(())
}

impl Catalog {
    // ─── COUNTRY ───

    pub fn create_country(&mut self, name: &str) -> Result<CountryId, CatalogError> {
        let max = self.config.limits.country_name;
        create_named(&mut self.countries, name, max)
    }

    pub fn rename_country(&mut self, id: CountryId, name: &str) -> Result<(), CatalogError> {
        let max = self.config.limits.country_name;
        rename_named(&mut self.countries, id, name, max)
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(id)
    }

    /// Countries ordered by name.
    pub fn countries(&self) -> Vec<&Country> {
        list_named(&self.countries)
    }

    pub fn delete_country(&mut self, id: CountryId) -> Result<(), CatalogError> {
        let referenced_by = if self.suppliers.values().any(|s| s.country == id) {
            Some(SupplierId::ENTITY)
        } else if self.brands.values().any(|b| b.country == id) {
            Some(BrandId::ENTITY)
        } else {
            None
        };
        delete_named(&mut self.countries, id, referenced_by)
    }

    // ─── EQUIPMENT LINE ───

    pub fn create_equipment_line(&mut self, name: &str) -> Result<EquipmentLineId, CatalogError> {
        let max = self.config.limits.equipment_line_name;
        create_named(&mut self.equipment_lines, name, max)
    }

    pub fn rename_equipment_line(
        &mut self,
        id: EquipmentLineId,
        name: &str,
    ) -> Result<(), CatalogError> {
        let max = self.config.limits.equipment_line_name;
        rename_named(&mut self.equipment_lines, id, name, max)
    }

    pub fn equipment_line(&self, id: EquipmentLineId) -> Option<&EquipmentLine> {
        self.equipment_lines.get(id)
    }

    pub fn equipment_lines(&self) -> Vec<&EquipmentLine> {
        list_named(&self.equipment_lines)
    }

    pub fn delete_equipment_line(&mut self, id: EquipmentLineId) -> Result<(), CatalogError> {
        let referenced_by = self
            .brands
            .values()
            .any(|b| b.equipment_lines.contains(&id))
            .then_some(BrandId::ENTITY);
        delete_named(&mut self.equipment_lines, id, referenced_by)
    }

    // ─── APPLICATION ───

    pub fn create_application(&mut self, name: &str) -> Result<ApplicationId, CatalogError> {
        let max = self.config.limits.label_name;
        create_named(&mut self.applications, name, max)
    }

    pub fn rename_application(&mut self, id: ApplicationId, name: &str) -> Result<(), CatalogError> {
        let max = self.config.limits.label_name;
        rename_named(&mut self.applications, id, name, max)
    }

    pub fn application(&self, id: ApplicationId) -> Option<&Application> {
        self.applications.get(id)
    }

    pub fn applications(&self) -> Vec<&Application> {
        list_named(&self.applications)
    }

    pub fn delete_application(&mut self, id: ApplicationId) -> Result<(), CatalogError> {
        let referenced_by = self
            .series
            .values()
            .any(|s| s.applications.contains(&id))
            .then_some(SeriesId::ENTITY);
        delete_named(&mut self.applications, id, referenced_by)
    }

    // ─── CATEGORY ───

    pub fn create_category(&mut self, name: &str) -> Result<CategoryId, CatalogError> {
        let max = self.config.limits.label_name;
        create_named(&mut self.categories, name, max)
    }

    pub fn rename_category(&mut self, id: CategoryId, name: &str) -> Result<(), CatalogError> {
        let max = self.config.limits.label_name;
        rename_named(&mut self.categories, id, name, max)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn categories(&self) -> Vec<&Category> {
        list_named(&self.categories)
    }

    pub fn delete_category(&mut self, id: CategoryId) -> Result<(), CatalogError> {
        let referenced_by = self
            .series
            .values()
            .any(|s| s.category == id)
            .then_some(SeriesId::ENTITY);
        delete_named(&mut self.categories, id, referenced_by)
    }

    // ─── ACCESSORY TYPE ───

    pub fn create_accessory_type(&mut self, name: &str) -> Result<AccessoryTypeId, CatalogError> {
        let max = self.config.limits.label_name;
        create_named(&mut self.accessory_types, name, max)
    }

    pub fn rename_accessory_type(
        &mut self,
        id: AccessoryTypeId,
        name: &str,
    ) -> Result<(), CatalogError> {
        let max = self.config.limits.label_name;
        rename_named(&mut self.accessory_types, id, name, max)
    }

    pub fn accessory_type(&self, id: AccessoryTypeId) -> Option<&AccessoryType> {
        self.accessory_types.get(id)
    }

    pub fn accessory_types(&self) -> Vec<&AccessoryType> {
        list_named(&self.accessory_types)
    }

    pub fn delete_accessory_type(&mut self, id: AccessoryTypeId) -> Result<(), CatalogError> {
        let referenced_by = self
            .accessories
            .values()
            .any(|a| a.accessory_type == id)
            .then_some(AccessoryId::ENTITY);
        delete_named(&mut self.accessory_types, id, referenced_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicate_names_rejected_per_table() {
        let mut catalog = Catalog::new();
        catalog.create_country("Germany").unwrap();
        assert!(matches!(
            catalog.create_country("Germany"),
            Err(CatalogError::DuplicateName { .. })
        ));

        catalog.create_equipment_line("Drives").unwrap();
        assert!(matches!(
            catalog.create_equipment_line(" Drives "),
            Err(CatalogError::DuplicateName { .. })
        ));

        catalog.create_application("HVAC").unwrap();
        assert!(catalog.create_application("HVAC").is_err());
        catalog.create_category("General").unwrap();
        assert!(catalog.create_category("General").is_err());
        catalog.create_accessory_type("Filters").unwrap();
        assert!(catalog.create_accessory_type("Filters").is_err());
    }

    #[test]
    fn test_same_name_in_different_tables_is_fine() {
        let mut catalog = Catalog::new();
        catalog.create_category("Pumps").unwrap();
        catalog.create_application("Pumps").unwrap();
    }

    #[test]
    fn test_list_ordered_by_name() {
        let mut catalog = Catalog::new();
        for name in ["Italy", "China", "Germany"] {
            catalog.create_country(name).unwrap();
        }
        let names: Vec<&str> = catalog.countries().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["China", "Germany", "Italy"]);
    }

    #[test]
    fn test_rename_checks_uniqueness() {
        let mut catalog = Catalog::new();
        let de = catalog.create_country("Germany").unwrap();
        catalog.create_country("Italy").unwrap();
        assert!(matches!(
            catalog.rename_country(de, "Italy"),
            Err(CatalogError::DuplicateName { .. })
        ));
        catalog.rename_country(de, "Germany").unwrap();
        catalog.rename_country(de, "Deutschland").unwrap();
        assert_eq!(catalog.country(de).unwrap().name, "Deutschland");
    }

    #[test]
    fn test_delete_unreferenced_and_missing() {
        let mut catalog = Catalog::new();
        let id = catalog.create_category("General").unwrap();
        catalog.delete_category(id).unwrap();
        assert!(catalog.category(id).is_none());
        assert!(matches!(
            catalog.delete_category(id),
            Err(CatalogError::NotFound { .. })
        ));
    }

    fn brand(name: &str, country: CountryId) -> NewBrand {
        NewBrand {
            name: name.to_string(),
            site: String::new(),
            country,
            description: String::new(),
            logo: None,
            equipment_lines: Vec::new(),
            suppliers: Vec::new(),
        }
    }

    fn referenced_by(err: CatalogError) -> String {
        match err {
            CatalogError::ReferentialIntegrity { referenced_by, .. } => referenced_by,
            other => panic!("expected ReferentialIntegrity, got {:?}", other),
        }
    }

    #[test]
    fn test_country_of_brand_is_protected() {
        let mut catalog = Catalog::new();
        let de = catalog.create_country("Germany").unwrap();
        let dk = catalog.create_country("Denmark").unwrap();
        let danfoss = catalog.create_brand(brand("Danfoss", de)).unwrap();

        let err = catalog.delete_country(de).unwrap_err();
        assert_eq!(referenced_by(err), "Brand");
        assert!(catalog.country(de).is_some());

        catalog.update_brand(danfoss, brand("Danfoss", dk)).unwrap();
        catalog.delete_country(de).unwrap();
        assert!(catalog.country(de).is_none());
    }

    #[test]
    fn test_linked_equipment_line_is_protected() {
        let mut catalog = Catalog::new();
        let de = catalog.create_country("Germany").unwrap();
        let line = catalog.create_equipment_line("Drives").unwrap();
        let mut draft = brand("Danfoss", de);
        draft.equipment_lines = vec![line];
        let danfoss = catalog.create_brand(draft).unwrap();

        let err = catalog.delete_equipment_line(line).unwrap_err();
        assert_eq!(referenced_by(err), "Brand");
        assert_eq!(catalog.equipment_lines().len(), 1);

        assert!(catalog.unlink_brand_equipment_line(danfoss, line).unwrap());
        catalog.delete_equipment_line(line).unwrap();
        assert!(catalog.equipment_line(line).is_none());
    }

    #[test]
    fn test_country_name_limit() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.create_country(&"Я".repeat(31)),
            Err(CatalogError::FieldTooLong { max: 30, .. })
        ));
        catalog.create_country(&"Я".repeat(30)).unwrap();
    }
}
