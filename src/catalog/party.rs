use std::collections::BTreeSet;
use tracing::{debug, info};

use super::{
    asset_path, duplicate_name, existing_ids, name_taken, plain_text, protect, required_text,
    Catalog, Table,
};
use crate::error::CatalogError;
use crate::model::*;

const SUPPLIER: &str = SupplierId::ENTITY;
const BRAND: &str = BrandId::ENTITY;

impl Catalog {
    /// Normalize a supplier draft and check it against the rest of the catalog.
    pub(crate) fn check_supplier(
        &self,
        draft: &NewSupplier,
        except: Option<SupplierId>,
    ) -> Result<NewSupplier, CatalogError> {
        let limits = &self.config.limits;
        let name = required_text(SUPPLIER, "name", &draft.name, limits.supplier_name)?;
        let site = plain_text(SUPPLIER, "site", &draft.site, limits.supplier_site)?;
        self.countries.require(draft.country)?;
        if name_taken(
            self.suppliers.values().map(|s| (s.id, s.name.as_str())),
            &name,
            except,
        ) {
            return Err(duplicate_name(SUPPLIER, &name));
        }
        Ok(NewSupplier {
            name,
            site,
            country: draft.country,
            currency: draft.currency,
        })
    }

    pub fn create_supplier(&mut self, draft: NewSupplier) -> Result<SupplierId, CatalogError> {
        let draft = self.check_supplier(&draft, None)?;
        let id = self.suppliers.insert_with(|id| Supplier {
            id,
            name: draft.name,
            site: draft.site,
            country: draft.country,
            currency: draft.currency,
        })?;
        debug!(entity = SUPPLIER, %id, "created");
        Ok(id)
    }

    /// Replace every column of a supplier. Existing prices keep their amount
    /// and are re-read in the new currency.
    pub fn update_supplier(&mut self, id: SupplierId, draft: NewSupplier) -> Result<(), CatalogError> {
        self.suppliers.require(id)?;
        let draft = self.check_supplier(&draft, Some(id))?;
        let supplier = self.suppliers.require_mut(id)?;
        supplier.name = draft.name;
        supplier.site = draft.site;
        supplier.country = draft.country;
        supplier.currency = draft.currency;
        debug!(entity = SUPPLIER, %id, "updated");
        Ok(())
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(id)
    }

    pub fn supplier_by_name(&self, name: &str) -> Option<&Supplier> {
        let name = name.trim();
        self.suppliers.values().find(|s| s.name == name)
    }

    /// Suppliers ordered by name.
    pub fn suppliers(&self) -> Vec<&Supplier> {
        let mut rows: Vec<_> = self.suppliers.values().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    pub fn delete_supplier(&mut self, id: SupplierId) -> Result<(), CatalogError> {
        self.suppliers.require(id)?;
        let referenced_by = if self.brands.values().any(|b| b.suppliers.contains(&id)) {
            Some(BRAND)
        } else if self.prices.values().any(|p| p.supplier == id) {
            Some(PriceId::ENTITY)
        } else {
            None
        };
        protect(id, referenced_by)?;
        self.suppliers.remove(id);
        info!(entity = SUPPLIER, %id, "deleted");
        Ok(())
    }

    /// Brands this supplier distributes, ordered by name.
    pub fn supplier_brands(&self, id: SupplierId) -> Result<Vec<&Brand>, CatalogError> {
        self.suppliers.require(id)?;
        let mut rows: Vec<_> = self
            .brands
            .values()
            .filter(|b| b.suppliers.contains(&id))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    // ─── BRAND ───

    pub(crate) fn check_brand(
        &self,
        draft: &NewBrand,
        except: Option<BrandId>,
    ) -> Result<Brand, CatalogError> {
        let limits = &self.config.limits;
        let name = required_text(BRAND, "name", &draft.name, limits.brand_name)?;
        let site = plain_text(BRAND, "site", &draft.site, limits.brand_site)?;
        self.countries.require(draft.country)?;
        let logo = asset_path(BRAND, "logo", draft.logo.as_ref(), self.config.limits.asset_path)?;
        let equipment_lines = existing_ids(&self.equipment_lines, draft.equipment_lines.iter().copied())?;
        let suppliers = existing_ids(&self.suppliers, draft.suppliers.iter().copied())?;
        if name_taken(
            self.brands.values().map(|b| (b.id, b.name.as_str())),
            &name,
            except,
        ) {
            return Err(duplicate_name(BRAND, &name));
        }
        Ok(Brand {
            id: except.unwrap_or(BrandId(0)),
            name,
            site,
            country: draft.country,
            description: draft.description.trim().to_string(),
            logo,
            equipment_lines,
            suppliers,
        })
    }

    pub fn create_brand(&mut self, draft: NewBrand) -> Result<BrandId, CatalogError> {
        let brand = self.check_brand(&draft, None)?;
        let id = self.brands.insert_with(|id| Brand { id, ..brand })?;
        debug!(entity = BRAND, %id, "created");
        Ok(id)
    }

    /// Replace every column and both link sets of a brand.
    pub fn update_brand(&mut self, id: BrandId, draft: NewBrand) -> Result<(), CatalogError> {
        self.brands.require(id)?;
        let brand = self.check_brand(&draft, Some(id))?;
        *self.brands.require_mut(id)? = brand;
        debug!(entity = BRAND, %id, "updated");
        Ok(())
    }

    pub fn brand(&self, id: BrandId) -> Option<&Brand> {
        self.brands.get(id)
    }

    pub fn brand_by_name(&self, name: &str) -> Option<&Brand> {
        let name = name.trim();
        self.brands.values().find(|b| b.name == name)
    }

    /// Brands ordered by name.
    pub fn brands(&self) -> Vec<&Brand> {
        let mut rows: Vec<_> = self.brands.values().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Delete a brand with no series. Its supplier and equipment line links go with it.
    pub fn delete_brand(&mut self, id: BrandId) -> Result<(), CatalogError> {
        self.brands.require(id)?;
        let referenced_by = self
            .series
            .values()
            .any(|s| s.brand == id)
            .then_some(SeriesId::ENTITY);
        protect(id, referenced_by)?;
        self.brands.remove(id);
        info!(entity = BRAND, %id, "deleted");
        Ok(())
    }

    /// Returns false when the link already existed.
    pub fn link_brand_supplier(
        &mut self,
        brand: BrandId,
        supplier: SupplierId,
    ) -> Result<bool, CatalogError> {
        self.suppliers.require(supplier)?;
        let added = self.brands.require_mut(brand)?.suppliers.insert(supplier);
        debug!(%brand, %supplier, added, "linked brand to supplier");
        Ok(added)
    }

    /// Returns false when there was no such link.
    pub fn unlink_brand_supplier(
        &mut self,
        brand: BrandId,
        supplier: SupplierId,
    ) -> Result<bool, CatalogError> {
        let removed = self.brands.require_mut(brand)?.suppliers.remove(&supplier);
        debug!(%brand, %supplier, removed, "unlinked brand from supplier");
        Ok(removed)
    }

    pub fn link_brand_equipment_line(
        &mut self,
        brand: BrandId,
        line: EquipmentLineId,
    ) -> Result<bool, CatalogError> {
        self.equipment_lines.require(line)?;
        let added = self.brands.require_mut(brand)?.equipment_lines.insert(line);
        debug!(%brand, %line, added, "linked brand to equipment line");
        Ok(added)
    }

    pub fn unlink_brand_equipment_line(
        &mut self,
        brand: BrandId,
        line: EquipmentLineId,
    ) -> Result<bool, CatalogError> {
        let removed = self.brands.require_mut(brand)?.equipment_lines.remove(&line);
        debug!(%brand, %line, removed, "unlinked brand from equipment line");
        Ok(removed)
    }

    /// Suppliers of a brand, ordered by name.
    pub fn brand_suppliers(&self, id: BrandId) -> Result<Vec<&Supplier>, CatalogError> {
        let brand = self.brands.require(id)?;
        Ok(resolve_sorted(&brand.suppliers, &self.suppliers, |s| s.name.as_str()))
    }

    /// Equipment lines of a brand, ordered by name.
    pub fn brand_equipment_lines(&self, id: BrandId) -> Result<Vec<&EquipmentLine>, CatalogError> {
        let brand = self.brands.require(id)?;
        Ok(resolve_sorted(&brand.equipment_lines, &self.equipment_lines, |l| l.name.as_str()))
    }
}

/// Rows for a link set, ordered by `name`. Dangling ids are skipped.
pub(crate) fn resolve_sorted<'a, I: EntityId, T>(
    ids: &BTreeSet<I>,
    table: &'a Table<I, T>,
    name: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    let mut rows: Vec<&T> = ids.iter().filter_map(|id| table.get(*id)).collect();
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}
