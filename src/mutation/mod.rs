//! JSON mutation protocol used by the administrative layer.
//!
//! ```json
//! {"type": "insert", "entity": "Supplier", "fields": {"name": "ACME", ...}}
//! {"type": "update", "entity": "FrequencyDrive", "id": 3, "fields": {"power": 4.0}}
//! {"type": "delete", "entity": "Country", "id": 1}
//! {"type": "link", "relation": "brand_suppliers", "from": 2, "to": 5}
//! ```
//!
//! Field keys are checked against the catalog schema. A reference may be
//! given by relation name (`country`) or by column (`country_id`). Updates
//! are partial: the stored row is the base and the given fields override it.

use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::choices::{Currency, Voltage};
use crate::error::CatalogError;
use crate::model::*;
use crate::schema::{catalog_schema, Entity};

const MUTATION: &str = "Mutation";

/// Apply one mutation document and describe the outcome as JSON.
///
/// Success: `{"valid": true, "entity": ..., "id": N}`.
/// Failure: `{"valid": false, "error": {"kind": ..., "data": ...}, "message": ...}`.
pub fn apply_mutation(catalog: &mut Catalog, mutation: &Value) -> Value {
    match try_apply(catalog, mutation) {
        Ok((entity, id)) => json!({
            "valid": true,
            "entity": entity,
            "id": id,
        }),
        Err(e) => error_response(&e),
    }
}

fn try_apply(catalog: &mut Catalog, mutation: &Value) -> Result<(String, u32), CatalogError> {
    let mutation_type = mutation
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::missing(MUTATION, "type"))?;

    match mutation_type {
        "insert" | "update" | "delete" => {}
        "link" => return apply_link(catalog, mutation, true),
        "unlink" => return apply_link(catalog, mutation, false),
        other => {
            return Err(CatalogError::invalid(
                MUTATION,
                "type",
                format!("unknown mutation type '{}'", other),
            ))
        }
    }

    let entity_name = mutation
        .get("entity")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::missing(MUTATION, "entity"))?;
    let entity = catalog_schema()
        .get_entity(entity_name)
        .ok_or_else(|| CatalogError::UnknownEntity(entity_name.to_string()))?;

    let id = match mutation_type {
        "insert" => {
            let fields = Fields::from_document(entity, mutation)?;
            insert(catalog, &fields)?
        }
        "update" => {
            let id = target_id(mutation, "id")?;
            let fields = Fields::from_document(entity, mutation)?;
            update(catalog, id, fields)?;
            id
        }
        _ => {
            let id = target_id(mutation, "id")?;
            delete(catalog, &entity.name, id)?;
            id
        }
    };
    Ok((entity.name.clone(), id))
}

/// Field values keyed by relation or column name, validated against one schema entity.
#[derive(Debug)]
struct Fields {
    entity: String,
    values: BTreeMap<String, Value>,
}

impl Fields {
    fn from_document(entity: &Entity, mutation: &Value) -> Result<Self, CatalogError> {
        let raw = mutation
            .get("fields")
            .and_then(Value::as_object)
            .ok_or_else(|| CatalogError::missing(MUTATION, "fields"))?;
        let mut values = BTreeMap::new();
        for (key, value) in raw {
            values.insert(canonical_key(entity, key)?, value.clone());
        }
        Ok(Fields {
            entity: entity.name.clone(),
            values,
        })
    }

    /// The stored row as a field map, the base of a partial update.
    fn from_record<T: serde::Serialize>(entity: &str, record: &T) -> Result<Self, CatalogError> {
        let mut values: BTreeMap<String, Value> = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map.into_iter().collect(),
            Ok(_) => BTreeMap::new(),
            Err(e) => return Err(CatalogError::invalid(entity, "record", e.to_string())),
        };
        values.remove("id");
        // Series attributes are top-level fields in a mutation.
        if let Some(Value::Object(attributes)) = values.remove("attributes") {
            values.extend(attributes);
        }
        Ok(Fields {
            entity: entity.to_string(),
            values,
        })
    }

    fn overlay(mut self, changes: Fields) -> Self {
        self.values.extend(changes.values);
        self
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    fn text(&self, key: &str) -> Result<String, CatalogError> {
        self.optional_text(key)?
            .ok_or_else(|| CatalogError::missing(&self.entity, key))
    }

    fn optional_text(&self, key: &str) -> Result<Option<String>, CatalogError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(key, "a string", other)),
        }
    }

    fn text_or_empty(&self, key: &str) -> Result<String, CatalogError> {
        Ok(self.optional_text(key)?.unwrap_or_default())
    }

    fn number(&self, key: &str) -> Result<f64, CatalogError> {
        self.optional_number(key)?
            .ok_or_else(|| CatalogError::missing(&self.entity, key))
    }

    fn optional_number(&self, key: &str) -> Result<Option<f64>, CatalogError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a number", value)),
        }
    }

    /// Decimal amount given as a JSON number or a numeric string.
    fn decimal(&self, key: &str) -> Result<Decimal, CatalogError> {
        let value = self
            .get(key)
            .ok_or_else(|| CatalogError::missing(&self.entity, key))?;
        let source = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            other => return Err(self.wrong_type(key, "a decimal amount", other)),
        };
        Decimal::from_str(&source)
            .or_else(|_| Decimal::from_scientific(&source))
            .map_err(|e| CatalogError::invalid(&self.entity, key, e.to_string()))
    }

    fn id<I: EntityId>(&self, key: &str) -> Result<I, CatalogError> {
        self.optional_id(key)?
            .ok_or_else(|| CatalogError::missing(&self.entity, key))
    }

    fn optional_id<I: EntityId>(&self, key: &str) -> Result<Option<I>, CatalogError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => raw_id(value)
                .map(|raw| Some(I::from_raw(raw)))
                .ok_or_else(|| self.wrong_type(key, "an id", value)),
        }
    }

    fn ids<I: EntityId>(&self, key: &str) -> Result<Vec<I>, CatalogError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    raw_id(item)
                        .map(I::from_raw)
                        .ok_or_else(|| self.wrong_type(key, "a list of ids", item))
                })
                .collect(),
            Some(other) => Err(self.wrong_type(key, "a list of ids", other)),
        }
    }

    fn asset(&self, key: &str) -> Result<Option<AssetPath>, CatalogError> {
        Ok(self
            .optional_text(key)?
            .filter(|path| !path.trim().is_empty())
            .map(AssetPath))
    }

    fn currency(&self) -> Result<Currency, CatalogError> {
        Currency::parse(&self.text("currency")?)
    }

    fn voltage(&self) -> Result<Voltage, CatalogError> {
        match self.get("voltage") {
            None => Ok(Voltage::default()),
            Some(value) => value
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .ok_or_else(|| CatalogError::InvalidChoice {
                    field: "voltage".to_string(),
                    value: value.to_string(),
                })
                .and_then(Voltage::try_from),
        }
    }

    fn attributes(&self) -> Result<SeriesAttributes, CatalogError> {
        let map: Map<String, Value> = self
            .values
            .iter()
            .filter(|(key, _)| attribute_descriptor(key).is_some())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let mut attributes = SeriesAttributes::default();
        attributes.apply_json(&map)?;
        Ok(attributes)
    }

    fn only(&self, allowed: &[&str], reason: &str) -> Result<(), CatalogError> {
        match self.values.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(key) => Err(CatalogError::invalid(&self.entity, key, reason)),
            None => Ok(()),
        }
    }

    fn wrong_type(&self, key: &str, expected: &str, got: &Value) -> CatalogError {
        CatalogError::invalid(&self.entity, key, format!("expected {}, got {}", expected, got))
    }
}

/// Map a submitted key onto the relation or column it names.
fn canonical_key(entity: &Entity, key: &str) -> Result<String, CatalogError> {
    if key == "id" {
        return Err(CatalogError::invalid(&entity.name, key, "ids are assigned by the catalog"));
    }
    if entity.relation(key).is_some() {
        return Ok(key.to_string());
    }
    if let Some(relation) = entity.relation_by_foreign_key(key) {
        return Ok(relation.name.clone());
    }
    if entity.field(key).is_some() {
        return Ok(key.to_string());
    }
    Err(CatalogError::UnknownField {
        entity: entity.name.clone(),
        field: key.to_string(),
    })
}

fn raw_id(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn target_id(mutation: &Value, key: &str) -> Result<u32, CatalogError> {
    let value = mutation
        .get(key)
        .ok_or_else(|| CatalogError::missing(MUTATION, key))?;
    raw_id(value).ok_or_else(|| CatalogError::invalid(MUTATION, key, format!("expected an id, got {}", value)))
}

// ─── DRAFTS ───

fn supplier_draft(fields: &Fields) -> Result<NewSupplier, CatalogError> {
    Ok(NewSupplier {
        name: fields.text("name")?,
        site: fields.text_or_empty("site")?,
        country: fields.id("country")?,
        currency: fields.currency()?,
    })
}

fn brand_draft(fields: &Fields) -> Result<NewBrand, CatalogError> {
    Ok(NewBrand {
        name: fields.text("name")?,
        site: fields.text_or_empty("site")?,
        country: fields.id("country")?,
        description: fields.text_or_empty("description")?,
        logo: fields.asset("logo")?,
        equipment_lines: fields.ids("equipment_lines")?,
        suppliers: fields.ids("suppliers")?,
    })
}

fn series_draft(fields: &Fields) -> Result<NewSeries, CatalogError> {
    Ok(NewSeries {
        brand: fields.id("brand")?,
        name: fields.text("name")?,
        category: fields.id("category")?,
        image: fields.asset("image")?,
        applications: fields.ids("applications")?,
        attributes: fields.attributes()?,
        description: fields.text_or_empty("description")?,
    })
}

fn drive_draft(fields: &Fields) -> Result<NewFrequencyDrive, CatalogError> {
    Ok(NewFrequencyDrive {
        article: fields.text("article")?,
        name: fields.optional_text("name")?,
        series: fields.id("series")?,
        power: fields.number("power")?,
        current: fields.optional_number("current")?,
        voltage: fields.voltage()?,
    })
}

fn accessory_draft(fields: &Fields) -> Result<NewAccessory, CatalogError> {
    Ok(NewAccessory {
        article: fields.text("article")?,
        name: fields.optional_text("name")?,
        accessory_type: fields.id("type")?,
        series: fields.ids("series")?,
    })
}

fn price_draft(fields: &Fields) -> Result<NewPrice, CatalogError> {
    Ok(NewPrice {
        frequency_drive: fields.optional_id("frequency_drive")?,
        accessory: fields.optional_id("accessory")?,
        supplier: fields.id("supplier")?,
        price: fields.decimal("price")?,
    })
}

// ─── OPERATIONS ───

fn insert(catalog: &mut Catalog, fields: &Fields) -> Result<u32, CatalogError> {
    let id = match fields.entity.as_str() {
        "Country" => catalog.create_country(&fields.text("name")?)?.raw(),
        "EquipmentLine" => catalog.create_equipment_line(&fields.text("name")?)?.raw(),
        "Application" => catalog.create_application(&fields.text("name")?)?.raw(),
        "Category" => catalog.create_category(&fields.text("name")?)?.raw(),
        "AccessoryType" => catalog.create_accessory_type(&fields.text("name")?)?.raw(),
        "Supplier" => catalog.create_supplier(supplier_draft(fields)?)?.raw(),
        "Brand" => catalog.create_brand(brand_draft(fields)?)?.raw(),
        "Series" => catalog.create_series(series_draft(fields)?)?.raw(),
        "FrequencyDrive" => catalog.create_drive(drive_draft(fields)?)?.raw(),
        "Accessory" => catalog.create_accessory(accessory_draft(fields)?)?.raw(),
        "Price" => catalog.create_price(price_draft(fields)?)?.raw(),
        other => return Err(CatalogError::UnknownEntity(other.to_string())),
    };
    Ok(id)
}

fn stored<'a, I: EntityId, T>(record: Option<&'a T>, raw: u32) -> Result<&'a T, CatalogError> {
    record.ok_or_else(|| CatalogError::not_found(I::ENTITY, raw))
}

fn update(catalog: &mut Catalog, raw: u32, changes: Fields) -> Result<(), CatalogError> {
    let entity = changes.entity.clone();
    let renamed = |changes: &Fields| -> Result<String, CatalogError> {
        changes.only(&["name"], "only the name of a reference row can change")?;
        changes.text("name")
    };

    match entity.as_str() {
        "Country" => catalog.rename_country(CountryId(raw), &renamed(&changes)?),
        "EquipmentLine" => {
            catalog.rename_equipment_line(EquipmentLineId(raw), &renamed(&changes)?)
        }
        "Application" => catalog.rename_application(ApplicationId(raw), &renamed(&changes)?),
        "Category" => catalog.rename_category(CategoryId(raw), &renamed(&changes)?),
        "AccessoryType" => {
            catalog.rename_accessory_type(AccessoryTypeId(raw), &renamed(&changes)?)
        }
        "Supplier" => {
            let base = stored::<SupplierId, _>(catalog.supplier(SupplierId(raw)), raw)?;
            let fields = Fields::from_record(&entity, base)?.overlay(changes);
            catalog.update_supplier(SupplierId(raw), supplier_draft(&fields)?)
        }
        "Brand" => {
            let base = stored::<BrandId, _>(catalog.brand(BrandId(raw)), raw)?;
            let fields = Fields::from_record(&entity, base)?.overlay(changes);
            catalog.update_brand(BrandId(raw), brand_draft(&fields)?)
        }
        "Series" => {
            let base = stored::<SeriesId, _>(catalog.series(SeriesId(raw)), raw)?;
            let fields = Fields::from_record(&entity, base)?.overlay(changes);
            catalog.update_series(SeriesId(raw), series_draft(&fields)?)
        }
        "FrequencyDrive" => {
            let base = stored::<FrequencyDriveId, _>(catalog.drive(FrequencyDriveId(raw)), raw)?;
            let fields = Fields::from_record(&entity, base)?.overlay(changes);
            catalog.update_drive(FrequencyDriveId(raw), drive_draft(&fields)?)
        }
        "Accessory" => {
            let base = stored::<AccessoryId, _>(catalog.accessory(AccessoryId(raw)), raw)?;
            let fields = Fields::from_record(&entity, base)?.overlay(changes);
            catalog.update_accessory(AccessoryId(raw), accessory_draft(&fields)?)
        }
        "Price" => {
            changes.only(&["price"], "a price row only changes its amount")?;
            catalog.update_price(PriceId(raw), changes.decimal("price")?)
        }
        other => Err(CatalogError::UnknownEntity(other.to_string())),
    }
}

fn delete(catalog: &mut Catalog, entity: &str, raw: u32) -> Result<(), CatalogError> {
    match entity {
        "Country" => catalog.delete_country(CountryId(raw)),
        "EquipmentLine" => catalog.delete_equipment_line(EquipmentLineId(raw)),
        "Application" => catalog.delete_application(ApplicationId(raw)),
        "Category" => catalog.delete_category(CategoryId(raw)),
        "AccessoryType" => catalog.delete_accessory_type(AccessoryTypeId(raw)),
        "Supplier" => catalog.delete_supplier(SupplierId(raw)),
        "Brand" => catalog.delete_brand(BrandId(raw)),
        "Series" => catalog.delete_series(SeriesId(raw)),
        "FrequencyDrive" => catalog.delete_drive(FrequencyDriveId(raw)),
        "Accessory" => catalog.delete_accessory(AccessoryId(raw)),
        "Price" => catalog.delete_price(PriceId(raw)),
        other => Err(CatalogError::UnknownEntity(other.to_string())),
    }
}

/// `link`/`unlink` on one of the join tables; `from` is the owning side.
fn apply_link(catalog: &mut Catalog, mutation: &Value, link: bool) -> Result<(String, u32), CatalogError> {
    let relation = mutation
        .get("relation")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::missing(MUTATION, "relation"))?;
    let from = target_id(mutation, "from")?;
    let to = target_id(mutation, "to")?;

    let owner = match relation {
        "brand_suppliers" => {
            let (brand, supplier) = (BrandId(from), SupplierId(to));
            if link {
                catalog.link_brand_supplier(brand, supplier)?;
            } else {
                catalog.unlink_brand_supplier(brand, supplier)?;
            }
            BrandId::ENTITY
        }
        "brand_equipment_lines" => {
            let (brand, line) = (BrandId(from), EquipmentLineId(to));
            if link {
                catalog.link_brand_equipment_line(brand, line)?;
            } else {
                catalog.unlink_brand_equipment_line(brand, line)?;
            }
            BrandId::ENTITY
        }
        "series_applications" => {
            let (series, application) = (SeriesId(from), ApplicationId(to));
            if link {
                catalog.link_series_application(series, application)?;
            } else {
                catalog.unlink_series_application(series, application)?;
            }
            SeriesId::ENTITY
        }
        "accessory_series" => {
            let (accessory, series) = (AccessoryId(from), SeriesId(to));
            if link {
                catalog.link_accessory_series(accessory, series)?;
            } else {
                catalog.unlink_accessory_series(accessory, series)?;
            }
            AccessoryId::ENTITY
        }
        other => {
            return Err(CatalogError::invalid(
                MUTATION,
                "relation",
                format!("unknown relation '{}'", other),
            ))
        }
    };
    Ok((owner.to_string(), from))
}

/// Helper: Build error response JSON
pub(crate) fn error_response(error: &CatalogError) -> Value {
    let detail = serde_json::to_value(error)
        .unwrap_or_else(|_| json!({ "kind": error.kind() }));
    json!({
        "valid": false,
        "error": detail,
        "message": error.to_string(),
    })
}

// === Tests ===
