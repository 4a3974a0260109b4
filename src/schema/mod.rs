//! Relational description of the catalog.
//!
//! The store itself is in memory; this is the layout a relational backend
//! would use. DDL generation and the mutation protocol both read it.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::choices::{Currency, Voltage};
use crate::config::FieldLimits;
use crate::model::{attribute_descriptors, AttributeKind};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Entities in dependency order: every entity comes after the ones it references.
    pub entities: Vec<Entity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub fields: Vec<Field>,
    pub relations: Vec<Relation>,
    /// Table-level `CHECK` expressions, named.
    #[serde(default)]
    pub checks: Vec<Check>,
    /// Column groups that must be unique together.
    #[serde(default)]
    pub unique_together: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub default: Option<DefaultValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    Serial,
    /// Reference to another table's `id`.
    Reference,
    Text { max_len: usize },
    LongText,
    Float,
    Decimal,
    Bool,
    /// Non-negative integer.
    Count,
    /// Small integer restricted to a closed set of codes.
    Choice { codes: Vec<u16> },
    /// Short text restricted to a closed set of values.
    TextChoice { values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    Code(u16),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub kind: RelationKind,
    pub target_entity: String,
    /// Column holding the reference, for `BelongsTo`.
    pub foreign_key: Option<String>,
    /// Join table, for `ManyToMany`.
    pub through: Option<String>,
    /// What happens to this row when the target is deleted.
    pub on_delete: OnDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    BelongsTo,
    ManyToMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnDelete {
    Restrict,
    Cascade,
}

impl Schema {
    pub fn new() -> Self {
        Schema {
            entities: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

impl Entity {
    /// New entity with its serial `id` primary key.
    pub fn new(name: &str) -> Self {
        Entity {
            name: name.to_string(),
            fields: vec![Field {
                primary_key: true,
                ..Field::new("id", FieldType::Serial)
            }],
            relations: Vec::new(),
            checks: Vec::new(),
            unique_together: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn add_check(&mut self, name: &str, expression: &str) {
        self.checks.push(Check {
            name: name.to_string(),
            expression: expression.to_string(),
        });
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// `BelongsTo` relation stored in column `column`.
    pub fn relation_by_foreign_key(&self, column: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|r| r.foreign_key.as_deref() == Some(column))
    }

    /// Add a required reference column `<name>_id` plus its `BelongsTo` relation.
    fn belongs_to(&mut self, name: &str, target: &str, nullable: bool) {
        let column = format!("{}_id", name);
        self.add_field(Field {
            nullable,
            ..Field::new(&column, FieldType::Reference)
        });
        self.add_relation(Relation {
            name: name.to_string(),
            kind: RelationKind::BelongsTo,
            target_entity: target.to_string(),
            foreign_key: Some(column),
            through: None,
            on_delete: OnDelete::Restrict,
        });
    }

    fn many_to_many(&mut self, name: &str, target: &str, through: &str) {
        self.add_relation(Relation {
            name: name.to_string(),
            kind: RelationKind::ManyToMany,
            target_entity: target.to_string(),
            foreign_key: None,
            through: Some(through.to_string()),
            on_delete: OnDelete::Restrict,
        });
    }
}

impl Field {
    /// Required, non-unique column.
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Field {
            name: name.to_string(),
            field_type,
            nullable: false,
            unique: false,
            primary_key: false,
            default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

lazy_static! {
    static ref CATALOG_SCHEMA: Schema = schema_with_limits(&FieldLimits::default());
}

/// The catalog layout with the default column widths.
pub fn catalog_schema() -> &'static Schema {
    &CATALOG_SCHEMA
}

fn named_entity(name: &str, max_len: usize) -> Entity {
    let mut entity = Entity::new(name);
    entity.add_field(Field::new("name", FieldType::Text { max_len }).unique());
    entity
}

/// The catalog layout for the given column widths.
pub fn schema_with_limits(limits: &FieldLimits) -> Schema {
    let mut schema = Schema::new();

    schema.add_entity(named_entity("Country", limits.country_name));
    schema.add_entity(named_entity("EquipmentLine", limits.equipment_line_name));
    schema.add_entity(named_entity("Application", limits.label_name));
    schema.add_entity(named_entity("Category", limits.label_name));
    schema.add_entity(named_entity("AccessoryType", limits.label_name));

    let mut supplier = named_entity("Supplier", limits.supplier_name);
    supplier.add_field(Field::new("site", FieldType::Text { max_len: limits.supplier_site }));
    supplier.belongs_to("country", "Country", false);
    supplier.add_field(Field::new(
        "currency",
        FieldType::TextChoice {
            values: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
        },
    ));
    schema.add_entity(supplier);

    let mut brand = named_entity("Brand", limits.brand_name);
    brand.add_field(Field::new("site", FieldType::Text { max_len: limits.brand_site }));
    brand.belongs_to("country", "Country", false);
    brand.add_field(Field::new("description", FieldType::LongText));
    brand.add_field(
        Field::new("logo", FieldType::Text { max_len: limits.asset_path }).nullable(),
    );
    brand.many_to_many("equipment_lines", "EquipmentLine", "brand_equipment_lines");
    brand.many_to_many("suppliers", "Supplier", "brand_suppliers");
    schema.add_entity(brand);

    let mut series = Entity::new("Series");
    series.belongs_to("brand", "Brand", false);
    series.add_field(Field::new("name", FieldType::Text { max_len: limits.label_name }).unique());
    series.belongs_to("category", "Category", false);
    series.add_field(
        Field::new("image", FieldType::Text { max_len: limits.asset_path }).nullable(),
    );
    series.add_field(Field::new("description", FieldType::LongText));
    for descriptor in attribute_descriptors() {
        let field_type = match descriptor.kind {
            AttributeKind::Coded(_) => FieldType::Choice {
                codes: descriptor.codes(),
            },
            AttributeKind::Flag => FieldType::Bool,
            AttributeKind::Count => FieldType::Count,
        };
        series.add_field(Field::new(descriptor.name, field_type).nullable());
    }
    series.many_to_many("applications", "Application", "series_applications");
    schema.add_entity(series);

    let mut drive = Entity::new("FrequencyDrive");
    drive.add_field(Field::new("article", FieldType::Text { max_len: limits.article }).unique());
    drive.add_field(Field::new("name", FieldType::Text { max_len: limits.product_name }).nullable());
    drive.belongs_to("series", "Series", false);
    drive.add_field(Field::new("power", FieldType::Float));
    drive.add_field(Field::new("current", FieldType::Float).nullable());
    drive.add_field(
        Field::new(
            "voltage",
            FieldType::Choice {
                codes: Voltage::ALL.iter().map(|v| v.volts()).collect(),
            },
        )
        .with_default(DefaultValue::Code(Voltage::default().volts())),
    );
    drive.add_check("frequency_drives_power_positive", "power > 0");
    drive.add_check("frequency_drives_current_positive", "current > 0");
    schema.add_entity(drive);

    let mut accessory = Entity::new("Accessory");
    accessory.add_field(Field::new("article", FieldType::Text { max_len: limits.article }).unique());
    accessory.add_field(Field::new("name", FieldType::Text { max_len: limits.product_name }).nullable());
    accessory.belongs_to("type", "AccessoryType", false);
    accessory.many_to_many("series", "Series", "accessory_series");
    schema.add_entity(accessory);

    let mut price = Entity::new("Price");
    price.belongs_to("frequency_drive", "FrequencyDrive", true);
    price.belongs_to("accessory", "Accessory", true);
    price.belongs_to("supplier", "Supplier", false);
    price.add_field(Field::new("price", FieldType::Decimal));
    price.add_check(
        "prices_exactly_one_item",
        "(frequency_drive_id IS NULL) <> (accessory_id IS NULL)",
    );
    price.add_check("prices_price_positive", "price > 0");
    price.unique_together = vec![
        vec!["supplier_id".to_string(), "frequency_drive_id".to_string()],
        vec!["supplier_id".to_string(), "accessory_id".to_string()],
    ];
    schema.add_entity(price);

    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entities_in_dependency_order() {
        let schema = catalog_schema();
        let names: Vec<&str> = schema.entities.iter().map(|e| e.name.as_str()).collect();
        for (position, entity) in schema.entities.iter().enumerate() {
            for relation in &entity.relations {
                let target = names
                    .iter()
                    .position(|n| *n == relation.target_entity)
                    .unwrap();
                assert!(
                    target < position || relation.target_entity == entity.name,
                    "{} references {} declared later",
                    entity.name,
                    relation.target_entity
                );
            }
        }
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_series_carries_every_attribute() {
        let series = catalog_schema().get_entity("Series").unwrap();
        for descriptor in attribute_descriptors() {
            let field = series.field(descriptor.name).unwrap();
            assert!(field.nullable, "{} should be nullable", descriptor.name);
        }
        assert_eq!(
            series.field("protection_degree").unwrap().field_type,
            FieldType::Choice {
                codes: vec![1, 2, 3]
            }
        );
        assert_eq!(series.field("pid_controller").unwrap().field_type, FieldType::Count);
    }

    #[test]
    fn test_foreign_key_lookup() {
        let price = catalog_schema().get_entity("Price").unwrap();
        let relation = price.relation_by_foreign_key("supplier_id").unwrap();
        assert_eq!(relation.name, "supplier");
        assert_eq!(relation.on_delete, OnDelete::Restrict);
        assert!(price.field("frequency_drive_id").unwrap().nullable);
    }

    #[test]
    fn test_limits_flow_into_columns() {
        let limits = FieldLimits {
            country_name: 64,
            asset_path: 255,
            ..FieldLimits::default()
        };
        let schema = schema_with_limits(&limits);
        assert_eq!(
            schema.get_entity("Country").unwrap().field("name").unwrap().field_type,
            FieldType::Text { max_len: 64 }
        );
        assert_eq!(
            schema.get_entity("Series").unwrap().field("image").unwrap().field_type,
            FieldType::Text { max_len: 255 }
        );
    }

    #[test]
    fn test_voltage_default() {
        let drive = catalog_schema().get_entity("FrequencyDrive").unwrap();
        assert_eq!(
            drive.field("voltage").unwrap().default,
            Some(DefaultValue::Code(400))
        );
    }
}
