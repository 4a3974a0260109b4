pub mod generator;
pub mod naming;

pub use generator::{generate_ddl, GeneratedDdl, SqlGenError};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn catalog_ddl() -> GeneratedDdl {
        generate_ddl(catalog_schema()).unwrap()
    }

    /// Helper: two-entity schema, Owner → Thing
    fn small_schema() -> Schema {
        let mut schema = Schema::new();

        let mut owner = Entity::new("Owner");
        owner.add_field(Field::new("name", FieldType::Text { max_len: 20 }).unique());
        schema.add_entity(owner);

        let mut thing = Entity::new("Thing");
        thing.add_field(Field::new("owner_id", FieldType::Reference));
        thing.add_relation(Relation {
            name: "owner".to_string(),
            kind: RelationKind::BelongsTo,
            target_entity: "Owner".to_string(),
            foreign_key: Some("owner_id".to_string()),
            through: None,
            on_delete: OnDelete::Cascade,
        });
        schema.add_entity(thing);

        schema
    }

    // ─── NAMING ───

    #[test]
    fn test_naming_conventions() {
        assert_eq!(naming::entity_to_table("Country"), "countries");
        assert_eq!(naming::entity_to_table("Series"), "series");
        assert_eq!(naming::entity_to_table("FrequencyDrive"), "frequency_drives");
    }

    // ─── TABLES ───

    #[test]
    fn test_tables_in_dependency_order() {
        let ddl = catalog_ddl();
        let names: Vec<&str> = ddl.tables.iter().map(|(n, _)| n.as_str()).collect();
        let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
        assert!(position("countries") < position("suppliers"));
        assert!(position("brands") < position("series"));
        assert!(position("series") < position("frequency_drives"));
        assert!(position("accessories") < position("prices"));
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_reference_table() {
        let ddl = catalog_ddl();
        let sql = ddl.table("countries").unwrap();
        assert!(sql.starts_with("CREATE TABLE countries ("));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("name VARCHAR(30) NOT NULL UNIQUE"));
    }

    #[test]
    fn test_foreign_keys_restrict() {
        let ddl = catalog_ddl();
        let sql = ddl.table("suppliers").unwrap();
        assert!(sql.contains("country_id INTEGER NOT NULL"));
        assert!(sql.contains(
            "CONSTRAINT fk_suppliers_country_id FOREIGN KEY (country_id) REFERENCES countries(id) ON DELETE RESTRICT"
        ));
        assert!(sql.contains("currency VARCHAR(3) NOT NULL CHECK (currency IN ('BYN', 'RUB', 'EUR', 'USD', 'CNY'))"));
    }

    // ─── CHECKS ───

    #[test]
    fn test_coded_attribute_checks() {
        let ddl = catalog_ddl();
        let sql = ddl.table("series").unwrap();
        assert!(sql.contains("protection_degree SMALLINT CHECK (protection_degree IN (1, 2, 3))"));
        assert!(sql.contains("use_relative_humidity SMALLINT CHECK (use_relative_humidity IN (20, 40, 50))"));
        assert!(sql.contains("fire_mode BOOLEAN,"));
        assert!(sql.contains("pid_controller INTEGER CHECK (pid_controller >= 0)"));
    }

    #[test]
    fn test_drive_columns() {
        let ddl = catalog_ddl();
        let sql = ddl.table("frequency_drives").unwrap();
        assert!(sql.contains("article VARCHAR(30) NOT NULL UNIQUE"));
        assert!(sql.contains("voltage SMALLINT NOT NULL DEFAULT 400 CHECK (voltage IN (230, 400))"));
        assert!(sql.contains("CHECK (power > 0)"));
    }

    #[test]
    fn test_price_exclusivity_and_uniqueness() {
        let ddl = catalog_ddl();
        let sql = ddl.table("prices").unwrap();
        assert!(sql.contains("frequency_drive_id INTEGER,"));
        assert!(sql.contains("accessory_id INTEGER,"));
        assert!(sql.contains(
            "CONSTRAINT prices_exactly_one_item CHECK ((frequency_drive_id IS NULL) <> (accessory_id IS NULL))"
        ));
        assert!(sql.contains("UNIQUE (supplier_id, frequency_drive_id)"));
        assert!(sql.contains("UNIQUE (supplier_id, accessory_id)"));
        assert!(sql.contains("price NUMERIC(14, 2) NOT NULL"));
    }

    // ─── JOIN TABLES ───

    #[test]
    fn test_join_tables() {
        let ddl = catalog_ddl();
        let names: Vec<&str> = ddl.join_tables.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "brand_equipment_lines",
                "brand_suppliers",
                "series_applications",
                "accessory_series"
            ]
        );
        let sql = ddl.table("brand_suppliers").unwrap();
        assert!(sql.contains("brand_id INTEGER NOT NULL REFERENCES brands(id) ON DELETE CASCADE"));
        assert!(sql.contains("supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE RESTRICT"));
        assert!(sql.contains("PRIMARY KEY (brand_id, supplier_id)"));
    }

    #[test]
    fn test_script_terminates_statements() {
        let script = catalog_ddl().to_script();
        assert_eq!(script.matches("CREATE TABLE").count(), 15);
        assert_eq!(script.matches(");\n").count(), 15);
    }

    // ─── ERRORS ───

    #[test]
    fn test_cascade_relation() {
        let ddl = generate_ddl(&small_schema()).unwrap();
        assert!(ddl.table("things").unwrap().contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_unknown_target() {
        let mut schema = small_schema();
        schema.entities.remove(0);
        assert_eq!(
            generate_ddl(&schema).unwrap_err(),
            SqlGenError::UnknownEntity("Owner".to_string())
        );
    }

    #[test]
    fn test_out_of_order() {
        let mut schema = small_schema();
        schema.entities.swap(0, 1);
        assert!(matches!(
            generate_ddl(&schema),
            Err(SqlGenError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_missing_fk_column() {
        let mut schema = small_schema();
        schema.entities[1].fields.retain(|f| f.name != "owner_id");
        assert!(matches!(
            generate_ddl(&schema),
            Err(SqlGenError::UnknownColumn { .. })
        ));
    }
}
