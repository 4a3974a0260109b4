use thiserror::Error;

use super::naming::{entity_to_key_column, entity_to_table};
use crate::schema::{DefaultValue, Entity, Field, FieldType, OnDelete, RelationKind, Schema};

/// Result of generating DDL for a schema
/// Entity tables come first in dependency order, join tables after them.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDdl {
    /// `(table_name, CREATE TABLE statement)` per entity
    pub tables: Vec<(String, String)>,
    /// `(table_name, CREATE TABLE statement)` per many-to-many relation
    pub join_tables: Vec<(String, String)>,
}

impl GeneratedDdl {
    /// All statements as one script, each terminated by `;`.
    pub fn to_script(&self) -> String {
        self.tables
            .iter()
            .chain(self.join_tables.iter())
            .map(|(_, sql)| format!("{};\n", sql))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn table(&self, name: &str) -> Option<&str> {
        self.tables
            .iter()
            .chain(self.join_tables.iter())
            .find(|(table, _)| table == name)
            .map(|(_, sql)| sql.as_str())
    }
}

/// Generate PostgreSQL `CREATE TABLE` statements for every entity and join table
pub fn generate_ddl(schema: &Schema) -> Result<GeneratedDdl, SqlGenError> {
    let mut tables = Vec::new();
    let mut join_tables = Vec::new();

    for (position, entity) in schema.entities.iter().enumerate() {
        check_relations(schema, position, entity)?;
        let table_name = entity_to_table(&entity.name);
        tables.push((table_name.clone(), build_create_table(&table_name, entity, schema)?));

        for relation in entity.relations.iter().filter(|r| r.kind == RelationKind::ManyToMany) {
            let through = relation.through.as_ref().ok_or_else(|| SqlGenError::MissingJoinTable {
                entity: entity.name.clone(),
                relation: relation.name.clone(),
            })?;
            let sql = build_join_table(through, &entity.name, &relation.target_entity, relation.on_delete);
            join_tables.push((through.clone(), sql));
        }
    }

    Ok(GeneratedDdl {
        tables,
        join_tables,
    })
}

/// Every relation target must be declared before the entity referencing it
fn check_relations(schema: &Schema, position: usize, entity: &Entity) -> Result<(), SqlGenError> {
    for relation in &entity.relations {
        let target = schema
            .entities
            .iter()
            .position(|e| e.name == relation.target_entity)
            .ok_or_else(|| SqlGenError::UnknownEntity(relation.target_entity.clone()))?;
        if target >= position {
            return Err(SqlGenError::OutOfOrder {
                entity: entity.name.clone(),
                target: relation.target_entity.clone(),
            });
        }
        if relation.kind == RelationKind::BelongsTo {
            let fk = relation.foreign_key.as_ref().ok_or_else(|| SqlGenError::MissingForeignKey {
                entity: entity.name.clone(),
                relation: relation.name.clone(),
            })?;
            if entity.field(fk).is_none() {
                return Err(SqlGenError::UnknownColumn {
                    entity: entity.name.clone(),
                    column: fk.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Build one entity's CREATE TABLE
fn build_create_table(table_name: &str, entity: &Entity, schema: &Schema) -> Result<String, SqlGenError> {
    let mut lines: Vec<String> = entity.fields.iter().map(column_sql).collect();

    for relation in entity.relations.iter().filter(|r| r.kind == RelationKind::BelongsTo) {
        // Presence checked in check_relations
        let Some(fk) = relation.foreign_key.as_ref() else {
            continue;
        };
        let target = schema
            .get_entity(&relation.target_entity)
            .ok_or_else(|| SqlGenError::UnknownEntity(relation.target_entity.clone()))?;
        lines.push(format!(
            "CONSTRAINT fk_{}_{} FOREIGN KEY ({}) REFERENCES {}(id) ON DELETE {}",
            table_name,
            fk,
            fk,
            entity_to_table(&target.name),
            on_delete_sql(relation.on_delete),
        ));
    }

    for columns in &entity.unique_together {
        if let Some(missing) = columns.iter().find(|c| entity.field(c).is_none()) {
            return Err(SqlGenError::UnknownColumn {
                entity: entity.name.clone(),
                column: missing.clone(),
            });
        }
        lines.push(format!("UNIQUE ({})", columns.join(", ")));
    }

    for check in &entity.checks {
        lines.push(format!("CONSTRAINT {} CHECK ({})", check.name, check.expression));
    }

    Ok(format!(
        "CREATE TABLE {} (\n    {}\n)",
        table_name,
        lines.join(",\n    ")
    ))
}

/// Build a single column definition
fn column_sql(field: &Field) -> String {
    if field.primary_key {
        return format!("{} SERIAL PRIMARY KEY", field.name);
    }

    let mut parts = vec![field.name.clone(), type_sql(&field.field_type)];
    if !field.nullable {
        parts.push("NOT NULL".to_string());
    }
    if field.unique {
        parts.push("UNIQUE".to_string());
    }
    if let Some(default) = &field.default {
        parts.push(format!("DEFAULT {}", default_sql(default)));
    }
    if let Some(check) = column_check(&field.name, &field.field_type) {
        parts.push(format!("CHECK ({})", check));
    }
    parts.join(" ")
}

fn type_sql(field_type: &FieldType) -> String {
    match field_type {
        FieldType::Serial => "SERIAL".to_string(),
        FieldType::Reference | FieldType::Count => "INTEGER".to_string(),
        FieldType::Text { max_len } => format!("VARCHAR({})", max_len),
        FieldType::LongText => "TEXT".to_string(),
        FieldType::Float => "DOUBLE PRECISION".to_string(),
        FieldType::Decimal => "NUMERIC(14, 2)".to_string(),
        FieldType::Bool => "BOOLEAN".to_string(),
        FieldType::Choice { .. } => "SMALLINT".to_string(),
        FieldType::TextChoice { values } => {
            let width = values.iter().map(|v| v.chars().count()).max().unwrap_or(1);
            format!("VARCHAR({})", width)
        }
    }
}

/// Vocabulary and range checks implied by the column type
fn column_check(name: &str, field_type: &FieldType) -> Option<String> {
    match field_type {
        FieldType::Count => Some(format!("{} >= 0", name)),
        FieldType::Choice { codes } => {
            let list: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
            Some(format!("{} IN ({})", name, list.join(", ")))
        }
        FieldType::TextChoice { values } => {
            let list: Vec<String> = values.iter().map(|v| quote_literal(v)).collect();
            Some(format!("{} IN ({})", name, list.join(", ")))
        }
        _ => None,
    }
}

fn default_sql(default: &DefaultValue) -> String {
    match default {
        DefaultValue::Code(code) => code.to_string(),
        DefaultValue::Literal(text) => quote_literal(text),
    }
}

fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn on_delete_sql(on_delete: OnDelete) -> &'static str {
    match on_delete {
        OnDelete::Restrict => "RESTRICT",
        OnDelete::Cascade => "CASCADE",
    }
}

/// Build a join table for a many-to-many relation
/// Rows go with their owner; the target side is protected.
fn build_join_table(through: &str, owner: &str, target: &str, target_on_delete: OnDelete) -> String {
    let owner_column = entity_to_key_column(owner);
    let target_column = entity_to_key_column(target);
    format!(
        "CREATE TABLE {} (\n    {} INTEGER NOT NULL REFERENCES {}(id) ON DELETE CASCADE,\n    {} INTEGER NOT NULL REFERENCES {}(id) ON DELETE {},\n    PRIMARY KEY ({}, {})\n)",
        through,
        owner_column,
        entity_to_table(owner),
        target_column,
        entity_to_table(target),
        on_delete_sql(target_on_delete),
        owner_column,
        target_column,
    )
}

/// Errors during DDL generation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlGenError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
    #[error("Entity '{entity}' references '{target}', which is declared after it")]
    OutOfOrder { entity: String, target: String },
    #[error("Missing foreign key for relation '{relation}' in '{entity}'")]
    MissingForeignKey { entity: String, relation: String },
    #[error("Missing join table for relation '{relation}' in '{entity}'")]
    MissingJoinTable { entity: String, relation: String },
    #[error("Unknown column '{column}' in entity '{entity}'")]
    UnknownColumn { entity: String, column: String },
}
