//! Evaluation of browsing queries against the in-memory catalog.
//!
//! A query is compiled first: every path is resolved to a typed column and
//! every `like` pattern to a regex, so an unknown field fails even when the
//! table is empty. Rows then start in catalog listing order; `order_by`
//! re-sorts them stably.

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

use super::ast::{Query, SortDirection};
use super::filter::{ComparisonOp, FieldPath, FilterExpr, FilterValue, LogicalOp};
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::model::*;

/// A value read from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
    /// Values reached through a many-to-many link.
    Many(Vec<Cell>),
}

impl Cell {
    fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    fn optional_text(value: Option<&str>) -> Self {
        value.map(Cell::text).unwrap_or(Cell::Null)
    }

    fn equals(&self, value: &FilterValue) -> bool {
        match (self, value) {
            (Cell::Many(cells), _) => cells.iter().any(|c| c.equals(value)),
            (Cell::Null, FilterValue::Null) => true,
            (Cell::Text(a), FilterValue::String(b)) => a == b,
            (Cell::Bool(a), FilterValue::Bool(b)) => a == b,
            (Cell::Number(a), other) => other.as_number() == Some(*a),
            _ => false,
        }
    }

    fn compare(&self, value: &FilterValue) -> Option<Ordering> {
        match (self, value) {
            (Cell::Text(a), FilterValue::String(b)) => Some(a.as_str().cmp(b.as_str())),
            (Cell::Number(a), other) => other.as_number().and_then(|b| a.partial_cmp(&b)),
            (Cell::Bool(a), FilterValue::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn matches(&self, pattern: &Regex) -> bool {
        match self {
            Cell::Text(text) => pattern.is_match(text),
            Cell::Many(cells) => cells.iter().any(|c| c.matches(pattern)),
            _ => false,
        }
    }

    /// Sort order: nulls first, then by value.
    fn sort_cmp(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Null, Cell::Null) => Ordering::Equal,
            (Cell::Null, _) => Ordering::Less,
            (_, Cell::Null) => Ordering::Greater,
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Many(a), Cell::Many(b)) => a.len().cmp(&b.len()),
            _ => Ordering::Equal,
        }
    }
}

/// A typed column of a queryable entity.
trait Column: Sized {
    type Row;

    const ENTITY: &'static str;

    fn resolve(segments: &[String]) -> Option<Self>;

    fn read(&self, catalog: &Catalog, row: &Self::Row) -> Cell;

    fn parse(path: &FieldPath) -> Result<Self, CatalogError> {
        Self::resolve(&path.segments).ok_or_else(|| CatalogError::UnknownField {
            entity: Self::ENTITY.to_string(),
            field: path.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum SeriesColumn {
    Id,
    Name,
    Description,
    Attribute(&'static AttributeDescriptor),
    BrandId,
    BrandName,
    BrandCountryName,
    CategoryId,
    CategoryName,
    ApplicationName,
}

impl Column for SeriesColumn {
    type Row = Series;

    const ENTITY: &'static str = SeriesId::ENTITY;

    fn resolve(segments: &[String]) -> Option<Self> {
        let path: Vec<&str> = segments.iter().map(String::as_str).collect();
        let column = match path.as_slice() {
            ["id"] => SeriesColumn::Id,
            ["name"] => SeriesColumn::Name,
            ["description"] => SeriesColumn::Description,
            ["brand"] | ["brand", "id"] => SeriesColumn::BrandId,
            ["brand", "name"] => SeriesColumn::BrandName,
            ["brand", "country", "name"] => SeriesColumn::BrandCountryName,
            ["category"] | ["category", "id"] => SeriesColumn::CategoryId,
            ["category", "name"] => SeriesColumn::CategoryName,
            ["applications", "name"] => SeriesColumn::ApplicationName,
            [field] => SeriesColumn::Attribute(attribute_descriptor(field)?),
            _ => return None,
        };
        Some(column)
    }

    fn read(&self, catalog: &Catalog, series: &Series) -> Cell {
        match self {
            SeriesColumn::Id => Cell::Number(f64::from(series.id.raw())),
            SeriesColumn::Name => Cell::text(&series.name),
            SeriesColumn::Description => Cell::text(&series.description),
            SeriesColumn::Attribute(descriptor) => match series.attributes.get(descriptor.name) {
                Ok(Some(AttributeValue::Flag(flag))) => Cell::Bool(flag),
                Ok(Some(AttributeValue::Code(code))) => Cell::Number(f64::from(code)),
                Ok(Some(AttributeValue::Count(n))) => Cell::Number(f64::from(n)),
                _ => Cell::Null,
            },
            SeriesColumn::BrandId => Cell::Number(f64::from(series.brand.raw())),
            SeriesColumn::BrandName => {
                Cell::optional_text(catalog.brand(series.brand).map(|b| b.name.as_str()))
            }
            SeriesColumn::BrandCountryName => Cell::optional_text(
                catalog
                    .brand(series.brand)
                    .and_then(|b| catalog.country(b.country))
                    .map(|c| c.name.as_str()),
            ),
            SeriesColumn::CategoryId => Cell::Number(f64::from(series.category.raw())),
            SeriesColumn::CategoryName => {
                Cell::optional_text(catalog.category(series.category).map(|c| c.name.as_str()))
            }
            SeriesColumn::ApplicationName => Cell::Many(
                series
                    .applications
                    .iter()
                    .filter_map(|id| catalog.application(*id))
                    .map(|a| Cell::text(&a.name))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DriveColumn {
    Id,
    Article,
    Name,
    Power,
    Current,
    Voltage,
    Series(SeriesColumn),
}

impl Column for DriveColumn {
    type Row = FrequencyDrive;

    const ENTITY: &'static str = FrequencyDriveId::ENTITY;

    fn resolve(segments: &[String]) -> Option<Self> {
        let (first, rest) = segments.split_first()?;
        let column = match (first.as_str(), rest.is_empty()) {
            ("id", true) => DriveColumn::Id,
            ("article", true) => DriveColumn::Article,
            ("name", true) => DriveColumn::Name,
            ("power", true) => DriveColumn::Power,
            ("current", true) => DriveColumn::Current,
            ("voltage", true) => DriveColumn::Voltage,
            ("series", true) => DriveColumn::Series(SeriesColumn::Id),
            ("series", false) => DriveColumn::Series(SeriesColumn::resolve(rest)?),
            _ => return None,
        };
        Some(column)
    }

    fn read(&self, catalog: &Catalog, drive: &FrequencyDrive) -> Cell {
        match self {
            DriveColumn::Id => Cell::Number(f64::from(drive.id.raw())),
            DriveColumn::Article => Cell::text(&drive.article),
            DriveColumn::Name => Cell::optional_text(drive.name.as_deref()),
            DriveColumn::Power => Cell::Number(drive.power),
            DriveColumn::Current => drive.current.map(Cell::Number).unwrap_or(Cell::Null),
            DriveColumn::Voltage => Cell::Number(f64::from(drive.voltage.volts())),
            DriveColumn::Series(column) => match catalog.series(drive.series) {
                Some(series) => column.read(catalog, series),
                None => Cell::Null,
            },
        }
    }
}

enum Compiled<C> {
    Compare {
        column: C,
        op: ComparisonOp,
        value: FilterValue,
    },
    Like {
        column: C,
        pattern: Regex,
    },
    Binary {
        left: Box<Compiled<C>>,
        op: LogicalOp,
        right: Box<Compiled<C>>,
    },
}

/// Translate a SQL `LIKE` pattern into an anchored, case-insensitive regex.
pub fn like_to_regex(pattern: &str) -> Result<Regex, CatalogError> {
    let mut source = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| CatalogError::invalid("Query", "like", e.to_string()))
}

fn compile<C: Column>(expr: &FilterExpr) -> Result<Compiled<C>, CatalogError> {
    match expr {
        FilterExpr::Condition(cond) => {
            let column = C::parse(&cond.field)?;
            match (cond.op, &cond.value) {
                (ComparisonOp::Like, FilterValue::String(pattern)) => Ok(Compiled::Like {
                    column,
                    pattern: like_to_regex(pattern)?,
                }),
                (ComparisonOp::Like, other) => Err(CatalogError::invalid(
                    C::ENTITY,
                    &cond.field.to_string(),
                    format!("like needs a string pattern, got {}", other),
                )),
                (ComparisonOp::In, FilterValue::List(_)) => Ok(Compiled::Compare {
                    column,
                    op: ComparisonOp::In,
                    value: cond.value.clone(),
                }),
                (ComparisonOp::In, other) => Err(CatalogError::invalid(
                    C::ENTITY,
                    &cond.field.to_string(),
                    format!("in needs a list, got {}", other),
                )),
                (op, value) => Ok(Compiled::Compare {
                    column,
                    op,
                    value: value.clone(),
                }),
            }
        }
        FilterExpr::Binary { left, op, right } => Ok(Compiled::Binary {
            left: Box::new(compile(left)?),
            op: *op,
            right: Box::new(compile(right)?),
        }),
    }
}

fn evaluate<C: Column>(compiled: &Compiled<C>, catalog: &Catalog, row: &C::Row) -> bool {
    match compiled {
        Compiled::Like { column, pattern } => column.read(catalog, row).matches(pattern),
        Compiled::Compare { column, op, value } => {
            let cell = column.read(catalog, row);
            match op {
                ComparisonOp::Eq => cell.equals(value),
                ComparisonOp::Neq => !cell.equals(value),
                ComparisonOp::In => match value {
                    FilterValue::List(items) => items.iter().any(|item| cell.equals(item)),
                    _ => false,
                },
                ComparisonOp::Gt => cell.compare(value) == Some(Ordering::Greater),
                ComparisonOp::Gte => matches!(
                    cell.compare(value),
                    Some(Ordering::Greater | Ordering::Equal)
                ),
                ComparisonOp::Lt => cell.compare(value) == Some(Ordering::Less),
                ComparisonOp::Lte => {
                    matches!(cell.compare(value), Some(Ordering::Less | Ordering::Equal))
                }
                ComparisonOp::Like => false,
            }
        }
        Compiled::Binary { left, op, right } => match op {
            LogicalOp::And => evaluate(left, catalog, row) && evaluate(right, catalog, row),
            LogicalOp::Or => evaluate(left, catalog, row) || evaluate(right, catalog, row),
        },
    }
}

fn select<'a, C: Column>(
    catalog: &'a Catalog,
    query: &Query,
    rows: Vec<&'a C::Row>,
) -> Result<Vec<&'a C::Row>, CatalogError> {
    let filters = query
        .filters
        .iter()
        .map(compile::<C>)
        .collect::<Result<Vec<_>, _>>()?;
    let order = query
        .order_by
        .iter()
        .map(|clause| Ok((C::parse(&FieldPath::parse(&clause.field))?, clause.direction)))
        .collect::<Result<Vec<_>, CatalogError>>()?;

    let mut selected: Vec<&C::Row> = rows
        .into_iter()
        .filter(|row| filters.iter().all(|f| evaluate(f, catalog, row)))
        .collect();

    if !order.is_empty() {
        selected.sort_by(|a, b| {
            order
                .iter()
                .map(|(column, direction)| {
                    let ordering = column.read(catalog, a).sort_cmp(&column.read(catalog, b));
                    match direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    let offset = query.offset.unwrap_or(0) as usize;
    let limit = query.limit.map(|n| n as usize).unwrap_or(usize::MAX);
    Ok(selected.into_iter().skip(offset).take(limit).collect())
}

impl Catalog {
    /// Series matching a query whose entity is "Series".
    pub fn find_series(&self, query: &Query) -> Result<Vec<&Series>, CatalogError> {
        expect_entity(query, SeriesColumn::ENTITY)?;
        select::<SeriesColumn>(self, query, self.all_series())
    }

    /// Drives matching a query whose entity is "FrequencyDrive".
    pub fn find_drives(&self, query: &Query) -> Result<Vec<&FrequencyDrive>, CatalogError> {
        expect_entity(query, DriveColumn::ENTITY)?;
        select::<DriveColumn>(self, query, self.drives())
    }

    /// Run a query for any queryable entity, rows rendered as JSON.
    pub fn run_query(&self, query: &Query) -> Result<Value, CatalogError> {
        let rows = if query.entity == SeriesColumn::ENTITY {
            serde_json::to_value(self.find_series(query)?)
        } else if query.entity == DriveColumn::ENTITY {
            serde_json::to_value(self.find_drives(query)?)
        } else {
            return Err(CatalogError::UnknownEntity(query.entity.clone()));
        }
        .map_err(|e| CatalogError::invalid("Query", "result", e.to_string()))?;
        debug!(entity = %query.entity, rows = rows.as_array().map_or(0, Vec::len), "query evaluated");
        Ok(rows)
    }
}

fn expect_entity(query: &Query, entity: &str) -> Result<(), CatalogError> {
    if query.entity == entity {
        Ok(())
    } else {
        Err(CatalogError::UnknownEntity(query.entity.clone()))
    }
}
