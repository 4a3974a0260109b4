pub mod ast;
pub mod eval;
pub mod filter;

pub use ast::{OrderByClause, Query, SortDirection};
pub use eval::{like_to_regex, Cell};
pub use filter::{ComparisonOp, FieldPath, FilterCondition, FilterExpr, FilterValue, LogicalOp};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::choices::{ProtectionDegree, Voltage};
    use crate::error::CatalogError;
    use crate::model::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> FilterValue {
        FilterValue::String(value.to_string())
    }

    /// Helper: two brands, three series, four drives
    ///   Danfoss (Denmark): VLT Micro [HVAC, IP20], VLT Aqua [Pumps, IP55]
    ///   ABB (Switzerland): ACS580 [HVAC, Pumps, IP21]
    fn browsing_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let dk = catalog.create_country("Denmark").unwrap();
        let ch = catalog.create_country("Switzerland").unwrap();
        let general = catalog.create_category("General").unwrap();
        let hvac = catalog.create_application("HVAC").unwrap();
        let pumps = catalog.create_application("Pumps").unwrap();

        let brand = |catalog: &mut Catalog, name: &str, country| {
            catalog
                .create_brand(NewBrand {
                    name: name.into(),
                    site: String::new(),
                    country,
                    description: String::new(),
                    logo: None,
                    equipment_lines: vec![],
                    suppliers: vec![],
                })
                .unwrap()
        };
        let danfoss = brand(&mut catalog, "Danfoss", dk);
        let abb = brand(&mut catalog, "ABB", ch);

        let mut micro = NewSeries::new(danfoss, "VLT Micro", general);
        micro.applications = vec![hvac];
        micro.attributes.protection_degree = Some(ProtectionDegree::Ip20);
        micro.attributes.fire_mode = Some(false);
        let micro = catalog.create_series(micro).unwrap();

        let mut aqua = NewSeries::new(danfoss, "VLT Aqua", general);
        aqua.applications = vec![pumps];
        aqua.attributes.protection_degree = Some(ProtectionDegree::Ip55);
        aqua.attributes.fire_mode = Some(true);
        aqua.attributes.pid_controller = Some(4);
        let aqua = catalog.create_series(aqua).unwrap();

        let mut acs = NewSeries::new(abb, "ACS580", general);
        acs.applications = vec![hvac, pumps];
        acs.attributes.protection_degree = Some(ProtectionDegree::Ip21);
        let acs = catalog.create_series(acs).unwrap();

        let mut single_phase = NewFrequencyDrive::new("FC51-0.75", micro, 0.75);
        single_phase.voltage = Voltage::V230;
        catalog.create_drive(single_phase).unwrap();
        catalog.create_drive(NewFrequencyDrive::new("FC51-2.2", micro, 2.2)).unwrap();
        let mut aqua_drive = NewFrequencyDrive::new("FC202-15", aqua, 15.0);
        aqua_drive.name = Some("VLT AQUA Drive FC 202".into());
        aqua_drive.current = Some(32.0);
        catalog.create_drive(aqua_drive).unwrap();
        catalog.create_drive(NewFrequencyDrive::new("ACS580-4", acs, 4.0)).unwrap();
        catalog
    }

    fn series_names(catalog: &Catalog, query: &Query) -> Vec<String> {
        catalog
            .find_series(query)
            .unwrap()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    fn drive_articles(catalog: &Catalog, query: &Query) -> Vec<String> {
        catalog
            .find_drives(query)
            .unwrap()
            .iter()
            .map(|d| d.article.clone())
            .collect()
    }

    // ─── FIELD PATH ───

    #[test]
    fn test_field_path_simple() {
        let path = FieldPath::parse("name");
        assert_eq!(path.segments, vec!["name"]);
        assert!(!path.is_nested());
        assert_eq!(path.root(), "name");
    }

    #[test]
    fn test_field_path_nested() {
        let path = FieldPath::parse("brand.country.name");
        assert_eq!(path.segments, vec!["brand", "country", "name"]);
        assert!(path.is_nested());
        assert_eq!(path.root(), "brand");
        assert_eq!(path.to_string(), "brand.country.name");
    }

    // ─── FILTER EXPRESSIONS ───

    #[test]
    fn test_and_or_filter() {
        let f1 = FilterExpr::condition("power", ComparisonOp::Gte, FilterValue::Float(1.0));
        let f2 = FilterExpr::condition("power", ComparisonOp::Lte, FilterValue::Int(10));
        assert!(matches!(f1.clone().and(f2.clone()), FilterExpr::Binary { op: LogicalOp::And, .. }));
        assert!(matches!(f1.or(f2), FilterExpr::Binary { op: LogicalOp::Or, .. }));
    }

    #[test]
    fn test_like_to_regex() {
        let pattern = like_to_regex("vlt%").unwrap();
        assert!(pattern.is_match("VLT Micro"));
        assert!(!pattern.is_match("ACS580"));

        let pattern = like_to_regex("FC5_-2.2").unwrap();
        assert!(pattern.is_match("fc51-2.2"));
        assert!(!pattern.is_match("FC51-232"));
    }

    // ─── SERIALIZATION ───

    #[test]
    fn test_query_json_shape() {
        let query = Query::from_json(
            r#"{
                "entity": "Series",
                "filters": [
                    {"condition": {"field": "brand.name", "op": "eq", "value": "Danfoss"}},
                    {"condition": {"field": "protection_degree", "op": "in", "value": [1, 3]}}
                ],
                "order_by": [{"field": "name", "direction": "desc"}],
                "limit": 5
            }"#,
        )
        .unwrap();

        let expected = Query::new("Series")
            .filter(FilterExpr::condition("brand.name", ComparisonOp::Eq, text("Danfoss")))
            .filter(FilterExpr::condition(
                "protection_degree",
                ComparisonOp::In,
                FilterValue::List(vec![FilterValue::Int(1), FilterValue::Int(3)]),
            ))
            .order_by("name", SortDirection::Desc)
            .limit(5);
        assert_eq!(query, expected);

        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(Query::from_json(&json).unwrap(), query);
    }

    #[test]
    fn test_malformed_query_document() {
        assert!(matches!(
            Query::from_json(r#"{"filters": []}"#),
            Err(CatalogError::InvalidValue { .. })
        ));
    }

    // ─── SERIES BROWSING ───

    #[test]
    fn test_default_order_is_brand_then_name() {
        let catalog = browsing_catalog();
        assert_eq!(
            series_names(&catalog, &Query::new("Series")),
            vec!["ACS580", "VLT Aqua", "VLT Micro"]
        );
    }

    #[test]
    fn test_filter_by_brand_and_attribute() {
        let catalog = browsing_catalog();
        let query = Query::new("Series")
            .filter(FilterExpr::condition("brand.name", ComparisonOp::Eq, text("Danfoss")))
            .filter(FilterExpr::condition(
                "protection_degree",
                ComparisonOp::Eq,
                FilterValue::Int(3),
            ));
        assert_eq!(series_names(&catalog, &query), vec!["VLT Aqua"]);
    }

    #[test]
    fn test_filter_by_flag_and_null() {
        let catalog = browsing_catalog();
        let fire = Query::new("Series").filter(FilterExpr::condition(
            "fire_mode",
            ComparisonOp::Eq,
            FilterValue::Bool(true),
        ));
        assert_eq!(series_names(&catalog, &fire), vec!["VLT Aqua"]);

        let unknown = Query::new("Series").filter(FilterExpr::condition(
            "fire_mode",
            ComparisonOp::Eq,
            FilterValue::Null,
        ));
        assert_eq!(series_names(&catalog, &unknown), vec!["ACS580"]);
    }

    #[test]
    fn test_filter_through_many_to_many() {
        let catalog = browsing_catalog();
        let query = Query::new("Series").filter(FilterExpr::condition(
            "applications.name",
            ComparisonOp::Eq,
            text("Pumps"),
        ));
        assert_eq!(series_names(&catalog, &query), vec!["ACS580", "VLT Aqua"]);
    }

    #[test]
    fn test_or_and_like() {
        let catalog = browsing_catalog();
        let query = Query::new("Series").filter(
            FilterExpr::condition("name", ComparisonOp::Like, text("%micro"))
                .or(FilterExpr::condition("brand.country.name", ComparisonOp::Eq, text("Switzerland"))),
        );
        assert_eq!(series_names(&catalog, &query), vec!["ACS580", "VLT Micro"]);
    }

    #[test]
    fn test_order_limit_offset() {
        let catalog = browsing_catalog();
        let query = Query::new("Series")
            .order_by("pid_controller", SortDirection::Desc)
            .order_by("name", SortDirection::Asc)
            .limit(2)
            .offset(1);
        assert_eq!(series_names(&catalog, &query), vec!["ACS580", "VLT Micro"]);
    }

    // ─── DRIVE BROWSING ───

    #[test]
    fn test_drive_power_range() {
        let catalog = browsing_catalog();
        let query = Query::new("FrequencyDrive")
            .filter(FilterExpr::condition("power", ComparisonOp::Gt, FilterValue::Int(1)))
            .filter(FilterExpr::condition("voltage", ComparisonOp::Eq, FilterValue::Int(400)));
        assert_eq!(
            drive_articles(&catalog, &query),
            vec!["ACS580-4", "FC202-15", "FC51-2.2"]
        );
    }

    #[test]
    fn test_drive_by_series_path() {
        let catalog = browsing_catalog();
        let query = Query::new("FrequencyDrive")
            .filter(FilterExpr::condition(
                "series.name",
                ComparisonOp::In,
                FilterValue::List(vec![text("VLT Micro"), text("ACS580")]),
            ))
            .order_by("power", SortDirection::Desc);
        assert_eq!(
            drive_articles(&catalog, &query),
            vec!["ACS580-4", "FC51-2.2", "FC51-0.75"]
        );
    }

    #[test]
    fn test_drive_name_and_current() {
        let catalog = browsing_catalog();
        let named = Query::new("FrequencyDrive").filter(FilterExpr::condition(
            "name",
            ComparisonOp::Like,
            text("%aqua%"),
        ));
        assert_eq!(drive_articles(&catalog, &named), vec!["FC202-15"]);

        let rated = Query::new("FrequencyDrive").filter(FilterExpr::condition(
            "current",
            ComparisonOp::Neq,
            FilterValue::Null,
        ));
        assert_eq!(drive_articles(&catalog, &rated), vec!["FC202-15"]);
    }

    // ─── ERRORS ───

    #[test]
    fn test_unknown_entity_and_field() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.run_query(&Query::new("Brand")).unwrap_err(),
            CatalogError::UnknownEntity("Brand".to_string())
        );

        let query = Query::new("Series").filter(FilterExpr::condition(
            "brand.logo",
            ComparisonOp::Eq,
            FilterValue::Null,
        ));
        assert_eq!(
            catalog.run_query(&query).unwrap_err(),
            CatalogError::UnknownField {
                entity: "Series".to_string(),
                field: "brand.logo".to_string(),
            }
        );

        let query = Query::new("FrequencyDrive").order_by("weight", SortDirection::Asc);
        assert!(matches!(
            catalog.run_query(&query),
            Err(CatalogError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_operator_value_mismatch() {
        let catalog = Catalog::new();
        let query = Query::new("Series").filter(FilterExpr::condition(
            "name",
            ComparisonOp::In,
            text("VLT"),
        ));
        assert!(matches!(
            catalog.find_series(&query),
            Err(CatalogError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_run_query_renders_rows() {
        let catalog = browsing_catalog();
        let rows = catalog
            .run_query(&Query::new("FrequencyDrive").limit(1))
            .unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["article"], "ACS580-4");
        assert_eq!(rows[0]["voltage"], 400);
    }
}
