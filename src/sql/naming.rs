/// Converts schema names to PostgreSQL naming conventions
///
/// Entity names: PascalCase → snake_case plural
///   Country        → countries
///   FrequencyDrive → frequency_drives
///   Series         → series
///
/// Field names are already snake_case and pass through.

/// Convert a PascalCase entity name to a snake_case plural table name
pub fn entity_to_table(entity_name: &str) -> String {
    let snake = pascal_to_snake(entity_name);
    pluralize(&snake)
}

/// Column referencing an entity from a join table
/// "EquipmentLine" → "equipment_line_id"
pub fn entity_to_key_column(entity_name: &str) -> String {
    format!("{}_id", pascal_to_snake(entity_name))
}

/// Convert PascalCase to snake_case
/// "AccessoryType" → "accessory_type"
/// "Brand"         → "brand"
pub fn pascal_to_snake(name: &str) -> String {
    let mut result = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch.is_uppercase() && prev_lower {
            result.push('_');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        result.extend(ch.to_lowercase());
    }

    result
}

/// English pluralization for the last word of a snake_case name
/// "brand"     → "brands"
/// "category"  → "categories"
/// "series"    → "series"
/// "box"       → "boxes"
pub fn pluralize(name: &str) -> String {
    if name.ends_with("series") {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{}ies", stem);
        }
    }
    if name.ends_with('s') || name.ends_with('x') || name.ends_with("ch") || name.ends_with("sh") {
        return format!("{}es", name);
    }
    format!("{}s", name)
}
