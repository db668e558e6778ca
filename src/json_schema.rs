//! JSON Schema generation for the tool's JSON formats.
//!
//! Covers the `graph --format json` output, the pre-parsed table records
//! accepted by `graph --input-format json`, and the YAML config (whose
//! structure is the same in JSON terms).

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all JSON schemas keyed by name.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    schemas.insert("config", schema_for!(crate::config::DiagramConfig));
    schemas.insert("graph", schema_for!(crate::graph::format::DiagramJson));
    schemas.insert("tables", schema_for!(Vec<crate::schema::ParsedTable>));

    schemas
}

/// Generate a single schema by name.
pub fn get_schema(name: &str) -> Option<Schema> {
    all_schemas().remove(name)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_names() {
        assert_eq!(schema_names(), vec!["config", "graph", "tables"]);
    }

    #[test]
    fn test_graph_schema_lists_properties() {
        let schema = serde_json::to_value(get_schema("graph").unwrap()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("nodes").is_some());
        assert!(properties.get("edges").is_some());
        assert!(properties.get("stats").is_some());
    }

    #[test]
    fn test_unknown_schema() {
        assert!(get_schema("analyze").is_none());
    }
}
