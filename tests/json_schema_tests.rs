//! Integration tests that verify JSON output matches the published JSON schemas.
//!
//! Schemas are taken from `sql-erd schema <name>` so the test always checks
//! the binary against its own declared contract.

use jsonschema::Validator;
use serde_json::{json, Value};
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn sql_erd_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sql-erd"))
}

fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn load_schema(name: &str) -> Validator {
    let output = sql_erd_bin()
        .arg("schema")
        .arg(name)
        .output()
        .expect("Failed to run schema command");
    assert!(output.status.success(), "schema {} not available", name);

    let schema: Value = serde_json::from_slice(&output.stdout).expect("Invalid schema JSON");
    Validator::new(&schema).expect("Failed to compile schema")
}

fn assert_valid(schema_name: &str, json: &Value) {
    let schema = load_schema(schema_name);
    if let Err(error) = schema.validate(json) {
        panic!(
            "JSON doesn't match {} schema:\n  - {}: {}\n\nJSON was:\n{}",
            schema_name,
            error.instance_path(),
            error,
            serde_json::to_string_pretty(json).unwrap()
        );
    }
}

// =============================================================================
// Graph Command
// =============================================================================

#[test]
fn test_graph_json_matches_schema() {
    let sql = r#"
CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(255));
CREATE TABLE orders (
  id INT PRIMARY KEY,
  user_id INT,
  CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users(id)
);
CREATE TABLE shipments (id INT, order_id INT REFERENCES orders(id), carrier_id INT REFERENCES carriers(id));
"#;
    let file = create_temp_file(sql, ".sql");

    let output = sql_erd_bin()
        .arg("graph")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to run graph");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Command failed with stderr: {}", stderr);

    let json: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
    assert_valid("graph", &json);
    assert_eq!(json["stats"]["edge_count"], 3);
}

// =============================================================================
// Table Records
// =============================================================================

#[test]
fn test_table_records_match_schema() {
    let records = json!([
        {
            "name": "orders",
            "columns": [{"name": "id", "type": "INT"}, {"name": 7, "type": null}],
            "constraints": {
                "references": [{"table": "customers", "columns": ["customer_id"]}],
                "checks": [{"statement": "id > 0"}]
            },
            "foreign_keys": [{"reference_table": "customers", "columns": ["customer_id"]}]
        },
        {"name": "notes", "columns": [], "constraints": []}
    ]);

    assert_valid("tables", &records);

    // The same records are accepted by the graph command
    let file = create_temp_file(&records.to_string(), ".json");
    let output = sql_erd_bin()
        .arg("graph")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to run graph");
    assert!(output.status.success());
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_default_config_matches_schema() {
    let config = json!({
        "style": {"min_name_chars": 20, "edge_color": "#ff0000"},
        "physics": {"spring_length": 300.0},
        "canvas": {"height": "900px", "directed": false}
    });
    assert_valid("config", &config);

    let schema = load_schema("config");
    assert!(!schema.is_valid(&json!({"style": {"colour": "red"}})));
}
