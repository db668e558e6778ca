//! Schema command: print JSON Schemas for the tool's JSON inputs and outputs.

use crate::json_schema::{all_schemas, get_schema, schema_names};
use anyhow::{bail, Result};

pub fn run(name: Option<String>) -> Result<()> {
    let output = match name {
        Some(name) => match get_schema(&name) {
            Some(schema) => serde_json::to_string_pretty(&schema)?,
            None => bail!(
                "unknown schema: {}. Available: {}",
                name,
                schema_names().join(", ")
            ),
        },
        None => serde_json::to_string_pretty(&all_schemas())?,
    };

    println!("{}", output);
    Ok(())
}
