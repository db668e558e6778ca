//! Schema data model for ERD generation.
//!
//! This module provides:
//! - Parsed table records as produced by a DDL parser (`ParsedTable`), in the
//!   loosely-typed shape parsers actually emit, deserializable from JSON
//! - A regex-based DDL parser producing those records
//! - Normalized tables (`Table`) with string-only columns and a classified
//!   constraint shape, ready for rendering and graph building

mod ddl;

pub use ddl::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column exactly as the parser reported it.
///
/// Either field may be missing or hold a non-string value; both are
/// normalized by [`Column::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub col_type: Option<Value>,
}

impl RawColumn {
    pub fn new(name: &str, col_type: &str) -> Self {
        Self {
            name: Some(Value::String(name.to_string())),
            col_type: Some(Value::String(col_type.to_string())),
        }
    }
}

/// One entry of `constraints.references`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceEntry {
    /// Constraint name, when declared with `CONSTRAINT <name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Referenced (target) table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Source columns in the referencing table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Value>>,
    /// Referenced columns in the target table
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

/// One entry of a table's flat `foreign_keys` field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlatForeignKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_columns: Vec<String>,
}

/// Mapping form of `constraints`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConstraintMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ReferenceEntry>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uniques: Vec<Value>,
}

/// The `constraints` field, which parsers emit either as a mapping or as a
/// bare list of entries.
// List is tried first: an empty JSON array would otherwise deserialize as a
// default ConstraintMap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ConstraintsField {
    List(Vec<Value>),
    Mapping(ConstraintMap),
}

/// A table record as handed over by the schema parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedTable {
    #[serde(alias = "table_name")]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<RawColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintsField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_keys: Option<Vec<FlatForeignKey>>,
}

impl ParsedTable {
    /// Create a table record with no columns or constraints
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Coerce a loosely-typed parser value to display text.
///
/// Strings are taken verbatim, `null` becomes empty, anything else uses its
/// JSON rendering (`42`, `true`, `["a"]`).
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Normalized column: both fields are always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, col_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            col_type: col_type.into(),
        }
    }

    pub fn from_raw(raw: &RawColumn) -> Self {
        Self {
            name: stringify(raw.name.as_ref()),
            col_type: stringify(raw.col_type.as_ref()),
        }
    }
}

/// Which representation a table's `constraints` field arrived in
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintShape {
    /// Mapping form; references are extracted from it
    Mapping { references: Vec<ReferenceEntry> },
    /// List form; recognized but never searched for references
    List(Vec<Value>),
    /// No `constraints` field at all
    Absent,
}

impl ConstraintShape {
    pub fn classify(field: Option<ConstraintsField>) -> Self {
        match field {
            None => ConstraintShape::Absent,
            Some(ConstraintsField::Mapping(map)) => ConstraintShape::Mapping {
                references: map.references.unwrap_or_default(),
            },
            Some(ConstraintsField::List(entries)) => ConstraintShape::List(entries),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintShape::Mapping { .. } => "mapping",
            ConstraintShape::List(_) => "list",
            ConstraintShape::Absent => "absent",
        }
    }
}

/// A table after ingestion: columns normalized, constraints classified
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub constraints: ConstraintShape,
    pub foreign_keys: Vec<FlatForeignKey>,
}

impl Table {
    /// Create a table with the given columns and no constraints
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            constraints: ConstraintShape::Absent,
            foreign_keys: Vec::new(),
        }
    }

    /// Normalize a parsed record. This is the only place columns are coerced.
    pub fn from_parsed(parsed: ParsedTable) -> Self {
        let columns = parsed.columns.iter().map(Column::from_raw).collect();
        let constraints = ConstraintShape::classify(parsed.constraints);
        tracing::debug!(
            table = %parsed.name,
            shape = constraints.kind(),
            "classified constraints"
        );

        Self {
            name: parsed.name,
            columns,
            constraints,
            foreign_keys: parsed.foreign_keys.unwrap_or_default(),
        }
    }
}

/// Normalize every parsed record, preserving order
pub fn normalize(parsed: Vec<ParsedTable>) -> Vec<Table> {
    parsed.into_iter().map(Table::from_parsed).collect()
}
