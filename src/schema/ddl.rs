//! DDL parsing into parsed table records.
//!
//! Parses CREATE TABLE and ALTER TABLE statements to extract:
//! - Column definitions with their declared types
//! - Named foreign keys (`CONSTRAINT fk FOREIGN KEY ...`) into `constraints.references`
//! - Unnamed and inline foreign keys into the flat `foreign_keys` field
//! - CHECK and UNIQUE constraints into the `constraints` mapping

use super::{
    ConstraintMap, ConstraintsField, FlatForeignKey, ParsedTable, RawColumn, ReferenceEntry,
};
use crate::parser::{Parser, StatementType};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// Regex to extract table name from CREATE TABLE
/// Supports: `table` (MySQL), "table" (PostgreSQL), [table] (MSSQL),
/// table (SQLite/unquoted), schema.table
static CREATE_TABLE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)CREATE\s+(?:TEMP(?:ORARY)?\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:[\[\]`"\w]+\s*\.\s*)*[\[`"]?([^\[\]`"\s(]+)[\]`"]?"#)
        .unwrap()
});

/// Regex to extract table name from ALTER TABLE
static ALTER_TABLE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)ALTER\s+TABLE\s+(?:ONLY\s+)?(?:IF\s+EXISTS\s+)?(?:[\[\]`"\w]+\s*\.\s*)*[\[`"]?([^\[\]`"\s]+)[\]`"]?"#).unwrap()
});

/// Regex for column definition: name followed by a type with optional size and UNSIGNED
static COLUMN_DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*[\[`"]?([^\[\]`"\s,]+)[\]`"]?\s+(\w+(?:\s*\([^)]+\))?(?:\s+unsigned)?)"#)
        .unwrap()
});

/// Regex for one further word of a multi-word type such as `DOUBLE PRECISION`
static TYPE_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+(\w+)(?:\s*\([^)]+\))?").unwrap());

/// Words that end a column type and start its attributes
const TYPE_STOP_WORDS: &[&str] = &[
    "NOT",
    "NULL",
    "DEFAULT",
    "REFERENCES",
    "PRIMARY",
    "UNIQUE",
    "CHECK",
    "CONSTRAINT",
    "COLLATE",
    "CHARACTER",
    "CHARSET",
    "AUTO_INCREMENT",
    "AUTOINCREMENT",
    "GENERATED",
    "IDENTITY",
    "COMMENT",
    "KEY",
    "ON",
    "AS",
];

/// Regex for a table-level constraint entry in a CREATE TABLE body
static TABLE_CONSTRAINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:PRIMARY\s+KEY|FOREIGN\s+KEY|CONSTRAINT|KEY|INDEX|UNIQUE|FULLTEXT|SPATIAL|CHECK)\b",
    )
    .unwrap()
});

/// Regex for FOREIGN KEY constraint with optional constraint name
static FOREIGN_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:CONSTRAINT\s+[\[`"]?([^\[\]`"\s]+)[\]`"]?\s+)?FOREIGN\s+KEY\s*\(([^)]+)\)\s*REFERENCES\s+(?:[\[\]`"\w]+\s*\.\s*)*[\[`"]?([^\[\]`"\s(]+)[\]`"]?\s*(?:\(([^)]+)\))?"#,
    )
    .unwrap()
});

/// Regex for a column-level `REFERENCES table(col)` clause
static INLINE_REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\bREFERENCES\s+(?:[\[\]`"\w]+\s*\.\s*)*[\[`"]?([^\[\]`"\s(]+)[\]`"]?\s*(?:\(([^)]+)\))?"#,
    )
    .unwrap()
});

/// Regex for CHECK constraints, capturing the expression
static CHECK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bCHECK\s*\((.*)\)\s*$").unwrap());

/// Regex for table-level UNIQUE constraints, capturing the column list
static UNIQUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bUNIQUE\b[^(]*\(([^)]+)\)").unwrap());

/// Builds parsed table records from a stream of DDL statements
#[derive(Debug, Default)]
pub struct DdlParser {
    tables: Vec<ParsedTable>,
    /// Lowercased table name to position in `tables`
    index: AHashMap<String, usize>,
}

impl DdlParser {
    /// Create a new parser with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every statement in `sql` and return the resulting records
    pub fn parse_str(sql: &str) -> Vec<ParsedTable> {
        let mut parser = Parser::new(sql.as_bytes(), 8 * 1024);
        let mut ddl = DdlParser::new();
        // Reading from an in-memory slice cannot fail
        while let Ok(Some(stmt)) = parser.read_statement() {
            ddl.parse_statement(&String::from_utf8_lossy(&stmt));
        }
        ddl.finish()
    }

    /// Dispatch one statement by type, ignoring anything that is not DDL for a table
    pub fn parse_statement(&mut self, stmt: &str) -> Option<usize> {
        let (stmt_type, _) = Parser::<&[u8]>::parse_statement(stmt.as_bytes());
        match stmt_type {
            StatementType::CreateTable => self.parse_create_table(stmt),
            StatementType::AlterTable => self.parse_alter_table(stmt),
            _ => {
                tracing::trace!("skipping statement: {}", truncate(stmt, 60));
                None
            }
        }
    }

    /// Parse a CREATE TABLE statement and add its record
    pub fn parse_create_table(&mut self, stmt: &str) -> Option<usize> {
        let table_name = extract_create_table_name(stmt)?;

        // First definition wins
        if let Some(&idx) = self.index.get(&table_name.to_lowercase()) {
            tracing::debug!(table = %table_name, "duplicate CREATE TABLE ignored");
            return Some(idx);
        }

        let Some(body) = extract_table_body(stmt) else {
            tracing::warn!(table = %table_name, "CREATE TABLE without a column list, skipped");
            return None;
        };

        let mut table = ParsedTable::new(table_name);
        parse_table_body(&body, &mut table);

        let idx = self.tables.len();
        self.index.insert(table.name.to_lowercase(), idx);
        self.tables.push(table);
        Some(idx)
    }

    /// Parse an ALTER TABLE statement, attaching any foreign keys it adds
    pub fn parse_alter_table(&mut self, stmt: &str) -> Option<usize> {
        let table_name = extract_alter_table_name(stmt)?;
        let Some(&idx) = self.index.get(&table_name.to_lowercase()) else {
            tracing::debug!(table = %table_name, "ALTER TABLE for unknown table ignored");
            return None;
        };

        let table = &mut self.tables[idx];
        for fk in parse_foreign_keys(stmt) {
            fk.attach(table);
        }

        Some(idx)
    }

    /// Finish parsing and return records in declaration order
    pub fn finish(self) -> Vec<ParsedTable> {
        self.tables
    }
}

/// Extract table name from CREATE TABLE statement
pub fn extract_create_table_name(stmt: &str) -> Option<String> {
    CREATE_TABLE_NAME_RE
        .captures(stmt)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract table name from ALTER TABLE statement
pub fn extract_alter_table_name(stmt: &str) -> Option<String> {
    ALTER_TABLE_NAME_RE
        .captures(stmt)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the body of a CREATE TABLE statement (between first ( and matching ))
fn extract_table_body(stmt: &str) -> Option<String> {
    let bytes = stmt.as_bytes();
    let mut depth = 0;
    let mut start = None;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &b) in bytes.iter().enumerate() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if b == b'\\' && in_string {
            escape_next = true;
            continue;
        }

        if b == b'\'' {
            in_string = !in_string;
            continue;
        }

        if in_string {
            continue;
        }

        if b == b'(' {
            if depth == 0 {
                start = Some(i + 1);
            }
            depth += 1;
        } else if b == b')' {
            depth -= 1;
            if depth == 0 {
                if let Some(s) = start {
                    return Some(stmt[s..i].to_string());
                }
            }
        }
    }

    None
}

/// A foreign key found in DDL, before it is placed into a record
#[derive(Debug, Clone, PartialEq)]
struct DeclaredForeignKey {
    name: Option<String>,
    columns: Vec<String>,
    referenced_table: String,
    referenced_columns: Vec<String>,
}

impl DeclaredForeignKey {
    /// Named constraints go to `constraints.references`, the rest to `foreign_keys`
    fn attach(self, table: &mut ParsedTable) {
        let columns = Some(self.columns.into_iter().map(Value::String).collect());

        match self.name {
            Some(name) => {
                constraint_map(table)
                    .references
                    .get_or_insert_with(Vec::new)
                    .push(ReferenceEntry {
                        name: Some(name),
                        table: Some(self.referenced_table),
                        columns,
                        references: self.referenced_columns,
                    });
            }
            None => {
                table
                    .foreign_keys
                    .get_or_insert_with(Vec::new)
                    .push(FlatForeignKey {
                        reference_table: Some(self.referenced_table),
                        columns,
                        reference_columns: self.referenced_columns,
                    });
            }
        }
    }
}

/// The table's constraint mapping, created on first use
fn constraint_map(table: &mut ParsedTable) -> &mut ConstraintMap {
    if !matches!(table.constraints, Some(ConstraintsField::Mapping(_))) {
        table.constraints = Some(ConstraintsField::Mapping(ConstraintMap::default()));
    }
    match table.constraints {
        Some(ConstraintsField::Mapping(ref mut map)) => map,
        _ => unreachable!("constraints mapping was just inserted"),
    }
}

/// Parse the body of a CREATE TABLE to extract columns and constraints
fn parse_table_body(body: &str, table: &mut ParsedTable) {
    // Split by commas, but respect nested parentheses
    let parts = split_table_body(body);

    for part in parts {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_table_constraint(trimmed) {
            for fk in parse_foreign_keys(trimmed) {
                fk.attach(table);
            }

            if let Some(caps) = CHECK_RE.captures(trimmed) {
                let expr = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                constraint_map(table)
                    .checks
                    .push(json!({ "statement": expr }));
            } else if let Some(caps) = UNIQUE_RE.captures(trimmed) {
                let columns = caps
                    .get(1)
                    .map(|m| parse_column_list(m.as_str()))
                    .unwrap_or_default();
                constraint_map(table)
                    .uniques
                    .push(json!({ "columns": columns }));
            }
        } else if let Some((name, col_type)) = parse_column_def(trimmed) {
            if let Some(fk) = parse_inline_reference(&name, trimmed) {
                fk.attach(table);
            }
            table.columns.push(RawColumn::new(&name, &col_type));
        }
    }
}

fn is_table_constraint(part: &str) -> bool {
    TABLE_CONSTRAINT_RE.is_match(part)
}

/// Split table body by commas, respecting nested parentheses
pub fn split_table_body(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for ch in body.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        if ch == '\\' && in_string {
            current.push(ch);
            escape_next = true;
            continue;
        }

        if ch == '\'' {
            in_string = !in_string;
            current.push(ch);
            continue;
        }

        if in_string {
            current.push(ch);
            continue;
        }

        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}

/// Parse a column definition into (name, declared type)
fn parse_column_def(def: &str) -> Option<(String, String)> {
    let caps = COLUMN_DEF_RE.captures(def)?;
    let name = caps.get(1)?.as_str().to_string();
    let base = caps.get(2)?;

    let mut end = base.end();
    while let Some(word) = TYPE_WORD_RE.captures(&def[end..]) {
        let keyword = word.get(1)?.as_str();
        if TYPE_STOP_WORDS.contains(&keyword.to_uppercase().as_str()) {
            break;
        }
        end += word.get(0)?.end();
    }

    Some((name, def[base.start()..end].to_string()))
}

/// Parse a column-level REFERENCES clause
fn parse_inline_reference(column: &str, def: &str) -> Option<DeclaredForeignKey> {
    let caps = INLINE_REFERENCES_RE.captures(def)?;
    let referenced_table = caps.get(1)?.as_str().to_string();
    let referenced_columns = caps
        .get(2)
        .map(|m| parse_column_list(m.as_str()))
        .unwrap_or_default();

    Some(DeclaredForeignKey {
        name: None,
        columns: vec![column.to_string()],
        referenced_table,
        referenced_columns,
    })
}

/// Parse FOREIGN KEY constraints from a statement
fn parse_foreign_keys(stmt: &str) -> Vec<DeclaredForeignKey> {
    let mut fks = Vec::new();

    for caps in FOREIGN_KEY_RE.captures_iter(stmt) {
        let name = caps.get(1).map(|m| m.as_str().to_string());
        let columns = caps
            .get(2)
            .map(|m| parse_column_list(m.as_str()))
            .unwrap_or_default();
        let referenced_table = caps
            .get(3)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let referenced_columns = caps
            .get(4)
            .map(|m| parse_column_list(m.as_str()))
            .unwrap_or_default();

        if !columns.is_empty() && !referenced_table.is_empty() {
            fks.push(DeclaredForeignKey {
                name,
                columns,
                referenced_table,
                referenced_columns,
            });
        }
    }

    fks
}

/// Parse a comma-separated column list, stripping quotes (backticks, double quotes, brackets)
pub fn parse_column_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|c| {
            c.trim()
                .trim_matches('`')
                .trim_matches('"')
                .trim_matches('[')
                .trim_matches(']')
                .to_string()
        })
        .filter(|c| !c.is_empty())
        .collect()
}

fn truncate(s: &str, max_chars: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() > max_chars {
        let head: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}
