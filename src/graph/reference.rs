//! Foreign-key references derived from a table's constraint metadata.

use crate::schema::{stringify, ConstraintShape, Table};
use serde_json::Value;

/// Where a reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOrigin {
    /// `constraints.references` (mapping form)
    Constraints,
    /// The flat `foreign_keys` field
    ForeignKeys,
}

/// One directed relationship from a referencing table to a referenced one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyReference {
    pub source_table: String,
    pub target_table: String,
    /// First source column, empty when the entry named none
    pub source_column: String,
    pub origin: ReferenceOrigin,
}

impl ForeignKeyReference {
    /// Edge label shown for this reference
    pub fn label(&self) -> String {
        format!("FK: {}", self.source_column)
    }
}

/// Collect every reference a table declares.
///
/// Mapping-form references come first, then the flat `foreign_keys` entries.
/// The two sources are independent: a key present in both yields two
/// references. List-form constraints contribute nothing. Entries without a
/// target table are skipped; targets are not checked against known tables.
pub fn collect_references(table: &Table) -> Vec<ForeignKeyReference> {
    let mut refs = Vec::new();

    match &table.constraints {
        ConstraintShape::Mapping { references } => {
            for entry in references {
                push_reference(
                    &mut refs,
                    table,
                    entry.table.as_deref(),
                    entry.columns.as_deref(),
                    ReferenceOrigin::Constraints,
                );
            }
        }
        ConstraintShape::List(entries) => {
            tracing::debug!(
                table = %table.name,
                entries = entries.len(),
                "list-form constraints are not searched for references"
            );
        }
        ConstraintShape::Absent => {}
    }

    for fk in &table.foreign_keys {
        push_reference(
            &mut refs,
            table,
            fk.reference_table.as_deref(),
            fk.columns.as_deref(),
            ReferenceOrigin::ForeignKeys,
        );
    }

    refs
}

fn push_reference(
    refs: &mut Vec<ForeignKeyReference>,
    table: &Table,
    target: Option<&str>,
    columns: Option<&[Value]>,
    origin: ReferenceOrigin,
) {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        return;
    };

    let source_column = stringify(columns.and_then(|c| c.first()));

    refs.push(ForeignKeyReference {
        source_table: table.name.clone(),
        target_table: target.to_string(),
        source_column,
        origin,
    });
}
