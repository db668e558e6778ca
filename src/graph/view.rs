//! Table selection for ERD generation.

use crate::schema::Table;
use glob::Pattern;

/// Include/exclude glob patterns applied to table names before building.
///
/// Removing a table removes its node and the edges it declares; edges from
/// kept tables into removed ones are left in place.
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl TableFilter {
    /// Build a filter from comma-separated pattern lists (`users,order_*`)
    pub fn from_lists(
        tables: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<Self, glob::PatternError> {
        Ok(Self {
            include: parse_patterns(tables)?,
            exclude: parse_patterns(exclude)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Whether a table with this name is kept
    pub fn matches(&self, name: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| p.matches(name));
        included && !self.exclude.iter().any(|p| p.matches(name))
    }

    /// Keep only matching tables, preserving order
    pub fn apply(&self, tables: Vec<Table>) -> Vec<Table> {
        if self.is_empty() {
            return tables;
        }

        tables.into_iter().filter(|t| self.matches(&t.name)).collect()
    }
}

fn parse_patterns(list: Option<&str>) -> Result<Vec<Pattern>, glob::PatternError> {
    list.map(|l| {
        l.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Pattern::new)
            .collect()
    })
    .unwrap_or_else(|| Ok(Vec::new()))
}
