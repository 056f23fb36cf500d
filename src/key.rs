//! Identity keys used to match entities across two schema versions.
//!
//! Tables are keyed by name, columns by name within their table, and
//! relationships by the names of both endpoints. Ids are never used for
//! matching because proposed schemas do not carry them.

use crate::model::{Column, Relationship, Table};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipKey {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

impl RelationshipKey {
    pub fn of(rel: &Relationship) -> Self {
        Self {
            source_table: rel.source_table.clone(),
            source_column: rel.source_column.clone(),
            target_table: rel.target_table.clone(),
            target_column: rel.target_column.clone(),
        }
    }
}

impl From<&Relationship> for RelationshipKey {
    fn from(rel: &Relationship) -> Self {
        Self::of(rel)
    }
}

impl fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}->{}.{}",
            self.source_table, self.source_column, self.target_table, self.target_column
        )
    }
}

/// Index tables by name. On duplicate names the last table wins.
pub fn index_tables(tables: &[Table]) -> HashMap<&str, &Table> {
    let mut index = HashMap::with_capacity(tables.len());
    for table in tables {
        if index.insert(table.name.as_str(), table).is_some() {
            tracing::warn!(table = %table.name, "duplicate table name, last definition wins");
        }
    }
    index
}

/// Index columns by name. On duplicate names the last column wins.
pub fn index_columns(columns: &[Column]) -> HashMap<&str, &Column> {
    let mut index = HashMap::with_capacity(columns.len());
    for column in columns {
        if index.insert(column.name.as_str(), column).is_some() {
            tracing::warn!(column = %column.name, "duplicate column name, last definition wins");
        }
    }
    index
}
