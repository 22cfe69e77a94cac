//! The table/column model produced by the external column-parser
//! collaborator and consumed by the analyzer (§3, §6).
//!
//! Nothing here validates or constructs these values from SQL text —
//! `CREATE TABLE` parsed from source is represented in the AST but never
//! promoted to a registered [`Table`] (§4.9); registration is the
//! engine's [`crate::engine::Engine::register_table`] taking a `Table`
//! handed in from outside.

use serde::{Deserialize, Serialize};

/// The SQL-level base type of a column, as seen by the analyzer. `Datetime`
/// is carried as `integer` at the SQL level but keeps its own variant here
/// so [`Column::base_type`] can attach the `IsDateTime` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Boolean,
    Text,
    Integer,
    Real,
    Blob,
    Datetime,
}

/// Column-level metadata beyond its type and nullability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    AutoIncrement,
    PrimaryKey,
    LimitingTextLength { min: Option<u32>, max: Option<u32> },
    UniqueKey,
    NotNull,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub nullable: bool,
    pub features: Vec<Feature>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType, nullable: bool) -> Self {
        Self { name: name.into(), column_type, nullable, features: Vec::new() }
    }

    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.features.iter().any(|f| matches!(f, Feature::PrimaryKey))
    }
}

/// A table as registered with the engine via [`crate::engine::Engine::register_table`].
/// `constraints` is carried verbatim from the external collaborator; the
/// analyzer does not interpret it (§9 open question on foreign keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub constraints: Vec<String>,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self { name: name.into(), columns, constraints: Vec::new() }
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup_is_case_insensitive() {
        let table = Table::new(
            "demo",
            vec![Column::new("Id", ColumnType::Integer, false)],
        );
        assert!(table.column("id").is_some());
        assert!(table.column("ID").is_some());
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn primary_key_feature_is_detected() {
        let mut col = Column::new("id", ColumnType::Integer, false);
        col.features.push(Feature::PrimaryKey);
        assert!(col.is_primary_key());
    }
}
