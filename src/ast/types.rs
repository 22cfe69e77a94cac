//! SQL data type definitions, used both by `CAST` expressions and by
//! `CREATE TABLE` column definitions.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::arena::NodeId;

/// SQL data types as they appear in `CAST(x AS <type>)` or a column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Smallint,
    Integer,
    Bigint,
    Real,
    Double,
    Decimal {
        precision: Option<u16>,
        scale: Option<u16>,
    },
    Numeric {
        precision: Option<u16>,
        scale: Option<u16>,
    },
    Char(Option<u32>),
    Varchar(Option<u32>),
    Text,
    Blob,
    Binary(Option<u32>),
    Varbinary(Option<u32>),
    Date,
    Time,
    Timestamp,
    Datetime,
    Boolean,
    /// Database-specific type not otherwise recognized.
    Custom(String),
}

impl DataType {
    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Smallint => "SMALLINT".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::Bigint => "BIGINT".to_string(),
            Self::Real => "REAL".to_string(),
            Self::Double => "DOUBLE".to_string(),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            },
            Self::Numeric { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("NUMERIC({p}, {s})"),
                (Some(p), None) => format!("NUMERIC({p})"),
                _ => "NUMERIC".to_string(),
            },
            Self::Char(len) => len.map_or_else(|| "CHAR".to_string(), |n| format!("CHAR({n})")),
            Self::Varchar(len) => {
                len.map_or_else(|| "VARCHAR".to_string(), |n| format!("VARCHAR({n})"))
            }
            Self::Text => "TEXT".to_string(),
            Self::Blob => "BLOB".to_string(),
            Self::Binary(len) => {
                len.map_or_else(|| "BINARY".to_string(), |n| format!("BINARY({n})"))
            }
            Self::Varbinary(len) => {
                len.map_or_else(|| "VARBINARY".to_string(), |n| format!("VARBINARY({n})"))
            }
            Self::Date => "DATE".to_string(),
            Self::Time => "TIME".to_string(),
            Self::Timestamp => "TIMESTAMP".to_string(),
            Self::Datetime => "DATETIME".to_string(),
            Self::Boolean => "BOOLEAN".to_string(),
            Self::Custom(name) => name.clone(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Per-column constraint in a `CREATE TABLE` column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnConstraint {
    PrimaryKey { autoincrement: bool },
    NotNull,
    Unique,
    Default(NodeId),
    Check(NodeId),
}

/// Table-level constraint in a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableConstraint {
    PrimaryKey(Vec<String>),
    Unique(Vec<String>),
    ForeignKey {
        columns: Vec<String>,
        references_table: String,
        references_columns: Vec<String>,
    },
}

/// A single column definition inside a `CREATE TABLE` statement's AST node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    /// `None` for SQLite's typeless column declarations (`name` with no type).
    pub data_type: Option<DataType>,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn nullable(&self) -> bool {
        !self
            .constraints
            .iter()
            .any(|c| matches!(c, ColumnConstraint::NotNull | ColumnConstraint::PrimaryKey { .. }))
    }
}
