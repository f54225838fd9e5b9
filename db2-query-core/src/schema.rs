//! Table metadata snapshots reported by the schema collaborator

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::Value;

/// A table name with an optional schema qualifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// Split `schema.table` into its parts
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('.') {
            Some((schema, name)) if !schema.is_empty() => Self::qualified(schema, name),
            _ => Self::new(raw),
        }
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<&str> for TableName {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// The value category a declared column type stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Double,
    Boolean,
    String,
    Binary,
}

impl ColumnKind {
    /// Classify a declared DB2 type such as `INTEGER` or `VARCHAR(64)`
    pub fn from_db_type(db_type: &str) -> Self {
        let base = db_type
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match base.as_str() {
            "smallint" | "integer" | "int" | "bigint" => ColumnKind::Integer,
            "real" | "double" | "float" | "decfloat" => ColumnKind::Double,
            "boolean" => ColumnKind::Boolean,
            "blob" | "binary" | "varbinary" => ColumnKind::Binary,
            // DECIMAL stays textual so precision survives binding
            _ => ColumnKind::String,
        }
    }
}

/// Metadata of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub db_type: String,
    pub kind: ColumnKind,
    pub size: Option<u32>,
    pub allow_null: bool,
    pub is_primary_key: bool,
    pub auto_increment: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, db_type: impl Into<String>) -> Self {
        let db_type = db_type.into();
        Self {
            name: name.into(),
            kind: ColumnKind::from_db_type(&db_type),
            db_type,
            size: None,
            allow_null: true,
            is_primary_key: false,
            auto_increment: false,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.allow_null = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Normalize a value before it is bound for storage in this column
    pub fn db_typecast(&self, value: &Value) -> Value {
        if let Value::String(s) = value {
            if s.is_empty()
                && self.allow_null
                && !matches!(self.kind, ColumnKind::String | ColumnKind::Binary)
            {
                return Value::Null;
            }
        }

        match (self.kind, value) {
            (ColumnKind::Integer, Value::Bool(b)) => Value::I32(i32::from(*b)),
            (ColumnKind::Integer, Value::F64(f)) if f.is_finite() => Value::I64(f.trunc() as i64),
            (ColumnKind::Integer, Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Value::I64(i),
                Err(_) => value.clone(),
            },
            (ColumnKind::Double, Value::I32(i)) => Value::F64(f64::from(*i)),
            (ColumnKind::Double, Value::I64(i)) => Value::F64(*i as f64),
            (ColumnKind::Double, Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) => Value::F64(f),
                Err(_) => value.clone(),
            },
            (ColumnKind::Boolean, Value::I32(i)) => Value::Bool(*i != 0),
            (ColumnKind::Boolean, Value::I64(i)) => Value::Bool(*i != 0),
            (ColumnKind::String, Value::Bool(b)) => Value::String(if *b { "1" } else { "0" }.into()),
            (ColumnKind::String, Value::I32(i)) => Value::String(i.to_string()),
            (ColumnKind::String, Value::I64(i)) => Value::String(i.to_string()),
            (ColumnKind::String, Value::F64(f)) => Value::String(f.to_string()),
            _ => value.clone(),
        }
    }
}

/// Snapshot of a table's columns and identity column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: TableName,
    pub columns: Vec<ColumnSchema>,
    pub sequence_name: Option<String>,
}

impl TableSchema {
    pub fn new(name: impl Into<TableName>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            sequence_name: None,
        }
    }

    pub fn column(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Declare the identity column backing the table's sequence
    pub fn sequence(mut self, column: impl Into<String>) -> Self {
        self.sequence_name = Some(column.into());
        self
    }

    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The identity column, provided it is one of the table's columns
    pub fn sequence_column(&self) -> Option<&ColumnSchema> {
        self.sequence_name
            .as_deref()
            .and_then(|name| self.get_column(name))
    }
}
