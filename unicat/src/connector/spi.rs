// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine-side metadata shapes
//!
//! These types describe metadata the way the query engine's connector
//! contract expects it. The metadata adapters produce and consume them; the
//! bridge passes them through.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Engine-qualified table name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaTableName {
    pub schema_name: String,
    pub table_name: String,
}

impl SchemaTableName {
    pub fn new(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
        }
    }
}

impl fmt::Display for SchemaTableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema_name, self.table_name)
    }
}

/// Field of a row type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowField {
    pub name: String,
    pub field_type: EngineType,
}

impl RowField {
    pub fn new(name: impl Into<String>, field_type: EngineType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Column types of the engine's type system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal { precision: u8, scale: u8 },
    Date,
    Time(u8),
    Timestamp(u8),
    TimestampWithTimeZone(u8),
    /// Unbounded when the length is `None`
    Varchar(Option<u32>),
    Char(u32),
    Varbinary,
    Uuid,
    Json,
    Array(Box<EngineType>),
    Map(Box<EngineType>, Box<EngineType>),
    Row(Vec<RowField>),
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineType::Boolean => write!(f, "boolean"),
            EngineType::TinyInt => write!(f, "tinyint"),
            EngineType::SmallInt => write!(f, "smallint"),
            EngineType::Integer => write!(f, "integer"),
            EngineType::BigInt => write!(f, "bigint"),
            EngineType::Real => write!(f, "real"),
            EngineType::Double => write!(f, "double"),
            EngineType::Decimal { precision, scale } => {
                write!(f, "decimal({},{})", precision, scale)
            }
            EngineType::Date => write!(f, "date"),
            EngineType::Time(p) => write!(f, "time({})", p),
            EngineType::Timestamp(p) => write!(f, "timestamp({})", p),
            EngineType::TimestampWithTimeZone(p) => write!(f, "timestamp({}) with time zone", p),
            EngineType::Varchar(None) => write!(f, "varchar"),
            EngineType::Varchar(Some(len)) => write!(f, "varchar({})", len),
            EngineType::Char(len) => write!(f, "char({})", len),
            EngineType::Varbinary => write!(f, "varbinary"),
            EngineType::Uuid => write!(f, "uuid"),
            EngineType::Json => write!(f, "json"),
            EngineType::Array(element) => write!(f, "array({})", element),
            EngineType::Map(key, value) => write!(f, "map({}, {})", key, value),
            EngineType::Row(fields) => {
                write!(f, "row(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", field.name, field.field_type)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Typed property value as the engine sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    List(Vec<String>),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the value's kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Long(_) => "long",
            PropertyValue::Double(_) => "double",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::List(_) => "list",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Long(v) => write!(f, "{}", v),
            PropertyValue::Double(v) => write!(f, "{}", v),
            PropertyValue::Boolean(v) => write!(f, "{}", v),
            PropertyValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Long(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Boolean(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub column_type: EngineType,
    pub nullable: bool,
    pub comment: Option<String>,
    pub default_value: Option<String>,
    /// Free-form note shown next to the column, e.g. "auto_increment"
    pub extra_info: Option<String>,
    pub hidden: bool,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, column_type: EngineType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable,
            comment: None,
            default_value: None,
            extra_info: None,
            hidden: false,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub table: SchemaTableName,
    pub columns: Vec<ColumnMetadata>,
    pub properties: HashMap<String, PropertyValue>,
    pub comment: Option<String>,
}

impl TableMetadata {
    pub fn new(table: SchemaTableName, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            table,
            columns,
            properties: HashMap::new(),
            comment: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Version bound for time-travel table lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableVersion {
    Snapshot(i64),
    Timestamp(chrono::DateTime<chrono::Utc>),
}

/// How the engine retries failed inserts; the bridge only forwards it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryMode {
    NoRetries,
    RetriesEnabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalType {
    User,
    Role,
}

/// Owner passed along with schema creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub principal_type: PrincipalType,
    pub name: String,
}

impl Principal {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            principal_type: PrincipalType::User,
            name: name.into(),
        }
    }
}

/// Serialized output of one insert writer task
pub type Fragment = Vec<u8>;

/// Statistics computed by the engine while writing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedStatistics {
    pub grouping_columns: Vec<String>,
    pub table_statistics: HashMap<String, f64>,
    pub column_statistics: HashMap<String, HashMap<String, f64>>,
}
