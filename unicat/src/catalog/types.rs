// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog-native column types
//!
//! These are the types stored in table descriptors. Every backend maps its
//! physical types onto this set; the metadata adapters translate them into
//! the engine's type system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub comment: Option<String>,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    Date,
    Time,
    Timestamp { with_time_zone: bool },
    IntervalYear,
    IntervalDay,
    String,
    VarChar(u32),
    FixedChar(u32),
    Binary,
    Fixed(u32),
    Uuid,
    List {
        element_type: Box<DataType>,
        element_nullable: bool,
    },
    Map {
        key_type: Box<DataType>,
        value_type: Box<DataType>,
        value_nullable: bool,
    },
    Struct(Vec<StructField>),
    /// Backend type the catalog could not parse, kept verbatim
    Unparsed(String),
}

impl DataType {
    pub fn list(element_type: DataType, element_nullable: bool) -> Self {
        DataType::List {
            element_type: Box::new(element_type),
            element_nullable,
        }
    }

    pub fn map(key_type: DataType, value_type: DataType, value_nullable: bool) -> Self {
        DataType::Map {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
            value_nullable,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "boolean"),
            DataType::Byte => write!(f, "byte"),
            DataType::Short => write!(f, "short"),
            DataType::Integer => write!(f, "integer"),
            DataType::Long => write!(f, "long"),
            DataType::Float => write!(f, "float"),
            DataType::Double => write!(f, "double"),
            DataType::Decimal { precision, scale } => write!(f, "decimal({},{})", precision, scale),
            DataType::Date => write!(f, "date"),
            DataType::Time => write!(f, "time"),
            DataType::Timestamp { with_time_zone } => {
                if *with_time_zone {
                    write!(f, "timestamp_tz")
                } else {
                    write!(f, "timestamp")
                }
            }
            DataType::IntervalYear => write!(f, "interval_year"),
            DataType::IntervalDay => write!(f, "interval_day"),
            DataType::String => write!(f, "string"),
            DataType::VarChar(len) => write!(f, "varchar({})", len),
            DataType::FixedChar(len) => write!(f, "char({})", len),
            DataType::Binary => write!(f, "binary"),
            DataType::Fixed(len) => write!(f, "fixed({})", len),
            DataType::Uuid => write!(f, "uuid"),
            DataType::List { element_type, .. } => write!(f, "list<{}>", element_type),
            DataType::Map {
                key_type,
                value_type,
                ..
            } => write!(f, "map<{},{}>", key_type, value_type),
            DataType::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", field.name, field.data_type)?;
                }
                write!(f, ">")
            }
            DataType::Unparsed(text) => write!(f, "{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let t = DataType::map(
            DataType::String,
            DataType::list(DataType::Decimal { precision: 10, scale: 2 }, true),
            true,
        );
        assert_eq!(t.to_string(), "map<string,list<decimal(10,2)>>");
    }

    #[test]
    fn test_display_struct() {
        let t = DataType::Struct(vec![
            StructField::new("id", DataType::Long, false),
            StructField::new("tag", DataType::VarChar(8), true),
        ]);
        assert_eq!(t.to_string(), "struct<id:long,tag:varchar(8)>");
    }
}
