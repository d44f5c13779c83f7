// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Adapters for JDBC-backed relational catalogs
//!
//! Relational backends have no partitioning and a flat type system, so
//! both adapters keep the default table translation and only narrow the
//! type mapping.

use super::properties::{PropertyEntry, JDBC_CATALOG_PROPERTY_ENTRIES};
use super::types::{self, unsupported_catalog_type, unsupported_engine_type};
use super::MetadataAdapter;
use crate::catalog::error::CatalogResult;
use crate::catalog::provider::CatalogProvider;
use crate::catalog::types::DataType;
use crate::connector::spi::EngineType;
use once_cell::sync::Lazy;

/// MySQL and PostgreSQL both keep microseconds
const JDBC_TIME_PRECISION: u8 = 6;

static MYSQL_TABLE_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::enumerated(
            "engine",
            "Storage engine of the table",
            &["innodb", "myisam", "memory", "csv", "archive"],
        )
        .with_default("innodb"),
        PropertyEntry::long("auto_increment_offset", "Starting value of auto-increment columns")
            .stored_as("auto-increment-offset"),
    ]
});

#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlMetadataAdapter;

impl MetadataAdapter for MySqlMetadataAdapter {
    fn provider(&self) -> CatalogProvider {
        CatalogProvider::JdbcMysql
    }

    fn catalog_property_entries(&self) -> &[PropertyEntry] {
        &JDBC_CATALOG_PROPERTY_ENTRIES
    }

    fn schema_property_entries(&self) -> &[PropertyEntry] {
        &[]
    }

    fn table_property_entries(&self) -> &[PropertyEntry] {
        &MYSQL_TABLE_PROPERTIES
    }

    fn to_engine_type(&self, data_type: &DataType) -> CatalogResult<EngineType> {
        match data_type {
            DataType::List { .. }
            | DataType::Map { .. }
            | DataType::Struct(_)
            | DataType::Uuid
            | DataType::Timestamp {
                with_time_zone: true,
            } => Err(unsupported_catalog_type(self.provider(), data_type)),
            _ => types::to_engine_type(self, data_type, JDBC_TIME_PRECISION),
        }
    }

    fn to_catalog_type(&self, engine_type: &EngineType) -> CatalogResult<DataType> {
        match engine_type {
            EngineType::Array(_)
            | EngineType::Map(..)
            | EngineType::Row(_)
            | EngineType::Uuid
            | EngineType::TimestampWithTimeZone(_) => {
                Err(unsupported_engine_type(self.provider(), engine_type))
            }
            _ => types::to_catalog_type(self, engine_type, JDBC_TIME_PRECISION),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgreSqlMetadataAdapter;

impl MetadataAdapter for PostgreSqlMetadataAdapter {
    fn provider(&self) -> CatalogProvider {
        CatalogProvider::JdbcPostgresql
    }

    fn catalog_property_entries(&self) -> &[PropertyEntry] {
        &JDBC_CATALOG_PROPERTY_ENTRIES
    }

    fn schema_property_entries(&self) -> &[PropertyEntry] {
        &[]
    }

    fn table_property_entries(&self) -> &[PropertyEntry] {
        &[]
    }

    fn to_engine_type(&self, data_type: &DataType) -> CatalogResult<EngineType> {
        match data_type {
            DataType::Map { .. } | DataType::Struct(_) => {
                Err(unsupported_catalog_type(self.provider(), data_type))
            }
            _ => types::to_engine_type(self, data_type, JDBC_TIME_PRECISION),
        }
    }

    fn to_catalog_type(&self, engine_type: &EngineType) -> CatalogResult<DataType> {
        match engine_type {
            EngineType::Map(..) | EngineType::Row(_) => {
                Err(unsupported_engine_type(self.provider(), engine_type))
            }
            _ => types::to_catalog_type(self, engine_type, JDBC_TIME_PRECISION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::CatalogError;
    use crate::connector::spi::{ColumnMetadata, PropertyValue, SchemaTableName, TableMetadata};

    #[test]
    fn test_mysql_rejects_nested_types() {
        let adapter = MySqlMetadataAdapter;
        let err = adapter
            .to_engine_type(&DataType::list(DataType::Integer, true))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedType(_)));
        assert!(adapter
            .to_catalog_type(&EngineType::Array(Box::new(EngineType::Integer)))
            .is_err());
        assert_eq!(
            adapter.to_engine_type(&DataType::VarChar(255)).unwrap(),
            EngineType::Varchar(Some(255))
        );
    }

    #[test]
    fn test_postgresql_arrays() {
        let adapter = PostgreSqlMetadataAdapter;
        let array = EngineType::Array(Box::new(EngineType::BigInt));
        assert_eq!(
            adapter.to_catalog_type(&array).unwrap(),
            DataType::list(DataType::Long, true)
        );
        assert!(adapter
            .to_catalog_type(&EngineType::Map(
                Box::new(EngineType::Integer),
                Box::new(EngineType::Integer)
            ))
            .is_err());
        // arrays of maps are rejected at the nested level
        assert!(adapter
            .to_catalog_type(&EngineType::Array(Box::new(EngineType::Map(
                Box::new(EngineType::Integer),
                Box::new(EngineType::Integer)
            ))))
            .is_err());
    }

    #[test]
    fn test_mysql_table_properties() {
        let adapter = MySqlMetadataAdapter;
        let metadata = TableMetadata::new(
            SchemaTableName::new("db", "orders"),
            vec![ColumnMetadata::new("id", EngineType::BigInt, false)],
        )
        .with_property("engine", PropertyValue::from("MyISAM"))
        .with_property("auto_increment_offset", PropertyValue::Long(100));

        let table = adapter.create_table(&metadata).unwrap();
        assert_eq!(table.properties.get("engine").map(String::as_str), Some("myisam"));
        assert_eq!(
            table.properties.get("auto-increment-offset").map(String::as_str),
            Some("100")
        );
        assert!(table.partitioning.is_empty());
    }
}
