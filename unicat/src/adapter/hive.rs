// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Hive metastore adapter

use super::properties::{
    to_catalog_properties, to_engine_properties, PropertyEntry, AUTHENTICATION_PROPERTY_ENTRIES,
};
use super::transform::identity_columns;
use super::types::{self, unsupported_catalog_type, unsupported_engine_type, DEFAULT_TIME_PRECISION};
use super::{MetadataAdapter, TableOptions};
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::metadata::{TableDescriptor, Transform};
use crate::catalog::provider::CatalogProvider;
use crate::catalog::types::DataType;
use crate::connector::spi::{EngineType, PropertyValue};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Engine property listing identity partition columns
pub const PARTITIONED_BY: &str = "partitioned_by";

static CATALOG_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    let mut entries = AUTHENTICATION_PROPERTY_ENTRIES.clone();
    entries.push(
        PropertyEntry::string("metastore.uris", "Thrift URIs of the Hive metastore").required(),
    );
    entries.push(
        PropertyEntry::long("client.pool-size", "Metastore client pool size").with_default("1"),
    );
    entries
});

static SCHEMA_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![PropertyEntry::string("location", "Directory of the schema's tables")]
});

static TABLE_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::enumerated(
            "format",
            "Storage format",
            &["textfile", "sequencefile", "rcfile", "orc", "parquet", "avro", "json", "csv"],
        )
        .with_default("textfile"),
        PropertyEntry::string("location", "Table directory"),
        PropertyEntry::string("table_type", "MANAGED_TABLE or EXTERNAL_TABLE").stored_as("table-type"),
        PropertyEntry::long("total_size", "Total size of the table's files")
            .stored_as("totalSize")
            .reserved(),
        PropertyEntry::list(PARTITIONED_BY, "Identity partition columns"),
        PropertyEntry::list("bucketed_by", "Bucketing columns").stored_as("bucket-columns"),
        PropertyEntry::long("bucket_count", "Number of buckets").stored_as("bucket-num"),
    ]
});

#[derive(Debug, Default, Clone, Copy)]
pub struct HiveMetadataAdapter;

impl MetadataAdapter for HiveMetadataAdapter {
    fn provider(&self) -> CatalogProvider {
        CatalogProvider::Hive
    }

    fn catalog_property_entries(&self) -> &[PropertyEntry] {
        &CATALOG_PROPERTIES
    }

    fn schema_property_entries(&self) -> &[PropertyEntry] {
        &SCHEMA_PROPERTIES
    }

    fn table_property_entries(&self) -> &[PropertyEntry] {
        &TABLE_PROPERTIES
    }

    fn partition_property(&self) -> Option<&'static str> {
        Some(PARTITIONED_BY)
    }

    fn to_engine_type(&self, data_type: &DataType) -> CatalogResult<EngineType> {
        match data_type {
            DataType::Time
            | DataType::Uuid
            | DataType::Timestamp {
                with_time_zone: true,
            } => Err(unsupported_catalog_type(self.provider(), data_type)),
            _ => types::to_engine_type(self, data_type, DEFAULT_TIME_PRECISION),
        }
    }

    fn to_catalog_type(&self, engine_type: &EngineType) -> CatalogResult<DataType> {
        match engine_type {
            EngineType::Time(_) | EngineType::Uuid | EngineType::TimestampWithTimeZone(_) => {
                Err(unsupported_engine_type(self.provider(), engine_type))
            }
            _ => types::to_catalog_type(self, engine_type, DEFAULT_TIME_PRECISION),
        }
    }

    fn to_engine_table_properties(
        &self,
        table: &TableDescriptor,
    ) -> CatalogResult<HashMap<String, PropertyValue>> {
        let mut properties = to_engine_properties(&TABLE_PROPERTIES, &table.properties)?;
        let partition_columns = identity_columns(&table.partitioning, "hive")?;
        if !partition_columns.is_empty() {
            properties.insert(PARTITIONED_BY.to_string(), PropertyValue::List(partition_columns));
        }
        Ok(properties)
    }

    fn to_catalog_table_options(
        &self,
        properties: &HashMap<String, PropertyValue>,
    ) -> CatalogResult<TableOptions> {
        let mut remaining = properties.clone();
        let partitioning = match remaining.remove(PARTITIONED_BY) {
            Some(PropertyValue::List(columns)) => {
                columns.into_iter().map(Transform::Identity).collect()
            }
            Some(other) => {
                return Err(CatalogError::InvalidArgument(format!(
                    "Property '{}' expects a list value, got {} '{}'",
                    PARTITIONED_BY,
                    other.kind_name(),
                    other
                )))
            }
            None => Vec::new(),
        };
        Ok(TableOptions {
            properties: to_catalog_properties(&TABLE_PROPERTIES, &remaining)?,
            partitioning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::metadata::ColumnDescriptor;
    use crate::connector::spi::{ColumnMetadata, SchemaTableName, TableMetadata};

    #[test]
    fn test_hive_rejects_time_types() {
        let adapter = HiveMetadataAdapter;
        let err = adapter.to_engine_type(&DataType::Time).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedType(ref m) if m.contains("time")));
        assert!(adapter.to_catalog_type(&EngineType::Uuid).is_err());
        assert!(adapter
            .to_engine_type(&DataType::list(DataType::Uuid, true))
            .is_err());
    }

    #[test]
    fn test_hive_timestamp_precision() {
        let adapter = HiveMetadataAdapter;
        assert_eq!(
            adapter
                .to_engine_type(&DataType::Timestamp {
                    with_time_zone: false
                })
                .unwrap(),
            EngineType::Timestamp(3)
        );
        assert_eq!(
            adapter.to_catalog_type(&EngineType::Timestamp(3)).unwrap(),
            DataType::Timestamp {
                with_time_zone: false
            }
        );
        let err = adapter.to_catalog_type(&EngineType::Timestamp(6)).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedType(ref m) if m.contains("timestamp(6)")));
    }

    #[test]
    fn test_partitioned_by_becomes_identity_transforms() {
        let adapter = HiveMetadataAdapter;
        let metadata = TableMetadata::new(
            SchemaTableName::new("s1", "events"),
            vec![
                ColumnMetadata::new("id", EngineType::BigInt, false),
                ColumnMetadata::new("dt", EngineType::Varchar(None), true),
            ],
        )
        .with_property(PARTITIONED_BY, PropertyValue::List(vec!["dt".into()]))
        .with_property("format", PropertyValue::from("ORC"))
        .with_property("bucket_count", PropertyValue::Long(4));

        let table = adapter.create_table(&metadata).unwrap();
        assert_eq!(table.partitioning, vec![Transform::Identity("dt".into())]);
        assert!(!table.properties.contains_key(PARTITIONED_BY));
        assert_eq!(table.properties.get("format").map(String::as_str), Some("orc"));
        assert_eq!(table.properties.get("bucket-num").map(String::as_str), Some("4"));

        let back = adapter.get_table_metadata(&table).unwrap();
        assert_eq!(
            back.properties.get(PARTITIONED_BY),
            Some(&PropertyValue::List(vec!["dt".into()]))
        );
        assert_eq!(back.properties.get("bucket_count"), Some(&PropertyValue::Long(4)));
    }

    #[test]
    fn test_unknown_partition_column() {
        let adapter = HiveMetadataAdapter;
        let metadata = TableMetadata::new(
            SchemaTableName::new("s1", "events"),
            vec![ColumnMetadata::new("id", EngineType::BigInt, false)],
        )
        .with_property(PARTITIONED_BY, PropertyValue::List(vec!["dt".into()]));
        assert!(matches!(
            adapter.create_table(&metadata),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_identity_partitioning_unsupported() {
        let mut table = TableDescriptor::new(
            "s1",
            "t1",
            vec![ColumnDescriptor::new("ts", DataType::Date, true)],
        );
        table.partitioning = vec![Transform::Day("ts".into())];
        assert!(matches!(
            HiveMetadataAdapter.get_table_metadata(&table),
            Err(CatalogError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_catalog_properties_require_metastore() {
        let adapter = HiveMetadataAdapter;
        let mut props = HashMap::new();
        assert!(adapter.validate_catalog_properties(&props).is_err());
        props.insert("metastore.uris".to_string(), "thrift://localhost:9083".to_string());
        assert!(adapter.validate_catalog_properties(&props).is_ok());
    }
}
