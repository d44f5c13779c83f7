// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Lakehouse table format adapters
//!
//! Iceberg exposes its full partition transform set to the engine as
//! expression strings. Paimon partitions by identity only and carries
//! primary and bucket keys as list properties.

use super::properties::{to_catalog_properties, to_engine_properties, validate_properties, PropertyEntry};
use super::transform::{identity_columns, parse_transform};
use super::types::{self, unsupported_catalog_type, unsupported_engine_type};
use super::{MetadataAdapter, TableOptions};
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::metadata::{TableDescriptor, Transform};
use crate::catalog::provider::{CatalogProvider, PaimonCatalogBackend};
use crate::catalog::types::DataType;
use crate::connector::spi::{EngineType, PropertyValue};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;

/// Engine property carrying partition expressions
pub const PARTITIONING: &str = "partitioning";

const LAKEHOUSE_TIME_PRECISION: u8 = 6;

/// Catalog key naming the metastore implementation
pub const CATALOG_BACKEND_KEY: &str = "catalog-backend";

static ICEBERG_CATALOG_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::enumerated(
            CATALOG_BACKEND_KEY,
            "Iceberg catalog implementation",
            &["hive", "jdbc", "rest", "memory"],
        )
        .required()
        .immutable(),
        PropertyEntry::string("uri", "URI of the Iceberg catalog backend").required(),
        PropertyEntry::string("warehouse", "Warehouse directory"),
    ]
});

static ICEBERG_SCHEMA_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![PropertyEntry::string("location", "Namespace location")]
});

static ICEBERG_TABLE_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::list(PARTITIONING, "Partition transform expressions"),
        PropertyEntry::list("sorted_by", "Sort order expressions").stored_as("sort-order"),
        PropertyEntry::string("location", "Table location"),
        PropertyEntry::long("format_version", "Iceberg format version")
            .stored_as("format-version")
            .with_default("2"),
    ]
});

static PAIMON_CATALOG_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::string(CATALOG_BACKEND_KEY, "Paimon catalog backend")
            .required()
            .immutable(),
        PropertyEntry::string("warehouse", "Warehouse directory").required(),
        PropertyEntry::string("uri", "URI of the metastore, if the backend needs one"),
    ]
});

static PAIMON_TABLE_PROPERTIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::list(PARTITIONING, "Identity partition columns"),
        PropertyEntry::list("primary_key", "Primary key columns").stored_as("primary-key"),
        PropertyEntry::long("bucket", "Number of buckets"),
        PropertyEntry::list("bucket_key", "Bucket key columns").stored_as("bucket-key"),
    ]
});

/// Split the partitioning list out of engine properties
fn take_partitioning(
    properties: &HashMap<String, PropertyValue>,
) -> CatalogResult<(HashMap<String, PropertyValue>, Vec<String>)> {
    let mut remaining = properties.clone();
    let expressions = match remaining.remove(PARTITIONING) {
        Some(PropertyValue::List(items)) => items,
        Some(other) => {
            return Err(CatalogError::InvalidArgument(format!(
                "Property '{}' expects a list value, got {} '{}'",
                PARTITIONING,
                other.kind_name(),
                other
            )))
        }
        None => Vec::new(),
    };
    Ok((remaining, expressions))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IcebergMetadataAdapter;

impl MetadataAdapter for IcebergMetadataAdapter {
    fn provider(&self) -> CatalogProvider {
        CatalogProvider::LakehouseIceberg
    }

    fn catalog_property_entries(&self) -> &[PropertyEntry] {
        &ICEBERG_CATALOG_PROPERTIES
    }

    fn schema_property_entries(&self) -> &[PropertyEntry] {
        &ICEBERG_SCHEMA_PROPERTIES
    }

    fn table_property_entries(&self) -> &[PropertyEntry] {
        &ICEBERG_TABLE_PROPERTIES
    }

    fn partition_property(&self) -> Option<&'static str> {
        Some(PARTITIONING)
    }

    fn to_engine_type(&self, data_type: &DataType) -> CatalogResult<EngineType> {
        match data_type {
            DataType::Byte | DataType::Short | DataType::VarChar(_) | DataType::FixedChar(_) => {
                Err(unsupported_catalog_type(self.provider(), data_type))
            }
            _ => types::to_engine_type(self, data_type, LAKEHOUSE_TIME_PRECISION),
        }
    }

    fn to_catalog_type(&self, engine_type: &EngineType) -> CatalogResult<DataType> {
        match engine_type {
            EngineType::TinyInt
            | EngineType::SmallInt
            | EngineType::Varchar(Some(_))
            | EngineType::Char(_) => Err(unsupported_engine_type(self.provider(), engine_type)),
            _ => types::to_catalog_type(self, engine_type, LAKEHOUSE_TIME_PRECISION),
        }
    }

    fn to_engine_table_properties(
        &self,
        table: &TableDescriptor,
    ) -> CatalogResult<HashMap<String, PropertyValue>> {
        let mut properties = to_engine_properties(&ICEBERG_TABLE_PROPERTIES, &table.properties)?;
        if !table.partitioning.is_empty() {
            properties.insert(
                PARTITIONING.to_string(),
                PropertyValue::List(table.partitioning.iter().map(Transform::to_string).collect()),
            );
        }
        Ok(properties)
    }

    fn to_catalog_table_options(
        &self,
        properties: &HashMap<String, PropertyValue>,
    ) -> CatalogResult<TableOptions> {
        let (remaining, expressions) = take_partitioning(properties)?;
        Ok(TableOptions {
            properties: to_catalog_properties(&ICEBERG_TABLE_PROPERTIES, &remaining)?,
            partitioning: expressions
                .iter()
                .map(|e| parse_transform(e))
                .collect::<CatalogResult<Vec<_>>>()?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PaimonMetadataAdapter;

impl MetadataAdapter for PaimonMetadataAdapter {
    fn provider(&self) -> CatalogProvider {
        CatalogProvider::LakehousePaimon
    }

    fn catalog_property_entries(&self) -> &[PropertyEntry] {
        &PAIMON_CATALOG_PROPERTIES
    }

    fn schema_property_entries(&self) -> &[PropertyEntry] {
        &[]
    }

    fn table_property_entries(&self) -> &[PropertyEntry] {
        &PAIMON_TABLE_PROPERTIES
    }

    fn partition_property(&self) -> Option<&'static str> {
        Some(PARTITIONING)
    }

    fn to_engine_type(&self, data_type: &DataType) -> CatalogResult<EngineType> {
        match data_type {
            DataType::Uuid => Err(unsupported_catalog_type(self.provider(), data_type)),
            _ => types::to_engine_type(self, data_type, LAKEHOUSE_TIME_PRECISION),
        }
    }

    fn to_catalog_type(&self, engine_type: &EngineType) -> CatalogResult<DataType> {
        match engine_type {
            EngineType::Uuid => Err(unsupported_engine_type(self.provider(), engine_type)),
            _ => types::to_catalog_type(self, engine_type, LAKEHOUSE_TIME_PRECISION),
        }
    }

    fn validate_catalog_properties(&self, properties: &HashMap<String, String>) -> CatalogResult<()> {
        validate_properties(&PAIMON_CATALOG_PROPERTIES, properties)?;
        if let Some(backend) = properties.get(CATALOG_BACKEND_KEY) {
            PaimonCatalogBackend::from_str(backend)?;
        }
        Ok(())
    }

    fn to_engine_table_properties(
        &self,
        table: &TableDescriptor,
    ) -> CatalogResult<HashMap<String, PropertyValue>> {
        let mut properties = to_engine_properties(&PAIMON_TABLE_PROPERTIES, &table.properties)?;
        let partition_columns = identity_columns(&table.partitioning, "lakehouse-paimon")?;
        if !partition_columns.is_empty() {
            properties.insert(PARTITIONING.to_string(), PropertyValue::List(partition_columns));
        }
        Ok(properties)
    }

    fn to_catalog_table_options(
        &self,
        properties: &HashMap<String, PropertyValue>,
    ) -> CatalogResult<TableOptions> {
        let (remaining, expressions) = take_partitioning(properties)?;
        let partitioning = expressions
            .iter()
            .map(|e| parse_transform(e))
            .collect::<CatalogResult<Vec<_>>>()?;
        identity_columns(&partitioning, "lakehouse-paimon")?;
        Ok(TableOptions {
            properties: to_catalog_properties(&PAIMON_TABLE_PROPERTIES, &remaining)?,
            partitioning,
        })
    }
}
