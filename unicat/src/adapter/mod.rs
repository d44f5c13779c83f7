// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata type adapters
//!
//! An adapter translates catalog descriptors to the engine's metadata shapes
//! and back. Translation is pure: adapters hold no state and touch nothing
//! outside their arguments. There is one adapter per catalog provider,
//! chosen when a catalog connector is built; supporting a new backend means
//! implementing `MetadataAdapter` and adding one arm to `create_adapter`.

pub mod hive;
pub mod jdbc;
pub mod lakehouse;
pub mod properties;
pub mod transform;
pub mod types;

use self::properties::{
    to_catalog_properties, to_engine_properties, validate_properties, PropertyEntry,
};
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::identifier::{validate_name, CatalogIdentifier};
use crate::catalog::metadata::{
    AuditInfo, ColumnDescriptor, SchemaDescriptor, TableDescriptor, Transform,
};
use crate::catalog::provider::CatalogProvider;
use crate::catalog::types::DataType;
use crate::connector::spi::{
    ColumnMetadata, EngineType, Principal, PropertyValue, SchemaTableName, TableMetadata,
};
use std::collections::HashMap;
use std::sync::Arc;

/// `extra_info` marker for auto-increment columns
pub const AUTO_INCREMENT_INFO: &str = "auto_increment";

/// Catalog-side table options derived from engine table properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOptions {
    pub properties: HashMap<String, String>,
    pub partitioning: Vec<Transform>,
}

/// Translation between catalog descriptors and engine metadata
///
/// Implementors supply the provider's property entries and its type
/// mapping; the provided methods build schema, table and column
/// translation on top of them.
pub trait MetadataAdapter: Send + Sync {
    fn provider(&self) -> CatalogProvider;

    /// Properties accepted when registering a catalog of this provider
    fn catalog_property_entries(&self) -> &[PropertyEntry];

    fn schema_property_entries(&self) -> &[PropertyEntry];

    fn table_property_entries(&self) -> &[PropertyEntry];

    /// Engine table property that carries partitioning, if the provider
    /// partitions tables
    fn partition_property(&self) -> Option<&'static str> {
        None
    }

    /// # Returns
    /// * `Err(CatalogError::UnsupportedType)` naming the type if the engine
    ///   cannot represent it for this provider
    fn to_engine_type(&self, data_type: &DataType) -> CatalogResult<EngineType>;

    /// # Returns
    /// * `Err(CatalogError::UnsupportedType)` naming the type if the backend
    ///   cannot store it
    fn to_catalog_type(&self, engine_type: &EngineType) -> CatalogResult<DataType>;

    /// Engine-visible table properties, including partitioning
    fn to_engine_table_properties(
        &self,
        table: &TableDescriptor,
    ) -> CatalogResult<HashMap<String, PropertyValue>> {
        if !table.partitioning.is_empty() {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Provider {} does not support partitioned tables",
                self.provider()
            )));
        }
        to_engine_properties(self.table_property_entries(), &table.properties)
    }

    /// Catalog properties and partitioning from engine table properties
    fn to_catalog_table_options(
        &self,
        properties: &HashMap<String, PropertyValue>,
    ) -> CatalogResult<TableOptions> {
        Ok(TableOptions {
            properties: to_catalog_properties(self.table_property_entries(), properties)?,
            partitioning: Vec::new(),
        })
    }

    fn validate_catalog_properties(&self, properties: &HashMap<String, String>) -> CatalogResult<()> {
        validate_properties(self.catalog_property_entries(), properties)
    }

    fn get_schema_properties(
        &self,
        schema: &SchemaDescriptor,
    ) -> CatalogResult<HashMap<String, PropertyValue>> {
        to_engine_properties(self.schema_property_entries(), &schema.properties)
    }

    fn create_schema(
        &self,
        name: &str,
        properties: &HashMap<String, PropertyValue>,
        owner: Option<&Principal>,
    ) -> CatalogResult<SchemaDescriptor> {
        validate_name("Schema", name)?;
        let properties = to_catalog_properties(self.schema_property_entries(), properties)?;
        let schema = SchemaDescriptor::new(name).with_properties(properties);
        Ok(match owner {
            Some(principal) => schema.with_creator(principal.name.clone()),
            None => schema,
        })
    }

    fn get_column_metadata(&self, column: &ColumnDescriptor) -> CatalogResult<ColumnMetadata> {
        Ok(ColumnMetadata {
            name: column.name.clone(),
            column_type: self.to_engine_type(&column.data_type)?,
            nullable: column.nullable,
            comment: column.comment.clone(),
            default_value: column.default_value.clone(),
            extra_info: column
                .auto_increment
                .then(|| AUTO_INCREMENT_INFO.to_string()),
            hidden: false,
        })
    }

    fn create_column(&self, column: &ColumnMetadata) -> CatalogResult<ColumnDescriptor> {
        if column.hidden {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Hidden column '{}' cannot be stored in the catalog",
                column.name
            )));
        }
        validate_name("Column", &column.name)?;
        Ok(ColumnDescriptor {
            name: column.name.clone(),
            data_type: self.to_catalog_type(&column.column_type)?,
            nullable: column.nullable,
            auto_increment: column.extra_info.as_deref() == Some(AUTO_INCREMENT_INFO),
            default_value: column.default_value.clone(),
            comment: column.comment.clone(),
        })
    }

    fn get_table_metadata(&self, table: &TableDescriptor) -> CatalogResult<TableMetadata> {
        let columns = table
            .columns
            .iter()
            .map(|c| self.get_column_metadata(c))
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(TableMetadata {
            table: SchemaTableName::new(table.schema_name.clone(), table.name.clone()),
            columns,
            properties: self.to_engine_table_properties(table)?,
            comment: table.comment.clone(),
        })
    }

    fn create_table(&self, metadata: &TableMetadata) -> CatalogResult<TableDescriptor> {
        let ident = CatalogIdentifier::new(
            metadata.table.schema_name.clone(),
            metadata.table.table_name.clone(),
        )?;
        let columns = metadata
            .columns
            .iter()
            .map(|c| self.create_column(c))
            .collect::<CatalogResult<Vec<_>>>()?;
        let options = self.to_catalog_table_options(&metadata.properties)?;

        for transform in &options.partitioning {
            for column in transform.columns() {
                if !columns.iter().any(|c| c.name == column) {
                    return Err(CatalogError::InvalidArgument(format!(
                        "Partition column '{}' is not a column of table '{}'",
                        column, ident
                    )));
                }
            }
        }

        Ok(TableDescriptor {
            schema_name: ident.schema_name().to_string(),
            name: ident.table_name().to_string(),
            comment: metadata.comment.clone(),
            columns,
            properties: options.properties,
            partitioning: options.partitioning,
            audit: AuditInfo::default(),
        })
    }
}

/// The adapter for a catalog provider
pub fn create_adapter(provider: CatalogProvider) -> Arc<dyn MetadataAdapter> {
    match provider {
        CatalogProvider::Hive => Arc::new(hive::HiveMetadataAdapter),
        CatalogProvider::JdbcMysql => Arc::new(jdbc::MySqlMetadataAdapter),
        CatalogProvider::JdbcPostgresql => Arc::new(jdbc::PostgreSqlMetadataAdapter),
        CatalogProvider::LakehouseIceberg => Arc::new(lakehouse::IcebergMetadataAdapter),
        CatalogProvider::LakehousePaimon => Arc::new(lakehouse::PaimonMetadataAdapter),
    }
}
