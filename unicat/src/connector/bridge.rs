// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query engine bridge
//!
//! `ConnectorBridge` implements the engine's connector metadata contract on
//! top of a catalog metadata service. Catalog metadata (schemas, tables,
//! columns, properties) comes from the service and is translated by the
//! provider's adapter; physical handles, inserts and query bracketing are
//! delegated to the engine's own metadata component.
//!
//! The bridge holds no mutable state and caches nothing. Every call
//! resolves identities afresh.

use super::engine::EngineMetadata;
use super::handle::{CompositeColumnHandle, CompositeTableHandle, ConnectorHandle, InsertSession};
use super::scope::QueryScope;
use super::spi::{
    ColumnMetadata, ComputedStatistics, EngineType, Fragment, Principal, PropertyValue, RetryMode,
    SchemaTableName, TableMetadata, TableVersion,
};
use crate::adapter::MetadataAdapter;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::identifier::CatalogIdentifier;
use crate::catalog::metadata::{TableChange, TableDescriptor};
use crate::catalog::service::CatalogMetadataService;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle type the bridge exchanges with engine `E`
pub type EngineHandle<E> = ConnectorHandle<
    <E as EngineMetadata>::TableHandle,
    <E as EngineMetadata>::ColumnHandle,
    <E as EngineMetadata>::InsertHandle,
>;

pub struct ConnectorBridge<E: EngineMetadata> {
    catalog_name: String,
    service: Arc<dyn CatalogMetadataService>,
    adapter: Arc<dyn MetadataAdapter>,
    internal: Arc<E>,
}

impl<E: EngineMetadata> ConnectorBridge<E> {
    pub fn new(
        catalog_name: impl Into<String>,
        service: Arc<dyn CatalogMetadataService>,
        adapter: Arc<dyn MetadataAdapter>,
        internal: Arc<E>,
    ) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            service,
            adapter,
            internal,
        }
    }

    pub fn catalog_name(&self) -> &str {
        &self.catalog_name
    }

    pub fn adapter(&self) -> &Arc<dyn MetadataAdapter> {
        &self.adapter
    }

    pub fn internal(&self) -> &Arc<E> {
        &self.internal
    }

    /// Descriptor behind a handle that must still resolve
    fn resolve_table(&self, identifier: &CatalogIdentifier) -> CatalogResult<TableDescriptor> {
        self.service
            .get_table(identifier.schema_name(), identifier.table_name())?
            .ok_or_else(|| {
                CatalogError::InternalError(format!(
                    "Table '{}' of catalog '{}' no longer exists",
                    identifier, self.catalog_name
                ))
            })
    }

    fn table_identifier<'h>(&self, handle: &'h EngineHandle<E>) -> CatalogResult<&'h CatalogIdentifier> {
        Ok(handle.as_table()?.identifier())
    }

    fn alter(&self, identifier: &CatalogIdentifier, changes: Vec<TableChange>) -> CatalogResult<()> {
        log::info!(
            "Altering table {} in catalog {}: {:?}",
            identifier,
            self.catalog_name,
            changes
        );
        self.service
            .alter_table(identifier.schema_name(), identifier.table_name(), &changes)?;
        Ok(())
    }

    pub fn list_schema_names(&self) -> CatalogResult<Vec<String>> {
        self.service.list_schema_names()
    }

    /// Engine-side properties of a schema
    ///
    /// # Returns
    /// * `Err(CatalogError::NotFound)` if the schema does not exist
    pub fn get_schema_properties(&self, schema: &str) -> CatalogResult<HashMap<String, PropertyValue>> {
        let descriptor = self.service.get_schema(schema)?.ok_or_else(|| {
            CatalogError::NotFound(format!("Schema '{}' in catalog '{}'", schema, self.catalog_name))
        })?;
        self.adapter.get_schema_properties(&descriptor)
    }

    /// Resolve a table name to a composite handle
    ///
    /// # Returns
    /// * `Ok(None)` if the catalog has no such table
    /// * `Err(CatalogError::InternalError)` if the catalog has the table but
    ///   the engine does not
    pub fn get_table_handle(
        &self,
        session: &E::Session,
        table: &SchemaTableName,
        start_version: Option<&TableVersion>,
        end_version: Option<&TableVersion>,
    ) -> CatalogResult<Option<EngineHandle<E>>> {
        log::debug!("get_table_handle {} in catalog {}", table, self.catalog_name);
        if !self.service.table_exists(&table.schema_name, &table.table_name)? {
            return Ok(None);
        }
        let identifier = CatalogIdentifier::new(table.schema_name.clone(), table.table_name.clone())?;
        let internal = self
            .internal
            .get_table_handle(session, table, start_version, end_version)?
            .ok_or_else(|| {
                CatalogError::InternalError(format!(
                    "Table '{}' exists in catalog '{}' but the engine cannot resolve it",
                    table, self.catalog_name
                ))
            })?;
        Ok(Some(CompositeTableHandle::new(identifier, internal).into()))
    }

    pub fn get_table_metadata(&self, handle: &EngineHandle<E>) -> CatalogResult<TableMetadata> {
        let identifier = self.table_identifier(handle)?;
        log::debug!("get_table_metadata {}", identifier);
        let descriptor = self.resolve_table(identifier)?;
        self.adapter.get_table_metadata(&descriptor)
    }

    /// Tables of one schema, or of all schemas in enumeration order
    pub fn list_tables(&self, schema: Option<&str>) -> CatalogResult<Vec<SchemaTableName>> {
        let schemas = match schema {
            Some(name) => vec![name.to_string()],
            None => self.service.list_schema_names()?,
        };
        let mut tables = Vec::new();
        for schema in schemas {
            for table in self.service.list_tables(&schema)? {
                tables.push(SchemaTableName::new(schema.clone(), table));
            }
        }
        Ok(tables)
    }

    /// Composite handles for every catalog column, keyed by column name
    pub fn get_column_handles(
        &self,
        session: &E::Session,
        handle: &EngineHandle<E>,
    ) -> CatalogResult<HashMap<String, EngineHandle<E>>> {
        let table = handle.as_table()?;
        let descriptor = self.resolve_table(table.identifier())?;
        let mut internal = self.internal.get_column_handles(session, table.internal())?;

        let mut handles = HashMap::with_capacity(descriptor.columns.len());
        for column in &descriptor.columns {
            let column_handle = internal.remove(&column.name).ok_or_else(|| {
                CatalogError::InternalError(format!(
                    "Column '{}' of table '{}' is unknown to the engine",
                    column.name,
                    table.identifier()
                ))
            })?;
            handles.insert(
                column.name.clone(),
                CompositeColumnHandle::new(column.name.clone(), column_handle).into(),
            );
        }
        Ok(handles)
    }

    pub fn get_column_metadata(
        &self,
        table_handle: &EngineHandle<E>,
        column_handle: &EngineHandle<E>,
    ) -> CatalogResult<ColumnMetadata> {
        let identifier = self.table_identifier(table_handle)?;
        let column_name = column_handle.as_column()?.column_name();
        let descriptor = self.resolve_table(identifier)?;
        let column = descriptor.column(column_name).ok_or_else(|| {
            CatalogError::InternalError(format!(
                "Column '{}' no longer exists in table '{}'",
                column_name, identifier
            ))
        })?;
        self.adapter.get_column_metadata(column)
    }

    /// Create a table from engine metadata
    ///
    /// With `ignore_existing`, an existing table makes this a no-op;
    /// otherwise it fails with `AlreadyExists`.
    pub fn create_table(&self, metadata: &TableMetadata, ignore_existing: bool) -> CatalogResult<()> {
        let name = &metadata.table;
        if ignore_existing && self.service.table_exists(&name.schema_name, &name.table_name)? {
            log::debug!("Table {} already exists, skipping create", name);
            return Ok(());
        }
        let descriptor = self.adapter.create_table(metadata)?;
        match self.service.create_table(descriptor) {
            Ok(()) => {
                log::info!("Created table {} in catalog {}", name, self.catalog_name);
                Ok(())
            }
            Err(e) if e.is_already_exists() && ignore_existing => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Create a schema; `owner` is recorded as the schema's creator
    pub fn create_schema(
        &self,
        name: &str,
        properties: &HashMap<String, PropertyValue>,
        owner: Option<&Principal>,
    ) -> CatalogResult<()> {
        let descriptor = self.adapter.create_schema(name, properties, owner)?;
        self.service.create_schema(descriptor)?;
        log::info!("Created schema {} in catalog {}", name, self.catalog_name);
        Ok(())
    }

    /// # Returns
    /// * `Err(CatalogError::NotFound)` if the schema does not exist
    /// * `Err(CatalogError::PreconditionFailed)` if it has tables and
    ///   `cascade` is false
    pub fn drop_schema(&self, name: &str, cascade: bool) -> CatalogResult<()> {
        if !self.service.schema_exists(name)? {
            return Err(CatalogError::NotFound(format!(
                "Schema '{}' in catalog '{}'",
                name, self.catalog_name
            )));
        }
        if !cascade && !self.service.list_tables(name)?.is_empty() {
            return Err(CatalogError::PreconditionFailed(format!(
                "Schema '{}' is not empty",
                name
            )));
        }
        self.service.drop_schema(name, cascade)?;
        log::info!("Dropped schema {} (cascade: {})", name, cascade);
        Ok(())
    }

    /// # Returns
    /// * `Ok(true)` if the table was removed
    /// * `Ok(false)` if it was already gone
    pub fn drop_table(&self, handle: &EngineHandle<E>) -> CatalogResult<bool> {
        let identifier = self.table_identifier(handle)?;
        let dropped = self
            .service
            .drop_table(identifier.schema_name(), identifier.table_name())?;
        if dropped {
            log::info!("Dropped table {} in catalog {}", identifier, self.catalog_name);
        } else {
            log::warn!("Table {} was already absent", identifier);
        }
        Ok(dropped)
    }

    pub fn begin_query(&self, session: &E::Session) {
        self.internal.begin_query(session);
    }

    pub fn cleanup_query(&self, session: &E::Session) {
        self.internal.cleanup_query(session);
    }

    /// Begin a query and clean it up when the returned guard drops
    pub fn query_scope<'a>(&'a self, session: &'a E::Session) -> QueryScope<'a, E> {
        QueryScope::begin(self.internal.as_ref(), session)
    }

    pub fn begin_insert(
        &self,
        session: &E::Session,
        handle: &EngineHandle<E>,
        columns: Vec<EngineHandle<E>>,
        retry_mode: RetryMode,
    ) -> CatalogResult<EngineHandle<E>> {
        let table = handle.as_table()?;
        let columns = columns
            .into_iter()
            .map(|c| c.into_column().map(CompositeColumnHandle::into_internal))
            .collect::<CatalogResult<Vec<_>>>()?;
        log::debug!(
            "begin_insert {} with {} columns ({:?})",
            table.identifier(),
            columns.len(),
            retry_mode
        );
        let insert = self
            .internal
            .begin_insert(session, table.internal(), columns, retry_mode)?;
        Ok(InsertSession::new(table.identifier().clone(), insert).into())
    }

    /// Complete an insert; the handle is consumed
    pub fn finish_insert(
        &self,
        session: &E::Session,
        handle: EngineHandle<E>,
        fragments: Vec<Fragment>,
        statistics: Vec<ComputedStatistics>,
    ) -> CatalogResult<Option<E::OutputMetadata>> {
        let insert = handle.into_insert()?;
        log::debug!(
            "finish_insert {} with {} fragments",
            insert.identifier(),
            fragments.len()
        );
        self.internal
            .finish_insert(session, insert.into_internal(), fragments, statistics)
    }

    /// Rename a table within its schema
    pub fn rename_table(&self, handle: &EngineHandle<E>, new_name: &SchemaTableName) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        if new_name.schema_name != identifier.schema_name() {
            return Err(CatalogError::UnsupportedOperation(format!(
                "Cannot move table '{}' to schema '{}'",
                identifier, new_name.schema_name
            )));
        }
        self.alter(
            identifier,
            vec![TableChange::RenameTable(new_name.table_name.clone())],
        )
    }

    pub fn set_table_comment(&self, handle: &EngineHandle<E>, comment: Option<String>) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        self.alter(identifier, vec![TableChange::UpdateComment(comment)])
    }

    /// Set or remove table properties; a `None` value removes the key
    pub fn set_table_properties(
        &self,
        handle: &EngineHandle<E>,
        properties: &HashMap<String, Option<PropertyValue>>,
    ) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        let mut keys: Vec<&String> = properties.keys().collect();
        keys.sort();

        let mut changes = Vec::with_capacity(keys.len());
        for key in keys {
            // Partitioning is fixed at creation, whether the value is set,
            // emptied or removed
            if self.adapter.partition_property() == Some(key.as_str()) {
                return Err(CatalogError::UnsupportedOperation(format!(
                    "Cannot change partitioning of table '{}'",
                    identifier
                )));
            }
            match &properties[key] {
                Some(value) => {
                    let single = HashMap::from([(key.clone(), value.clone())]);
                    let options = self.adapter.to_catalog_table_options(&single)?;
                    for (catalog_key, raw) in options.properties {
                        changes.push(TableChange::SetProperty {
                            key: catalog_key,
                            value: raw,
                        });
                    }
                }
                None => {
                    let catalog_key = self
                        .adapter
                        .table_property_entries()
                        .iter()
                        .find(|e| e.name == key.as_str())
                        .map(|e| e.catalog_name.to_string())
                        .unwrap_or_else(|| key.clone());
                    changes.push(TableChange::RemoveProperty(catalog_key));
                }
            }
        }
        self.alter(identifier, changes)
    }

    pub fn add_column(&self, handle: &EngineHandle<E>, column: &ColumnMetadata) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        let descriptor = self.adapter.create_column(column)?;
        self.alter(identifier, vec![TableChange::AddColumn(descriptor)])
    }

    pub fn drop_column(&self, handle: &EngineHandle<E>, column: &EngineHandle<E>) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        let name = column.as_column()?.column_name().to_string();
        self.alter(
            identifier,
            vec![TableChange::DeleteColumn {
                name,
                if_exists: false,
            }],
        )
    }

    pub fn rename_column(
        &self,
        handle: &EngineHandle<E>,
        column: &EngineHandle<E>,
        new_name: &str,
    ) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        let name = column.as_column()?.column_name().to_string();
        self.alter(
            identifier,
            vec![TableChange::RenameColumn {
                name,
                new_name: new_name.to_string(),
            }],
        )
    }

    pub fn set_column_comment(
        &self,
        handle: &EngineHandle<E>,
        column: &EngineHandle<E>,
        comment: Option<String>,
    ) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        let name = column.as_column()?.column_name().to_string();
        self.alter(identifier, vec![TableChange::UpdateColumnComment { name, comment }])
    }

    /// Change a column's type; the type must be storable by the provider
    pub fn set_column_type(
        &self,
        handle: &EngineHandle<E>,
        column: &EngineHandle<E>,
        column_type: &EngineType,
    ) -> CatalogResult<()> {
        let identifier = self.table_identifier(handle)?;
        let name = column.as_column()?.column_name().to_string();
        let data_type = self.adapter.to_catalog_type(column_type)?;
        self.alter(identifier, vec![TableChange::UpdateColumnType { name, data_type }])
    }
}
