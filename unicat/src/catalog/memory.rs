// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory catalog metadata service
//!
//! Reference implementation of `CatalogMetadataService` for embedding and
//! tests. Schemas and tables keep insertion order, so enumeration order is
//! creation order. State can be saved and restored as a JSON document.

use super::error::{CatalogError, CatalogResult};
use super::identifier::validate_name;
use super::metadata::{ColumnDescriptor, SchemaDescriptor, TableChange, TableDescriptor};
use super::service::CatalogMetadataService;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaEntry {
    descriptor: SchemaDescriptor,
    tables: Vec<TableDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogState {
    schemas: Vec<SchemaEntry>,
}

impl CatalogState {
    fn schema(&self, name: &str) -> Option<&SchemaEntry> {
        self.schemas.iter().find(|s| s.descriptor.name == name)
    }

    fn schema_mut(&mut self, name: &str) -> Option<&mut SchemaEntry> {
        self.schemas.iter_mut().find(|s| s.descriptor.name == name)
    }
}

pub struct InMemoryCatalogService {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalogService {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
        }
    }

    /// Serialize the whole catalog state
    pub fn snapshot(&self) -> CatalogResult<Vec<u8>> {
        let state = self.state.read();
        let data = serde_json::to_vec(&*state)?;
        log::debug!(
            "Saved catalog snapshot: {} schemas, {} bytes",
            state.schemas.len(),
            data.len()
        );
        Ok(data)
    }

    /// Replace the catalog state with a previously saved snapshot
    pub fn restore(&self, data: &[u8]) -> CatalogResult<()> {
        let restored: CatalogState = serde_json::from_slice(data)?;
        log::debug!("Restored catalog snapshot: {} schemas", restored.schemas.len());
        *self.state.write() = restored;
        Ok(())
    }

    /// `original` is the stored name of `table`, which a rename may reuse
    fn apply_change(
        tables: &[TableDescriptor],
        original: &str,
        table: &mut TableDescriptor,
        change: &TableChange,
    ) -> CatalogResult<()> {
        let qualified = format!("{}.{}", table.schema_name, table.name);
        match change {
            TableChange::RenameTable(new_name) => {
                validate_name("Table", new_name)?;
                if tables.iter().any(|t| t.name != original && &t.name == new_name) {
                    return Err(CatalogError::AlreadyExists(format!(
                        "Table '{}.{}'",
                        table.schema_name, new_name
                    )));
                }
                table.name = new_name.clone();
            }
            TableChange::UpdateComment(comment) => table.comment = comment.clone(),
            TableChange::SetProperty { key, value } => {
                table.properties.insert(key.clone(), value.clone());
            }
            TableChange::RemoveProperty(key) => {
                table.properties.remove(key);
            }
            TableChange::AddColumn(column) => {
                validate_name("Column", &column.name)?;
                if table.column(&column.name).is_some() {
                    return Err(CatalogError::AlreadyExists(format!(
                        "Column '{}' in table '{}'",
                        column.name, qualified
                    )));
                }
                table.columns.push(column.clone());
            }
            TableChange::DeleteColumn { name, if_exists } => {
                let before = table.columns.len();
                table.columns.retain(|c| &c.name != name);
                if table.columns.len() == before && !if_exists {
                    return Err(CatalogError::NotFound(format!(
                        "Column '{}' in table '{}'",
                        name, qualified
                    )));
                }
            }
            TableChange::RenameColumn { name, new_name } => {
                validate_name("Column", new_name)?;
                if table.column(new_name).is_some() {
                    return Err(CatalogError::AlreadyExists(format!(
                        "Column '{}' in table '{}'",
                        new_name, qualified
                    )));
                }
                Self::column_mut(table, name, &qualified)?.name = new_name.clone();
            }
            TableChange::UpdateColumnComment { name, comment } => {
                Self::column_mut(table, name, &qualified)?.comment = comment.clone();
            }
            TableChange::UpdateColumnType { name, data_type } => {
                Self::column_mut(table, name, &qualified)?.data_type = data_type.clone();
            }
        }
        Ok(())
    }

    fn column_mut<'a>(
        table: &'a mut TableDescriptor,
        name: &str,
        qualified: &str,
    ) -> CatalogResult<&'a mut ColumnDescriptor> {
        table.column_mut(name).ok_or_else(|| {
            CatalogError::NotFound(format!("Column '{}' in table '{}'", name, qualified))
        })
    }
}

impl Default for InMemoryCatalogService {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogMetadataService for InMemoryCatalogService {
    fn list_schema_names(&self) -> CatalogResult<Vec<String>> {
        Ok(self
            .state
            .read()
            .schemas
            .iter()
            .map(|s| s.descriptor.name.clone())
            .collect())
    }

    fn get_schema(&self, name: &str) -> CatalogResult<Option<SchemaDescriptor>> {
        Ok(self.state.read().schema(name).map(|s| s.descriptor.clone()))
    }

    fn list_tables(&self, schema: &str) -> CatalogResult<Vec<String>> {
        Ok(self
            .state
            .read()
            .schema(schema)
            .map(|s| s.tables.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default())
    }

    fn table_exists(&self, schema: &str, table: &str) -> CatalogResult<bool> {
        Ok(self
            .state
            .read()
            .schema(schema)
            .map(|s| s.tables.iter().any(|t| t.name == table))
            .unwrap_or(false))
    }

    fn get_table(&self, schema: &str, table: &str) -> CatalogResult<Option<TableDescriptor>> {
        Ok(self
            .state
            .read()
            .schema(schema)
            .and_then(|s| s.tables.iter().find(|t| t.name == table).cloned()))
    }

    fn create_schema(&self, schema: SchemaDescriptor) -> CatalogResult<()> {
        validate_name("Schema", &schema.name)?;
        let mut state = self.state.write();
        if state.schema(&schema.name).is_some() {
            return Err(CatalogError::AlreadyExists(format!(
                "Schema '{}'",
                schema.name
            )));
        }
        log::info!("Created schema '{}'", schema.name);
        state.schemas.push(SchemaEntry {
            descriptor: schema,
            tables: Vec::new(),
        });
        Ok(())
    }

    fn create_table(&self, table: TableDescriptor) -> CatalogResult<()> {
        let ident = table.identifier()?;
        for column in &table.columns {
            validate_name("Column", &column.name)?;
        }
        let mut state = self.state.write();
        let entry = state
            .schema_mut(ident.schema_name())
            .ok_or_else(|| CatalogError::NotFound(format!("Schema '{}'", ident.schema_name())))?;
        if entry.tables.iter().any(|t| t.name == table.name) {
            return Err(CatalogError::AlreadyExists(format!("Table '{}'", ident)));
        }
        log::info!("Created table '{}' with {} columns", ident, table.columns.len());
        entry.tables.push(table);
        Ok(())
    }

    fn alter_table(
        &self,
        schema: &str,
        table: &str,
        changes: &[TableChange],
    ) -> CatalogResult<TableDescriptor> {
        let mut state = self.state.write();
        let entry = state
            .schema_mut(schema)
            .ok_or_else(|| CatalogError::NotFound(format!("Schema '{}'", schema)))?;
        let position = entry
            .tables
            .iter()
            .position(|t| t.name == table)
            .ok_or_else(|| CatalogError::NotFound(format!("Table '{}.{}'", schema, table)))?;

        // Work on a copy so a failing change leaves the stored table untouched
        let mut altered = entry.tables[position].clone();
        for change in changes {
            Self::apply_change(&entry.tables, table, &mut altered, change)?;
        }
        altered.audit.touch(None);
        entry.tables[position] = altered.clone();
        log::debug!(
            "Altered table '{}.{}' with {} changes",
            schema,
            table,
            changes.len()
        );
        Ok(altered)
    }

    fn drop_schema(&self, name: &str, cascade: bool) -> CatalogResult<()> {
        let mut state = self.state.write();
        let position = state
            .schemas
            .iter()
            .position(|s| s.descriptor.name == name)
            .ok_or_else(|| CatalogError::NotFound(format!("Schema '{}'", name)))?;
        let table_count = state.schemas[position].tables.len();
        if table_count > 0 && !cascade {
            return Err(CatalogError::PreconditionFailed(format!(
                "Schema '{}' is not empty ({} tables)",
                name, table_count
            )));
        }
        state.schemas.remove(position);
        log::info!("Dropped schema '{}' (cascade: {})", name, cascade);
        Ok(())
    }

    fn drop_table(&self, schema: &str, table: &str) -> CatalogResult<bool> {
        let mut state = self.state.write();
        let Some(entry) = state.schema_mut(schema) else {
            return Ok(false);
        };
        let before = entry.tables.len();
        entry.tables.retain(|t| t.name != table);
        let dropped = entry.tables.len() != before;
        if dropped {
            log::info!("Dropped table '{}.{}'", schema, table);
        }
        Ok(dropped)
    }
}
