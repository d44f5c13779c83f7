// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog metadata service trait definition
//!
//! This module defines the interface the bridge needs from the catalog's
//! metadata store. How the store persists, locks or reaches its backend is
//! the implementation's business.

use super::error::CatalogResult;
use super::metadata::{SchemaDescriptor, TableChange, TableDescriptor};

/// Schema and table CRUD against one catalog backend
///
/// Query methods report absence through `Option`, `bool` or an empty list
/// and never fail with `NotFound`. Mutations on a missing target fail with
/// `CatalogError::NotFound`, except `drop_table`, which reports `false`.
///
/// Implementations must serialize conflicting mutations on the same
/// identity; the bridge does no locking of its own.
pub trait CatalogMetadataService: Send + Sync {
    /// All schema names, in enumeration order
    fn list_schema_names(&self) -> CatalogResult<Vec<String>>;

    fn get_schema(&self, name: &str) -> CatalogResult<Option<SchemaDescriptor>>;

    fn schema_exists(&self, name: &str) -> CatalogResult<bool> {
        Ok(self.get_schema(name)?.is_some())
    }

    /// Table names of one schema; empty when the schema does not exist
    fn list_tables(&self, schema: &str) -> CatalogResult<Vec<String>>;

    fn table_exists(&self, schema: &str, table: &str) -> CatalogResult<bool>;

    fn get_table(&self, schema: &str, table: &str) -> CatalogResult<Option<TableDescriptor>>;

    /// # Returns
    /// * `Err(CatalogError::AlreadyExists)` if a schema with that name exists
    fn create_schema(&self, schema: SchemaDescriptor) -> CatalogResult<()>;

    /// # Returns
    /// * `Err(CatalogError::NotFound)` if the owning schema is missing
    /// * `Err(CatalogError::AlreadyExists)` if the table exists
    fn create_table(&self, table: TableDescriptor) -> CatalogResult<()>;

    /// Apply `changes` in order and return the resulting descriptor
    fn alter_table(
        &self,
        schema: &str,
        table: &str,
        changes: &[TableChange],
    ) -> CatalogResult<TableDescriptor>;

    /// # Returns
    /// * `Err(CatalogError::NotFound)` if the schema is missing
    /// * `Err(CatalogError::PreconditionFailed)` if it still has tables and
    ///   `cascade` is false
    fn drop_schema(&self, name: &str, cascade: bool) -> CatalogResult<()>;

    /// Remove a table
    ///
    /// # Returns
    /// * `Ok(true)` if the table existed and was removed
    /// * `Ok(false)` if it was already absent
    fn drop_table(&self, schema: &str, table: &str) -> CatalogResult<bool>;
}
