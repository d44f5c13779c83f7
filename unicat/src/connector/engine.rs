// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine-internal metadata abstraction
//!
//! The query engine keeps its own metadata component that knows how to
//! resolve physical handles and run inserts. The bridge delegates to it for
//! everything that is not catalog metadata. All handle types are opaque to
//! the bridge: it stores and forwards them and never looks inside.

use super::spi::{ComputedStatistics, Fragment, RetryMode, SchemaTableName, TableVersion};
use crate::catalog::error::CatalogResult;
use std::collections::HashMap;

/// The engine's own connector metadata component
pub trait EngineMetadata: Send + Sync {
    /// Per-query session token
    type Session;
    type TableHandle: Clone;
    type ColumnHandle: Clone;
    type InsertHandle;
    /// Whatever the engine reports after a finished insert
    type OutputMetadata;

    /// Resolve a physical table handle
    ///
    /// # Arguments
    /// * `session` - Session of the calling query
    /// * `table` - Engine-qualified table name
    /// * `start_version` - Optional lower version bound for time travel
    /// * `end_version` - Optional upper version bound for time travel
    ///
    /// # Returns
    /// * `Ok(Some(handle))` - The engine knows the table
    /// * `Ok(None)` - The engine has no such table
    fn get_table_handle(
        &self,
        session: &Self::Session,
        table: &SchemaTableName,
        start_version: Option<&TableVersion>,
        end_version: Option<&TableVersion>,
    ) -> CatalogResult<Option<Self::TableHandle>>;

    /// Column handles of a resolved table, keyed by column name
    fn get_column_handles(
        &self,
        session: &Self::Session,
        table: &Self::TableHandle,
    ) -> CatalogResult<HashMap<String, Self::ColumnHandle>>;

    fn begin_query(&self, session: &Self::Session);

    fn cleanup_query(&self, session: &Self::Session);

    /// Start an insert into `table` covering `columns`
    fn begin_insert(
        &self,
        session: &Self::Session,
        table: &Self::TableHandle,
        columns: Vec<Self::ColumnHandle>,
        retry_mode: RetryMode,
    ) -> CatalogResult<Self::InsertHandle>;

    /// Commit the fragments written under `insert`
    ///
    /// # Returns
    /// * `Ok(Some(metadata))` - The engine produced output metadata
    /// * `Ok(None)` - Nothing to report
    fn finish_insert(
        &self,
        session: &Self::Session,
        insert: Self::InsertHandle,
        fragments: Vec<Fragment>,
        statistics: Vec<ComputedStatistics>,
    ) -> CatalogResult<Option<Self::OutputMetadata>>;
}
