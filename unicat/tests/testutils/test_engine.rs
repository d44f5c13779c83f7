//! Recording engine metadata component
//!
//! Resolves handles against the same in-memory catalog the bridge uses, so
//! both views agree unless a test hides a table or column from the engine
//! on purpose. Every query and insert call is appended to an event log.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use unicat::connector::spi::{ComputedStatistics, Fragment, RetryMode, TableVersion};
use unicat::{
    CatalogMetadataService, CatalogResult, EngineMetadata, InMemoryCatalogService,
    SchemaTableName,
};
use uuid::Uuid;

/// Name of the engine-only column every table exposes
pub const PATH_COLUMN: &str = "$path";

#[derive(Debug, Clone, PartialEq)]
pub struct TestSession {
    pub query_id: Uuid,
    pub user: String,
}

impl TestSession {
    pub fn new(user: &str) -> Self {
        Self {
            query_id: Uuid::new_v4(),
            user: user.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineTableHandle {
    pub table: SchemaTableName,
    pub handle_id: Uuid,
    pub start_version: Option<TableVersion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineColumnHandle {
    pub name: String,
    pub ordinal: usize,
}

#[derive(Debug, PartialEq)]
pub struct EngineInsertHandle {
    pub insert_id: Uuid,
    pub table: SchemaTableName,
    pub columns: Vec<String>,
    pub retry_mode: RetryMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    pub insert_id: Uuid,
    pub fragment_bytes: usize,
    pub statistics: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    BeginQuery(Uuid),
    CleanupQuery(Uuid),
    BeginInsert {
        insert_id: Uuid,
        table: SchemaTableName,
        columns: Vec<String>,
        retry_mode: RetryMode,
    },
    FinishInsert {
        insert_id: Uuid,
        fragments: usize,
    },
}

pub struct RecordingEngine {
    service: Arc<InMemoryCatalogService>,
    hidden_tables: Mutex<HashSet<SchemaTableName>>,
    hidden_columns: Mutex<HashSet<String>>,
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingEngine {
    pub fn new(service: Arc<InMemoryCatalogService>) -> Self {
        Self {
            service,
            hidden_tables: Mutex::new(HashSet::new()),
            hidden_columns: Mutex::new(HashSet::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Make the engine lose track of a table the catalog still has
    pub fn hide_table(&self, schema: &str, table: &str) {
        self.hidden_tables
            .lock()
            .insert(SchemaTableName::new(schema, table));
    }

    /// Make the engine lose track of a column in every table
    pub fn hide_column(&self, column: &str) {
        self.hidden_columns.lock().insert(column.to_string());
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().clone()
    }

    pub fn cleanup_count(&self, session: &TestSession) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| **e == EngineEvent::CleanupQuery(session.query_id))
            .count()
    }

    fn record(&self, event: EngineEvent) {
        self.events.lock().push(event);
    }
}

impl EngineMetadata for RecordingEngine {
    type Session = TestSession;
    type TableHandle = EngineTableHandle;
    type ColumnHandle = EngineColumnHandle;
    type InsertHandle = EngineInsertHandle;
    type OutputMetadata = InsertOutcome;

    fn get_table_handle(
        &self,
        _session: &TestSession,
        table: &SchemaTableName,
        start_version: Option<&TableVersion>,
        _end_version: Option<&TableVersion>,
    ) -> CatalogResult<Option<EngineTableHandle>> {
        if self.hidden_tables.lock().contains(table)
            || !self
                .service
                .table_exists(&table.schema_name, &table.table_name)?
        {
            return Ok(None);
        }
        Ok(Some(EngineTableHandle {
            table: table.clone(),
            handle_id: Uuid::new_v4(),
            start_version: start_version.cloned(),
        }))
    }

    fn get_column_handles(
        &self,
        _session: &TestSession,
        table: &EngineTableHandle,
    ) -> CatalogResult<HashMap<String, EngineColumnHandle>> {
        let hidden = self.hidden_columns.lock();
        let mut handles = HashMap::new();
        if let Some(descriptor) = self
            .service
            .get_table(&table.table.schema_name, &table.table.table_name)?
        {
            for (ordinal, column) in descriptor.columns.iter().enumerate() {
                if hidden.contains(&column.name) {
                    continue;
                }
                handles.insert(
                    column.name.clone(),
                    EngineColumnHandle {
                        name: column.name.clone(),
                        ordinal,
                    },
                );
            }
            handles.insert(
                PATH_COLUMN.to_string(),
                EngineColumnHandle {
                    name: PATH_COLUMN.to_string(),
                    ordinal: descriptor.columns.len(),
                },
            );
        }
        Ok(handles)
    }

    fn begin_query(&self, session: &TestSession) {
        self.record(EngineEvent::BeginQuery(session.query_id));
    }

    fn cleanup_query(&self, session: &TestSession) {
        self.record(EngineEvent::CleanupQuery(session.query_id));
    }

    fn begin_insert(
        &self,
        _session: &TestSession,
        table: &EngineTableHandle,
        columns: Vec<EngineColumnHandle>,
        retry_mode: RetryMode,
    ) -> CatalogResult<EngineInsertHandle> {
        let insert = EngineInsertHandle {
            insert_id: Uuid::new_v4(),
            table: table.table.clone(),
            columns: columns.into_iter().map(|c| c.name).collect(),
            retry_mode,
        };
        self.record(EngineEvent::BeginInsert {
            insert_id: insert.insert_id,
            table: insert.table.clone(),
            columns: insert.columns.clone(),
            retry_mode,
        });
        Ok(insert)
    }

    fn finish_insert(
        &self,
        _session: &TestSession,
        insert: EngineInsertHandle,
        fragments: Vec<Fragment>,
        statistics: Vec<ComputedStatistics>,
    ) -> CatalogResult<Option<InsertOutcome>> {
        self.record(EngineEvent::FinishInsert {
            insert_id: insert.insert_id,
            fragments: fragments.len(),
        });
        if fragments.is_empty() {
            return Ok(None);
        }
        Ok(Some(InsertOutcome {
            insert_id: insert.insert_id,
            fragment_bytes: fragments.iter().map(Vec::len).sum(),
            statistics: statistics.len(),
        }))
    }
}
