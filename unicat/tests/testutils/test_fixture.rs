//! Test fixture for unicat integration tests
//!
//! Wires a `ConnectorBridge` to a fresh in-memory catalog and a recording
//! engine. Each fixture gets its own catalog plus a unique schema name.

#![allow(dead_code)]

use super::test_engine::{RecordingEngine, TestSession};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Once;
use unicat::{
    create_adapter, CatalogProvider, CatalogResult, ColumnMetadata, ConnectorBridge,
    EngineHandle, EngineType, InMemoryCatalogService, PropertyValue, SchemaTableName,
    TableMetadata,
};

static LOGGER: Once = Once::new();

/// Route `log` output through the test harness
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub struct TestFixture {
    pub service: Arc<InMemoryCatalogService>,
    pub engine: Arc<RecordingEngine>,
    pub bridge: ConnectorBridge<RecordingEngine>,
    pub session: TestSession,
    schema_name: String,
}

impl TestFixture {
    /// Fixture backed by the Hive adapter
    pub fn new() -> Self {
        Self::with_provider(CatalogProvider::Hive)
    }

    pub fn with_provider(provider: CatalogProvider) -> Self {
        init_logging();
        let service = Arc::new(InMemoryCatalogService::new());
        let engine = Arc::new(RecordingEngine::new(service.clone()));
        let bridge = ConnectorBridge::new(
            "test_catalog",
            service.clone(),
            create_adapter(provider),
            engine.clone(),
        );
        Self {
            service,
            engine,
            bridge,
            session: TestSession::new("tester"),
            schema_name: format!("test_schema_{}", fastrand::u64(..)),
        }
    }

    /// Unique schema name of this fixture
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Fixture with its schema already created
    pub fn with_schema() -> Self {
        Self::with_provider_schema(CatalogProvider::Hive)
    }

    pub fn with_provider_schema(provider: CatalogProvider) -> Self {
        let fixture = Self::with_provider(provider);
        fixture
            .bridge
            .create_schema(&fixture.schema_name, &HashMap::new(), None)
            .expect("Failed to create test schema");
        fixture
    }

    /// `(id integer not null, name varchar nullable)`
    pub fn simple_columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::new("id", EngineType::Integer, false),
            ColumnMetadata::new("name", EngineType::Varchar(None), true),
        ]
    }

    pub fn simple_table(schema: &str, table: &str) -> TableMetadata {
        TableMetadata::new(SchemaTableName::new(schema, table), Self::simple_columns())
    }

    /// Create a two-column table in the fixture schema
    pub fn create_simple_table(&self, table: &str) -> CatalogResult<()> {
        self.bridge
            .create_table(&Self::simple_table(&self.schema_name, table), false)
    }

    pub fn table_name(&self, table: &str) -> SchemaTableName {
        SchemaTableName::new(self.schema_name.clone(), table)
    }

    /// Handle of a table that must exist
    pub fn table_handle(&self, table: &str) -> EngineHandle<RecordingEngine> {
        self.bridge
            .get_table_handle(&self.session, &self.table_name(table), None, None)
            .expect("Failed to resolve table handle")
            .expect("Table should exist")
    }

    pub fn properties(entries: &[(&str, PropertyValue)]) -> HashMap<String, PropertyValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}
