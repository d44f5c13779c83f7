// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Unicat - a unified metadata catalog bridge
//!
//! Unicat lets a query engine address tables kept in different storage
//! backends through one naming and property model. The engine talks to a
//! `ConnectorBridge`, which resolves its handles to catalog identities,
//! reads and writes metadata through a `CatalogMetadataService` and
//! translates between catalog and engine shapes with the provider's
//! `MetadataAdapter`.
//!
//! # Providers
//!
//! - **hive**: filesystem tables in a Hive metastore
//! - **jdbc-mysql** / **jdbc-postgresql**: relational databases over JDBC
//! - **lakehouse-iceberg** / **lakehouse-paimon**: lakehouse table formats
//!
//! # Usage
//!
//! ```ignore
//! let manager = CatalogConnectorManager::new(ConnectorConfig::new("metalake"));
//! let connector = manager.register(
//!     CatalogConfig::new("hive_prod", CatalogProvider::Hive)
//!         .with_property("metastore.uris", "thrift://localhost:9083"),
//!     Arc::new(InMemoryCatalogService::new()),
//!     engine,
//! )?;
//! let schemas = connector.bridge().list_schema_names()?;
//! ```

pub mod adapter;
pub mod catalog;
pub mod connector;

pub use adapter::{create_adapter, MetadataAdapter};
pub use catalog::error::{CatalogError, CatalogResult};
pub use catalog::identifier::CatalogIdentifier;
pub use catalog::memory::InMemoryCatalogService;
pub use catalog::metadata::{
    ColumnDescriptor, SchemaDescriptor, TableChange, TableDescriptor, Transform,
};
pub use catalog::provider::CatalogProvider;
pub use catalog::service::CatalogMetadataService;
pub use catalog::types::DataType;
pub use connector::bridge::{ConnectorBridge, EngineHandle};
pub use connector::config::{CatalogConfig, ConnectorConfig};
pub use connector::engine::EngineMetadata;
pub use connector::handle::{ConnectorHandle, HandleKind};
pub use connector::manager::{CatalogConnector, CatalogConnectorManager};
pub use connector::scope::QueryScope;
pub use connector::spi::{
    ColumnMetadata, EngineType, PropertyValue, SchemaTableName, TableMetadata,
};

/// Unicat version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unicat crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
