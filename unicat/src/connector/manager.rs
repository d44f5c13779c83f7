// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog connector registry
//!
//! The manager owns one bridge per registered catalog. Registration checks
//! the catalog's properties against its provider, picks the provider's
//! adapter and wires the bridge to the catalog's metadata service and the
//! engine's metadata component.

use super::bridge::ConnectorBridge;
use super::config::{CatalogConfig, ConnectorConfig};
use super::engine::EngineMetadata;
use crate::adapter::create_adapter;
use crate::adapter::properties::with_defaults;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::service::CatalogMetadataService;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A registered catalog and its bridge
pub struct CatalogConnector<E: EngineMetadata> {
    config: CatalogConfig,
    bridge: Arc<ConnectorBridge<E>>,
}

impl<E: EngineMetadata> CatalogConnector<E> {
    /// Registration config with provider defaults filled in
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn bridge(&self) -> &Arc<ConnectorBridge<E>> {
        &self.bridge
    }

    /// Name the engine knows this catalog by
    pub fn engine_name(&self) -> &str {
        self.bridge.catalog_name()
    }
}

impl<E: EngineMetadata> std::fmt::Debug for CatalogConnector<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConnector")
            .field("config", &self.config)
            .field("engine_name", &self.engine_name())
            .finish_non_exhaustive()
    }
}

pub struct CatalogConnectorManager<E: EngineMetadata> {
    config: ConnectorConfig,
    /// Map of catalog name to connector
    connectors: RwLock<HashMap<String, Arc<CatalogConnector<E>>>>,
}

impl<E: EngineMetadata> CatalogConnectorManager<E> {
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config,
            connectors: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Register a catalog
    ///
    /// # Arguments
    /// * `catalog` - Name, provider and properties of the catalog
    /// * `service` - Metadata service backing the catalog
    /// * `internal` - The engine's metadata component for this catalog
    ///
    /// # Returns
    /// * `Ok(connector)` - The registered connector
    /// * `Err(CatalogError::AlreadyExists)` - A catalog with that name is registered
    /// * `Err(CatalogError::InvalidArgument)` - Bad name or catalog properties
    pub fn register(
        &self,
        catalog: CatalogConfig,
        service: Arc<dyn CatalogMetadataService>,
        internal: Arc<E>,
    ) -> CatalogResult<Arc<CatalogConnector<E>>> {
        catalog.validate_name()?;
        let adapter = create_adapter(catalog.provider);
        adapter.validate_catalog_properties(&catalog.properties)?;

        let mut connectors = self.connectors.write();
        if connectors.contains_key(&catalog.name) {
            return Err(CatalogError::AlreadyExists(format!("Catalog '{}'", catalog.name)));
        }

        let properties = with_defaults(adapter.catalog_property_entries(), &catalog.properties);
        let engine_name = self.config.engine_catalog_name(&catalog.name);
        let bridge = ConnectorBridge::new(engine_name.clone(), service, adapter, internal);
        let connector = Arc::new(CatalogConnector {
            config: CatalogConfig {
                properties,
                ..catalog
            },
            bridge: Arc::new(bridge),
        });

        connectors.insert(connector.config.name.clone(), connector.clone());
        log::info!(
            "Registered catalog {} ({}) as {}",
            connector.config.name,
            connector.config.provider,
            engine_name
        );
        Ok(connector)
    }

    /// # Returns
    /// * `Some(connector)` if the catalog is registered
    /// * `None` otherwise
    pub fn get(&self, name: &str) -> Option<Arc<CatalogConnector<E>>> {
        self.connectors.read().get(name).cloned()
    }

    /// Look a catalog up by the name the engine uses
    pub fn get_by_engine_name(&self, engine_name: &str) -> Option<Arc<CatalogConnector<E>>> {
        self.connectors
            .read()
            .values()
            .find(|c| c.engine_name() == engine_name)
            .cloned()
    }

    /// Remove a catalog; returns whether it was registered
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.connectors.write().remove(name).is_some();
        if removed {
            log::info!("Unregistered catalog {}", name);
        }
        removed
    }

    /// Registered catalog names, sorted
    pub fn list_catalog_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.connectors.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_catalog(&self, name: &str) -> bool {
        self.connectors.read().contains_key(name)
    }

    pub fn catalog_count(&self) -> usize {
        self.connectors.read().len()
    }
}
