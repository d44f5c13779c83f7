// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connector configuration

use crate::adapter::properties::{validate_properties, with_defaults, PropertyEntry};
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::identifier::validate_name;
use crate::catalog::provider::CatalogProvider;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const METALAKE_KEY: &str = "unicat.metalake";
pub const URI_KEY: &str = "unicat.uri";
pub const SIMPLIFY_CATALOG_NAMES_KEY: &str = "unicat.simplify-catalog-names";

pub const DEFAULT_URI: &str = "http://localhost:8090";

static CONNECTOR_PROPERTY_ENTRIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::string(METALAKE_KEY, "Metalake whose catalogs are exposed").required(),
        PropertyEntry::string(URI_KEY, "Address of the catalog server").with_default(DEFAULT_URI),
        PropertyEntry::boolean(
            SIMPLIFY_CATALOG_NAMES_KEY,
            "Expose catalogs by plain name instead of metalake.catalog",
        )
        .with_default("true"),
    ]
});

/// Connector-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Metalake whose catalogs are exposed
    pub metalake: String,

    /// Catalog server address
    pub uri: String,

    /// Expose catalogs by plain name instead of `metalake.catalog`
    pub simplify_catalog_names: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            metalake: String::new(),
            uri: DEFAULT_URI.to_string(),
            simplify_catalog_names: true,
        }
    }
}

impl ConnectorConfig {
    pub fn new(metalake: impl Into<String>) -> Self {
        Self {
            metalake: metalake.into(),
            ..Self::default()
        }
    }

    /// Parse the connector's `unicat.*` properties
    ///
    /// # Returns
    /// * `Err(CatalogError::InvalidArgument)` if the metalake is missing or a
    ///   value does not parse
    pub fn from_properties(properties: &HashMap<String, String>) -> CatalogResult<Self> {
        validate_properties(&CONNECTOR_PROPERTY_ENTRIES, properties)?;
        let filled = with_defaults(&CONNECTOR_PROPERTY_ENTRIES, properties);

        let metalake = filled.get(METALAKE_KEY).cloned().unwrap_or_default();
        if metalake.trim().is_empty() {
            return Err(CatalogError::InvalidArgument(format!(
                "Property '{}' must not be empty",
                METALAKE_KEY
            )));
        }
        let uri = filled
            .get(URI_KEY)
            .cloned()
            .unwrap_or_else(|| DEFAULT_URI.to_string());
        let simplify_catalog_names = filled
            .get(SIMPLIFY_CATALOG_NAMES_KEY)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Ok(Self {
            metalake,
            uri,
            simplify_catalog_names,
        })
    }

    /// Name the engine uses for a catalog
    pub fn engine_catalog_name(&self, catalog: &str) -> String {
        if self.simplify_catalog_names {
            catalog.to_string()
        } else {
            format!("{}.{}", self.metalake, catalog)
        }
    }
}

/// One catalog to register with the connector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub name: String,
    pub provider: CatalogProvider,
    pub comment: Option<String>,
    pub properties: HashMap<String, String>,
}

impl CatalogConfig {
    pub fn new(name: impl Into<String>, provider: CatalogProvider) -> Self {
        Self {
            name: name.into(),
            provider,
            comment: None,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn validate_name(&self) -> CatalogResult<()> {
        validate_name("Catalog", &self.name)
    }
}
