// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Property metadata and conversion
//!
//! Catalog properties are plain strings. The engine sees typed values under
//! possibly different keys. A `PropertyEntry` describes one known property:
//! its engine-facing name, its catalog name, its value kind and constraints.
//! Keys without an entry pass through unchanged as strings.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::connector::spi::PropertyValue;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Key selecting the authentication mechanism of a filesystem catalog
pub const AUTH_TYPE_KEY: &str = "authentication.type";

/// Key enabling user impersonation on a filesystem catalog
pub const IMPERSONATION_ENABLE_KEY: &str = "authentication.impersonation-enable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Long,
    Double,
    Boolean,
    /// Comma-separated on the catalog side
    List,
    /// One of a fixed set of lowercase values
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    /// Key the engine uses
    pub name: &'static str,
    /// Key the catalog stores
    pub catalog_name: &'static str,
    pub description: &'static str,
    pub kind: PropertyKind,
    pub required: bool,
    pub immutable: bool,
    pub default_value: Option<&'static str>,
    /// Never shown to the engine
    pub hidden: bool,
    /// Managed by the catalog itself; users may not set it
    pub reserved: bool,
}

impl PropertyEntry {
    fn of(name: &'static str, description: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            catalog_name: name,
            description,
            kind,
            required: false,
            immutable: false,
            default_value: None,
            hidden: false,
            reserved: false,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, PropertyKind::String)
    }

    pub fn long(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, PropertyKind::Long)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, PropertyKind::Boolean)
    }

    pub fn list(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, PropertyKind::List)
    }

    pub fn enumerated(
        name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self::of(name, description, PropertyKind::Enum(values))
    }

    /// Store the property under a different catalog key
    pub fn stored_as(mut self, catalog_name: &'static str) -> Self {
        self.catalog_name = catalog_name;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn reserved(mut self) -> Self {
        self.reserved = true;
        self
    }

    pub fn with_default(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Parse a catalog string into the engine value kind
    pub fn parse_value(&self, raw: &str) -> CatalogResult<PropertyValue> {
        let invalid = |expected: &str| {
            CatalogError::InvalidArgument(format!(
                "Property '{}' expects a {} value, got '{}'",
                self.name, expected, raw
            ))
        };
        match self.kind {
            PropertyKind::String => Ok(PropertyValue::String(raw.to_string())),
            PropertyKind::Long => raw
                .trim()
                .parse::<i64>()
                .map(PropertyValue::Long)
                .map_err(|_| invalid("long")),
            PropertyKind::Double => raw
                .trim()
                .parse::<f64>()
                .map(PropertyValue::Double)
                .map_err(|_| invalid("double")),
            PropertyKind::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" => Ok(PropertyValue::Boolean(true)),
                "false" => Ok(PropertyValue::Boolean(false)),
                _ => Err(invalid("boolean")),
            },
            PropertyKind::List => Ok(PropertyValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            PropertyKind::Enum(values) => {
                let lowered = raw.trim().to_lowercase();
                if values.contains(&lowered.as_str()) {
                    Ok(PropertyValue::String(lowered))
                } else {
                    Err(invalid(&format!("one of [{}]", values.join(", "))))
                }
            }
        }
    }

    /// Render an engine value as the catalog string, checking its kind
    pub fn format_value(&self, value: &PropertyValue) -> CatalogResult<String> {
        match (self.kind, value) {
            (PropertyKind::String, PropertyValue::String(s)) => Ok(s.clone()),
            (PropertyKind::Long, PropertyValue::Long(v)) => Ok(v.to_string()),
            (PropertyKind::Double, PropertyValue::Double(v)) => Ok(v.to_string()),
            (PropertyKind::Double, PropertyValue::Long(v)) => Ok(v.to_string()),
            (PropertyKind::Boolean, PropertyValue::Boolean(v)) => Ok(v.to_string()),
            (PropertyKind::List, PropertyValue::List(items)) => Ok(items.join(",")),
            (PropertyKind::Enum(_), PropertyValue::String(s)) => {
                self.parse_value(s).map(|v| v.to_string())
            }
            (kind, other) => Err(CatalogError::InvalidArgument(format!(
                "Property '{}' expects a {:?} value, got {} '{}'",
                self.name,
                kind,
                other.kind_name(),
                other
            ))),
        }
    }
}

/// Translate catalog properties into engine values
pub fn to_engine_properties(
    entries: &[PropertyEntry],
    properties: &HashMap<String, String>,
) -> CatalogResult<HashMap<String, PropertyValue>> {
    let mut converted = HashMap::with_capacity(properties.len());
    for (key, raw) in properties {
        match entries.iter().find(|e| e.catalog_name == key.as_str()) {
            Some(entry) if entry.hidden => continue,
            Some(entry) => {
                converted.insert(entry.name.to_string(), entry.parse_value(raw)?);
            }
            None => {
                converted.insert(key.clone(), PropertyValue::String(raw.clone()));
            }
        }
    }
    Ok(converted)
}

/// Translate engine values into catalog properties
pub fn to_catalog_properties(
    entries: &[PropertyEntry],
    properties: &HashMap<String, PropertyValue>,
) -> CatalogResult<HashMap<String, String>> {
    let mut converted = HashMap::with_capacity(properties.len());
    for (key, value) in properties {
        match entries.iter().find(|e| e.name == key.as_str()) {
            Some(entry) if entry.reserved => {
                return Err(CatalogError::InvalidArgument(format!(
                    "Property '{}' is reserved and cannot be set",
                    key
                )));
            }
            Some(entry) => {
                converted.insert(entry.catalog_name.to_string(), entry.format_value(value)?);
            }
            None => {
                converted.insert(key.clone(), value.to_string());
            }
        }
    }
    Ok(converted)
}

/// Check catalog properties against their entries
///
/// Rejects missing required properties, reserved keys and values that do
/// not parse as the entry's kind. Unknown keys are accepted.
pub fn validate_properties(
    entries: &[PropertyEntry],
    properties: &HashMap<String, String>,
) -> CatalogResult<()> {
    for entry in entries {
        match properties.get(entry.catalog_name) {
            Some(_) if entry.reserved => {
                return Err(CatalogError::InvalidArgument(format!(
                    "Property '{}' is reserved and cannot be set",
                    entry.catalog_name
                )));
            }
            Some(raw) => {
                entry.parse_value(raw)?;
            }
            None if entry.required => {
                return Err(CatalogError::InvalidArgument(format!(
                    "Missing required property '{}': {}",
                    entry.catalog_name, entry.description
                )));
            }
            None => {}
        }
    }
    Ok(())
}

/// Copy of `properties` with entry defaults filled in
pub fn with_defaults(
    entries: &[PropertyEntry],
    properties: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut filled = properties.clone();
    for entry in entries {
        if let Some(default) = entry.default_value {
            filled
                .entry(entry.catalog_name.to_string())
                .or_insert_with(|| default.to_string());
        }
    }
    filled
}

/// Authentication properties accepted by filesystem catalogs
///
/// They are validated only; credential negotiation happens outside the bridge.
pub static AUTHENTICATION_PROPERTY_ENTRIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::enumerated(
            AUTH_TYPE_KEY,
            "The type of authentication, simple or kerberos",
            &["simple", "kerberos"],
        )
        .immutable()
        .with_default("simple"),
        PropertyEntry::boolean(
            IMPERSONATION_ENABLE_KEY,
            "Whether to enable impersonation for the catalog",
        )
        .with_default("false"),
    ]
});

/// Connection properties shared by JDBC catalogs
pub static JDBC_CATALOG_PROPERTY_ENTRIES: Lazy<Vec<PropertyEntry>> = Lazy::new(|| {
    vec![
        PropertyEntry::string("jdbc-url", "JDBC URL of the backing database").required(),
        PropertyEntry::string("jdbc-driver", "JDBC driver class name").required(),
        PropertyEntry::string("jdbc-user", "JDBC user name").required(),
        PropertyEntry::string("jdbc-password", "JDBC password")
            .required()
            .hidden(),
        PropertyEntry::long("jdbc.pool.min-size", "Minimum pooled connections").with_default("2"),
        PropertyEntry::long("jdbc.pool.max-size", "Maximum pooled connections").with_default("10"),
    ]
});
