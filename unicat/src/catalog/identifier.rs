// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Stable catalog identities

use super::error::{CatalogError, CatalogResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest schema or table name the catalog accepts
pub const MAX_NAME_LENGTH: usize = 64;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("name pattern is a valid regex")
});

/// Check that a schema, table or column name is addressable in the catalog
pub fn validate_name(kind: &str, name: &str) -> CatalogResult<()> {
    if name.is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "{} name must not be empty",
            kind
        )));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CatalogError::InvalidArgument(format!(
            "{} name '{}' exceeds {} characters",
            kind, name, MAX_NAME_LENGTH
        )));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(CatalogError::InvalidArgument(format!(
            "{} name '{}' contains illegal characters",
            kind, name
        )));
    }
    Ok(())
}

/// (schema, table) pair that addresses one table in a catalog
///
/// This is the only key the bridge carries between calls; everything else
/// is re-read from the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogIdentifier {
    schema_name: String,
    table_name: String,
}

impl CatalogIdentifier {
    pub fn new(schema_name: impl Into<String>, table_name: impl Into<String>) -> CatalogResult<Self> {
        let schema_name = schema_name.into();
        let table_name = table_name.into();
        validate_name("Schema", &schema_name)?;
        validate_name("Table", &table_name)?;
        Ok(Self {
            schema_name,
            table_name,
        })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl fmt::Display for CatalogIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema_name, self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_accessors() {
        let ident = CatalogIdentifier::new("sales", "orders").unwrap();
        assert_eq!(ident.schema_name(), "sales");
        assert_eq!(ident.table_name(), "orders");
        assert_eq!(ident.to_string(), "sales.orders");
    }

    #[test]
    fn test_rejects_bad_names() {
        assert!(matches!(
            CatalogIdentifier::new("", "t"),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert!(matches!(
            CatalogIdentifier::new("s", "has space"),
            Err(CatalogError::InvalidArgument(_))
        ));
        assert!(matches!(
            CatalogIdentifier::new("9lives", "t"),
            Err(CatalogError::InvalidArgument(_))
        ));
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(CatalogIdentifier::new("s", long).is_err());
    }

    #[test]
    fn test_accepts_underscore_and_dash() {
        assert!(CatalogIdentifier::new("_staging", "daily-events").is_ok());
    }
}
