// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog provider kinds

use super::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage technology a catalog is implemented against
///
/// The provider decides which metadata adapter translates the catalog's
/// metadata for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogProvider {
    /// Filesystem-backed tables registered in a Hive metastore
    Hive,
    JdbcMysql,
    JdbcPostgresql,
    LakehouseIceberg,
    LakehousePaimon,
}

impl CatalogProvider {
    pub const ALL: [CatalogProvider; 5] = [
        CatalogProvider::Hive,
        CatalogProvider::JdbcMysql,
        CatalogProvider::JdbcPostgresql,
        CatalogProvider::LakehouseIceberg,
        CatalogProvider::LakehousePaimon,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            CatalogProvider::Hive => "hive",
            CatalogProvider::JdbcMysql => "jdbc-mysql",
            CatalogProvider::JdbcPostgresql => "jdbc-postgresql",
            CatalogProvider::LakehouseIceberg => "lakehouse-iceberg",
            CatalogProvider::LakehousePaimon => "lakehouse-paimon",
        }
    }
}

impl fmt::Display for CatalogProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for CatalogProvider {
    type Err = CatalogError;

    fn from_str(s: &str) -> CatalogResult<Self> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.short_name() == lowered)
            .ok_or_else(|| {
                CatalogError::InvalidArgument(format!("Unknown catalog provider: {}", s))
            })
    }
}

/// Metastore behind a Paimon catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaimonCatalogBackend {
    Filesystem,
}

impl FromStr for PaimonCatalogBackend {
    type Err = CatalogError;

    fn from_str(s: &str) -> CatalogResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "filesystem" => Ok(PaimonCatalogBackend::Filesystem),
            other => Err(CatalogError::InvalidArgument(format!(
                "Unsupported Paimon catalog backend: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PaimonCatalogBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaimonCatalogBackend::Filesystem => write!(f, "filesystem"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names_parse_back() {
        for provider in CatalogProvider::ALL {
            assert_eq!(
                provider.short_name().parse::<CatalogProvider>().unwrap(),
                provider
            );
        }
        assert_eq!(
            " Lakehouse-Iceberg ".parse::<CatalogProvider>().unwrap(),
            CatalogProvider::LakehouseIceberg
        );
        assert!("kafka".parse::<CatalogProvider>().is_err());
    }

    #[test]
    fn test_paimon_backend() {
        assert_eq!(
            "FILESYSTEM".parse::<PaimonCatalogBackend>().unwrap(),
            PaimonCatalogBackend::Filesystem
        );
        assert!("hive".parse::<PaimonCatalogBackend>().is_err());
    }
}
