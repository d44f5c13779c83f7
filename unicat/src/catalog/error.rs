// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types shared by the catalog service, the metadata adapters and the
//! connector bridge

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Schema, table or column absent on a mutation path
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The adapter cannot represent a catalog or engine type
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// Invariant violation: diverged metadata views or a handle of the wrong kind
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    /// Whether this error reports a missing target
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, CatalogError::AlreadyExists(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
