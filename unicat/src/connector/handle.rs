// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Composite handles
//!
//! Every handle the bridge gives to the engine pairs a stable catalog
//! identity with the engine's own opaque handle. The engine hands them back
//! as `ConnectorHandle` values; unwrapping checks the variant and reports a
//! wrong kind as an internal error.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::identifier::CatalogIdentifier;
use std::fmt;

/// Catalog identity plus the engine's table handle
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeTableHandle<T> {
    identifier: CatalogIdentifier,
    internal: T,
}

impl<T> CompositeTableHandle<T> {
    pub fn new(identifier: CatalogIdentifier, internal: T) -> Self {
        Self {
            identifier,
            internal,
        }
    }

    pub fn identifier(&self) -> &CatalogIdentifier {
        &self.identifier
    }

    pub fn internal(&self) -> &T {
        &self.internal
    }
}

/// Column name plus the engine's column handle
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeColumnHandle<C> {
    column_name: String,
    internal: C,
}

impl<C> CompositeColumnHandle<C> {
    pub fn new(column_name: impl Into<String>, internal: C) -> Self {
        Self {
            column_name: column_name.into(),
            internal,
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn internal(&self) -> &C {
        &self.internal
    }

    pub fn into_internal(self) -> C {
        self.internal
    }
}

/// An in-progress insert
///
/// Not `Clone`: `finish_insert` takes it by value, so one session can be
/// finished once.
#[derive(Debug, PartialEq)]
pub struct InsertSession<I> {
    identifier: CatalogIdentifier,
    internal: I,
}

impl<I> InsertSession<I> {
    pub fn new(identifier: CatalogIdentifier, internal: I) -> Self {
        Self {
            identifier,
            internal,
        }
    }

    pub fn identifier(&self) -> &CatalogIdentifier {
        &self.identifier
    }

    pub fn into_internal(self) -> I {
        self.internal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Table,
    Column,
    Insert,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Table => write!(f, "table"),
            HandleKind::Column => write!(f, "column"),
            HandleKind::Insert => write!(f, "insert"),
        }
    }
}

/// Any handle the bridge hands out
#[derive(Debug, PartialEq)]
pub enum ConnectorHandle<T, C, I> {
    Table(CompositeTableHandle<T>),
    Column(CompositeColumnHandle<C>),
    Insert(InsertSession<I>),
}

impl<T, C, I> ConnectorHandle<T, C, I> {
    pub fn kind(&self) -> HandleKind {
        match self {
            ConnectorHandle::Table(_) => HandleKind::Table,
            ConnectorHandle::Column(_) => HandleKind::Column,
            ConnectorHandle::Insert(_) => HandleKind::Insert,
        }
    }

    fn wrong_kind(&self, expected: HandleKind) -> CatalogError {
        CatalogError::InternalError(format!(
            "Expected a {} handle, got a {} handle",
            expected,
            self.kind()
        ))
    }

    pub fn as_table(&self) -> CatalogResult<&CompositeTableHandle<T>> {
        match self {
            ConnectorHandle::Table(handle) => Ok(handle),
            other => Err(other.wrong_kind(HandleKind::Table)),
        }
    }

    pub fn as_column(&self) -> CatalogResult<&CompositeColumnHandle<C>> {
        match self {
            ConnectorHandle::Column(handle) => Ok(handle),
            other => Err(other.wrong_kind(HandleKind::Column)),
        }
    }

    pub fn into_column(self) -> CatalogResult<CompositeColumnHandle<C>> {
        match self {
            ConnectorHandle::Column(handle) => Ok(handle),
            other => Err(other.wrong_kind(HandleKind::Column)),
        }
    }

    pub fn into_insert(self) -> CatalogResult<InsertSession<I>> {
        match self {
            ConnectorHandle::Insert(session) => Ok(session),
            other => Err(other.wrong_kind(HandleKind::Insert)),
        }
    }
}

impl<T, C, I> From<CompositeTableHandle<T>> for ConnectorHandle<T, C, I> {
    fn from(handle: CompositeTableHandle<T>) -> Self {
        ConnectorHandle::Table(handle)
    }
}

impl<T, C, I> From<CompositeColumnHandle<C>> for ConnectorHandle<T, C, I> {
    fn from(handle: CompositeColumnHandle<C>) -> Self {
        ConnectorHandle::Column(handle)
    }
}

impl<T, C, I> From<InsertSession<I>> for ConnectorHandle<T, C, I> {
    fn from(session: InsertSession<I>) -> Self {
        ConnectorHandle::Insert(session)
    }
}
