// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog-side model
//!
//! Descriptors, the catalog type system and the metadata service contract
//! the bridge consumes, plus an in-memory service for embedding and tests.

pub mod error;
pub mod identifier;
pub mod memory;
pub mod metadata;
pub mod provider;
pub mod service;
pub mod types;
