// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Engine-facing connector layer
//!
//! Handles, the engine metadata contract, the bridge between engine and
//! catalog, and the registry of catalog connectors.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod handle;
pub mod manager;
pub mod scope;
pub mod spi;
