// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query bracketing guard

use super::engine::EngineMetadata;

/// Brackets one query: `begin_query` on creation, `cleanup_query` on drop
///
/// Cleanup runs exactly once, including when the query bails out early
/// with an error.
pub struct QueryScope<'a, E: EngineMetadata> {
    engine: &'a E,
    session: &'a E::Session,
}

impl<'a, E: EngineMetadata> QueryScope<'a, E> {
    pub fn begin(engine: &'a E, session: &'a E::Session) -> Self {
        engine.begin_query(session);
        Self { engine, session }
    }

    pub fn session(&self) -> &'a E::Session {
        self.session
    }
}

impl<E: EngineMetadata> Drop for QueryScope<'_, E> {
    fn drop(&mut self) {
        self.engine.cleanup_query(self.session);
    }
}
