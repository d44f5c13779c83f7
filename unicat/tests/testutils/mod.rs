//! Test utilities for unicat integration tests
//!
//! - RecordingEngine: in-memory engine metadata component that logs calls
//! - TestFixture: a bridge wired to a fresh in-memory catalog

pub mod test_engine;
pub mod test_fixture;
