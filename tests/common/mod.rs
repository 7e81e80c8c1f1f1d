//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Fixture creation for isolated application homes
//! - Seed data for shopping lists, favorites, and auth sessions
//!
//! Every test gets its own `TempDir` home and points the binary at it via
//! the `SMART_KITCHEN_HOME` environment variable, so tests never touch the
//! real home directory and can run in parallel.

pub mod fixtures;
