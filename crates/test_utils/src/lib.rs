//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! confidential claims test suite.
//!
//! # Modules
//!
//! - `fixtures`: The cast of principals and the reference figures
//! - `builders`: Builder for a fully wired engine over the in-memory cipher
//! - `assertions`: Custom assertion helpers for grants, states and errors
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
