//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! certification accounting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Dates, amounts and a ready-made ledger with its chart of accounts
//! - `builders`: Builder patterns for works, certifications and the accounting service
//! - `assertions`: Custom assertion helpers for moves and reconciliations
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
