//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims adjudication test suite.
//!
//! # Modules
//!
//! - `fixtures`: Claims with known verdicts and seeded reference data
//! - `builders`: Builder patterns for claims and reference tables
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Verdict and record assertion helpers
//! - `generators`: Property-based claim generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
