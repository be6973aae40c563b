//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! customer service test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built candidates and reference dates
//! - `builders`: Builder for customer candidates
//! - `database`: PostgreSQL test container with the real migrations applied
//! - `assertions`: Assertion helpers for customers and engine results
//! - `generators`: Property-based test data generators

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
