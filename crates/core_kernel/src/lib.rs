//! Core Kernel - Foundational types shared by the customer crates
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Store-assigned integer identifiers
//! - Calendar helpers: the injectable clock, age arithmetic and date ranges
//! - The port error and health-check contracts implemented by adapters

pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use temporal::{Clock, SystemClock, FixedClock, DateRange, age_on};
pub use identifiers::{CustomerId, PhoneId, AddressId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
