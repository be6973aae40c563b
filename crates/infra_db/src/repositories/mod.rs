//! Repository implementations
//!
//! Repositories own the SQL and map between table rows and plain row
//! structs. Conversion to domain types happens in the adapters.

pub mod customer;

pub use customer::CustomerRepository;
