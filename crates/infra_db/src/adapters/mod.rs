//! Domain Adapters
//!
//! Adapter implementations of the domain ports on top of the repositories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCustomerStore;
//! use domain_customer::CustomerStore;
//!
//! let store = PostgresCustomerStore::new(pool);
//! let customer = store.get_by_id(customer_id).await?;
//! ```

pub mod customer;

pub use customer::PostgresCustomerStore;
