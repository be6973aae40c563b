//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the customer domain
//! using SQLx.
//!
//! # Architecture
//!
//! - `pool`: connection pool configuration and embedded migrations
//! - `repositories`: SQL access returning plain row structs
//! - `adapters`: `CustomerStore` implementation over the repositories
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresCustomerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/clientes")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresCustomerStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::CustomerRepository;
pub use adapters::PostgresCustomerStore;
