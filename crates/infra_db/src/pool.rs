//! Connection pool and schema migrations

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// How long a request waits for a free connection before failing
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing for the customer database
///
/// The server fills it from `API_DATABASE_URL` and `API_DB_MAX_CONNECTIONS`.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Pool of up to 10 connections, 1 kept open
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Clamped to `max_connections` when the pool is created
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }
}

/// Connects to PostgreSQL
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if no connection can be opened
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let min_connections = config.min_connections.min(config.max_connections);
    info!(
        max_connections = config.max_connections,
        min_connections, "Creating database pool"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Applies every pending migration from the workspace `migrations/` directory
///
/// Migrations are embedded at compile time; already applied ones are skipped.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_server_settings() {
        let config = DatabaseConfig::new("postgres://localhost/clientes")
            .max_connections(4)
            .min_connections(2);

        assert_eq!(config.url, "postgres://localhost/clientes");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 2);
    }

    #[test]
    fn test_config_defaults() {
        let config = DatabaseConfig::new("postgres://test");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }
}
