// init.rs

use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use log::info;
use thiserror::Error;
use tokio_postgres::{config::Host, Config as PgConfig, NoTls};

use crate::database::migrations::apply_migrations;

/// Database-related error types
#[derive(Error, Debug)]
pub enum DbError {
    /// Error when DATABASE_URL parsing fails
    #[error("Failed to parse DATABASE_URL: {0}")]
    ParseError(String),

    /// Error when connection pool creation fails
    #[error("Failed to create pool: {0}")]
    PoolCreationError(String),

    /// Error when database migration fails
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Builds a deadpool config from a parsed PostgreSQL URL
///
/// Only the first TCP host and port are used; unix-socket hosts are ignored.
fn pool_config(pg_config: &PgConfig) -> Result<Config, DbError> {
    let mut cfg = Config::new();

    // Credentials: the password comes back as raw bytes
    cfg.user = pg_config.get_user().map(ToString::to_string);
    cfg.password = match pg_config.get_password() {
        Some(bytes) => Some(
            String::from_utf8(bytes.to_vec()).map_err(|e| DbError::ParseError(e.to_string()))?,
        ),
        None => None,
    };
    cfg.dbname = pg_config.get_dbname().map(ToString::to_string);

    // Target server
    cfg.host = pg_config.get_hosts().iter().find_map(|host| match host {
        Host::Tcp(name) => Some(name.clone()),
        _ => None,
    });
    cfg.port = pg_config.get_ports().first().copied();

    // Fast recycling skips the test query when a connection goes back to the pool
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    Ok(cfg)
}

/// Creates a connection pool using the provided database URL
///
/// # Arguments
/// * `database_url` - The PostgreSQL connection string
///
/// # Returns
/// * `Result<Pool, DbError>` - A connection pool or an error
fn create_pool(database_url: &str) -> Result<Pool, DbError> {
    // Let tokio-postgres do the URL parsing
    let pg_config = database_url
        .parse::<PgConfig>()
        .map_err(|e| DbError::ParseError(e.to_string()))?;

    pool_config(&pg_config)?
        .create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| DbError::PoolCreationError(e.to_string()))
}

/// Initializes the database connection pool and applies migrations
///
/// # Returns
/// * `Result<Pool, DbError>` - Initialized connection pool or an error
pub async fn init_db(database_url: &str) -> Result<Pool, DbError> {
    let pool = create_pool(database_url)?;

    // Borrow one connection to run the migrations
    let client = pool
        .get()
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    apply_migrations(&client)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    info!("Database pool initialized and migrations applied successfully");
    Ok(pool)
}
