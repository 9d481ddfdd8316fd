// config.rs

use dotenv::dotenv;
use std::{env, net::SocketAddr};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BCRYPT_WORK_FACTOR: u32 = 12;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Errors raised while reading the process configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error when a required environment variable is not set
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(&'static str),

    /// Error when an environment variable holds an unusable value
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime settings, read once at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Loads `.env` (if any) and builds the configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET_KEY")?,
            bind_addr: parsed("BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?,
            bcrypt_cost: parsed("BCRYPT_WORK_FACTOR", Some(DEFAULT_BCRYPT_WORK_FACTOR))?,
            token_ttl_hours: parsed("TOKEN_TTL_HOURS", Some(DEFAULT_TOKEN_TTL_HOURS))?,
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::EnvVarNotFound(key))
}

fn parsed<T: std::str::FromStr>(key: &'static str, default: Option<T>) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => default.ok_or(ConfigError::EnvVarNotFound(key)),
    }
}
