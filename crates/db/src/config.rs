//! # Database Configuration
//!
//! Connection descriptor for the reservation store, read from the environment.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: full PostgreSQL connection string; when set, the parts below are ignored
//! - `DB_HOST`: database host (default: "localhost")
//! - `DB_PORT`: database port (default: 5432)
//! - `DB_USERNAME`, `DB_PASSWORD`, `DB_NAME`: credentials and database name (required
//!   without `DATABASE_URL`)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 5)
//! - `DB_ACQUIRE_TIMEOUT_SECONDS`: how long a caller waits for a free connection (default: 30)

use std::env;
use std::time::Duration;

use eyre::{eyre, Result, WrapErr};
use sqlx::postgres::PgConnectOptions;

/// Where the store connects to and how its pool is sized.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub target: DbTarget,

    /// Upper bound on pooled connections
    pub max_connections: u32,

    /// Time a caller queues for a free connection before giving up
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub enum DbTarget {
    Url(String),
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

impl DbConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            target: DbTarget::Url(url.into()),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Creates a new DbConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - neither `DATABASE_URL` nor `DB_NAME` is set
    /// - a numeric variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = match lookup("DATABASE_URL") {
            Some(url) => DbTarget::Url(url),
            None => DbTarget::Parts {
                host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: lookup("DB_PORT")
                    .unwrap_or_else(|| "5432".to_string())
                    .parse()
                    .wrap_err("Invalid DB_PORT value")?,
                username: lookup("DB_USERNAME").unwrap_or_default(),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: lookup("DB_NAME").ok_or_else(|| {
                    eyre!("DATABASE_URL or DB_NAME environment variable must be set")
                })?,
            },
        };

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;

        let acquire_timeout = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .wrap_err("Invalid DB_ACQUIRE_TIMEOUT_SECONDS value")?;

        Ok(Self {
            target,
            max_connections,
            acquire_timeout,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match &self.target {
            DbTarget::Url(url) => url
                .parse::<PgConnectOptions>()
                .wrap_err("unable to parse database connection string"),
            DbTarget::Parts {
                host,
                port,
                username,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)),
        }
    }
}
