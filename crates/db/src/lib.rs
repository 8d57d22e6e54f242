pub mod config;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use std::time::Duration;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::DbConfig;

pub type DbPool = Pool<Postgres>;

const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60);
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

pub async fn create_pool(config: &DbConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(MAX_CONNECTION_LIFETIME)
        .idle_timeout(IDLE_TIMEOUT)
        .test_before_acquire(true)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options()?)
        .await?;

    Ok(pool)
}
