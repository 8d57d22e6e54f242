use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use roombook_api::{config::ApiConfig, shutdown_signal};
use roombook_db::{
    config::DbConfig, repositories::reservation::PgReservationRepository,
    schema::initialize_database,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let api_config = ApiConfig::from_env()?;
    let db_config = DbConfig::from_env()?;

    // Connect the reservation store
    let store = PgReservationRepository::connect(&db_config).await?;

    // Initialize database schema
    initialize_database(store.pool()).await?;

    // Serve until a shutdown signal arrives
    let served =
        roombook_api::start_server(api_config, Arc::new(store.clone()), shutdown_signal()).await;

    // Release pooled connections whether or not the server exited cleanly
    store.close().await;
    tracing::info!("Database connections closed");

    served
}
