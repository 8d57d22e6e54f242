use color_eyre::eyre::Result;
use dotenv::dotenv;
use roombook_db::{config::DbConfig, create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = DbConfig::from_env()?;

    println!("Connecting to database...");
    let db_pool = create_pool(&config).await?;

    println!("Initializing database schema...");
    initialize_database(&db_pool).await?;
    println!("Database schema initialized successfully.");

    db_pool.close().await;

    Ok(())
}
