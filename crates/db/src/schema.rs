use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservation (
            id TEXT PRIMARY KEY,
            room_id TEXT NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Update writes the window unchecked, so no ordering CHECK may remain from older schemas
    sqlx::query("ALTER TABLE reservation DROP CONSTRAINT IF EXISTS valid_time_range")
        .execute(pool)
        .await?;

    // Serves the overlap probe: equality on room_id, range on the window
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reservation_room_window
            ON reservation(room_id, start_time, end_time);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
