pub mod reservation;

use std::sync::Arc;

use roombook_core::errors::BookingError;

/// Source of ids for new reservations. Engines draw again when an id is already taken.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Random 12-character lowercase hex id.
pub fn generate_id() -> String {
    let bytes: [u8; 6] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn random_ids() -> IdGenerator {
    Arc::new(generate_id)
}

pub(crate) fn db_error(err: sqlx::Error) -> BookingError {
    match err {
        sqlx::Error::PoolTimedOut => {
            BookingError::Cancelled("timed out waiting for a database connection".to_string())
        }
        err => BookingError::Database(eyre::Report::new(err)),
    }
}
