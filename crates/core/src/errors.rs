use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("reservation overlaps with another")]
    Conflict,

    #[error("reservation not found: {0}")]
    NotFound(String),

    #[error("reservations not found for room: {0}")]
    NotFoundForRoom(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl BookingError {
    pub fn validation(reason: impl Into<String>) -> Self {
        BookingError::Validation(reason.into())
    }

    /// Whether the failure was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, BookingError::Cancelled(_) | BookingError::Database(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
