use std::future::Future;
use std::time::Duration;

use crate::errors::{BookingError, BookingResult};

/// Runs a store operation with a time limit.
///
/// On expiry the operation future is dropped, which aborts its I/O and rolls back any
/// open transaction, and `BookingError::Cancelled` is returned.
pub async fn with_deadline<T, F>(limit: Duration, operation: F) -> BookingResult<T>
where
    F: Future<Output = BookingResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(BookingError::Cancelled(format!(
            "operation exceeded its deadline of {}ms",
            limit.as_millis()
        ))),
    }
}
