use async_trait::async_trait;

use crate::errors::BookingResult;
use crate::models::reservation::{NewReservation, Reservation, ReservationPatch};

/// Storage capability for reservations.
///
/// Implementations own the persisted state and enforce the no-overlap invariant on
/// `create`. Every method is a future; dropping it before completion abandons the
/// operation without committing partial writes.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persists a reservation and returns its generated id.
    ///
    /// Fails with `BookingError::Conflict` when another reservation for the same room
    /// overlaps the requested window. Of two concurrent overlapping creates, at most
    /// one succeeds.
    async fn create(&self, reservation: NewReservation) -> BookingResult<String>;

    /// Fails with `BookingError::NotFound` when no reservation has this id.
    async fn get(&self, id: &str) -> BookingResult<Reservation>;

    /// All reservations of a room, ordered by start time.
    ///
    /// A room without reservations yields `BookingError::NotFoundForRoom`.
    async fn list(&self, room_id: &str) -> BookingResult<Vec<Reservation>>;

    /// Writes the fields present in `patch`. An empty patch is a no-op.
    ///
    /// Overlap is not re-checked against the patched window.
    async fn update(&self, id: &str, patch: ReservationPatch) -> BookingResult<()>;

    async fn delete(&self, id: &str) -> BookingResult<()>;
}
