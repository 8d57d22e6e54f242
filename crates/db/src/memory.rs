use std::collections::HashMap;

use async_trait::async_trait;
use roombook_core::{
    errors::{BookingError, BookingResult},
    models::reservation::{NewReservation, Reservation, ReservationPatch},
    repository::ReservationRepository,
};
use tokio::sync::RwLock;

use crate::repositories::{random_ids, IdGenerator};

/// Process-local reservation store.
///
/// `create` holds the write lock across the overlap check and the insert, which gives
/// the same at-most-one guarantee for racing creates as the PostgreSQL engine.
pub struct InMemoryReservationRepository {
    rows: RwLock<HashMap<String, Reservation>>,
    next_id: IdGenerator,
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self {
            rows: RwLock::default(),
            next_id: random_ids(),
        }
    }
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_generator(mut self, next_id: IdGenerator) -> Self {
        self.next_id = next_id;
        self
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, reservation: NewReservation) -> BookingResult<String> {
        let mut rows = self.rows.write().await;

        if rows.values().any(|existing| reservation.overlaps(existing)) {
            return Err(BookingError::Conflict);
        }

        let mut id = (self.next_id)();
        while rows.contains_key(&id) {
            id = (self.next_id)();
        }
        rows.insert(id.clone(), reservation.into_reservation(id.clone()));

        Ok(id)
    }

    async fn get(&self, id: &str) -> BookingResult<Reservation> {
        self.rows
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    async fn list(&self, room_id: &str) -> BookingResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .rows
            .read()
            .await
            .values()
            .filter(|reservation| reservation.room_id == room_id)
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(BookingError::NotFoundForRoom(room_id.to_string()));
        }

        found.sort_by_key(|reservation| reservation.start_time);
        Ok(found)
    }

    async fn update(&self, id: &str, patch: ReservationPatch) -> BookingResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut rows = self.rows.write().await;
        let stored = rows
            .get_mut(id)
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
        patch.apply_to(stored);

        Ok(())
    }

    async fn delete(&self, id: &str) -> BookingResult<()> {
        self.rows
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }
}
