use async_trait::async_trait;
use roombook_core::{
    errors::{BookingError, BookingResult},
    models::reservation::{NewReservation, Reservation, ReservationPatch},
    repository::ReservationRepository,
};
use sqlx::{Postgres, QueryBuilder};

use super::{db_error, random_ids, IdGenerator};
use crate::{config::DbConfig, create_pool, models::DbReservation, DbPool};

/// PostgreSQL-backed reservation store.
///
/// Creates for the same room are serialised by a transaction-scoped advisory lock keyed
/// on the room id. The overlap probe runs after the lock is held, and under READ
/// COMMITTED it sees every row committed by the previous holder, so two overlapping
/// creates can never both insert.
#[derive(Clone)]
pub struct PgReservationRepository {
    pool: DbPool,
    next_id: IdGenerator,
}

impl PgReservationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            next_id: random_ids(),
        }
    }

    pub fn with_id_generator(mut self, next_id: IdGenerator) -> Self {
        self.next_id = next_id;
        self
    }

    pub async fn connect(config: &DbConfig) -> eyre::Result<Self> {
        Ok(Self::new(create_pool(config).await?))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Waits for checked-out connections to return and closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create(&self, reservation: NewReservation) -> BookingResult<String> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&reservation.room_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let overlapping = sqlx::query_scalar::<_, String>(
            r#"
            SELECT id
            FROM reservation
            WHERE room_id = $1
              AND start_time < $3
              AND end_time > $2
            LIMIT 1
            "#,
        )
        .bind(&reservation.room_id)
        .bind(reservation.start_time)
        .bind(reservation.end_time)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        // Returning drops `tx`, which rolls it back and releases the lock
        if overlapping.is_some() {
            return Err(BookingError::Conflict);
        }

        // A taken id inserts nothing and leaves the transaction usable, so draw again
        let id = loop {
            let id = (self.next_id)();
            let inserted = sqlx::query(
                r#"
                INSERT INTO reservation (id, room_id, start_time, end_time)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&id)
            .bind(&reservation.room_id)
            .bind(reservation.start_time)
            .bind(reservation.end_time)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

            if inserted.rows_affected() == 1 {
                break id;
            }
        };

        tx.commit().await.map_err(db_error)?;

        Ok(id)
    }

    async fn get(&self, id: &str) -> BookingResult<Reservation> {
        sqlx::query_as::<_, DbReservation>(
            r#"
            SELECT id, room_id, start_time, end_time
            FROM reservation
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Reservation::from)
        .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    async fn list(&self, room_id: &str) -> BookingResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, DbReservation>(
            r#"
            SELECT id, room_id, start_time, end_time
            FROM reservation
            WHERE room_id = $1
            ORDER BY start_time ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        if rows.is_empty() {
            return Err(BookingError::NotFoundForRoom(room_id.to_string()));
        }

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn update(&self, id: &str, patch: ReservationPatch) -> BookingResult<()> {
        let Some(mut statement) = update_statement(id, &patch) else {
            return Ok(());
        };

        let result = statement
            .build()
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> BookingResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM reservation
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

/// Builds `UPDATE reservation SET ... WHERE id = $n` with one assignment per present
/// field, or `None` when the patch has nothing to write.
pub fn update_statement(
    id: &str,
    patch: &ReservationPatch,
) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE reservation SET ");
    {
        let mut sets = builder.separated(", ");
        if let Some(room_id) = &patch.room_id {
            sets.push("room_id = ").push_bind_unseparated(room_id.clone());
        }
        if let Some(start_time) = patch.start_time {
            sets.push("start_time = ").push_bind_unseparated(start_time);
        }
        if let Some(end_time) = patch.end_time {
            sets.push("end_time = ").push_bind_unseparated(end_time);
        }
    }
    builder.push(" WHERE id = ").push_bind(id.to_string());

    Some(builder)
}
