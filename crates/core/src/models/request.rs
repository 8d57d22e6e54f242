use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::datetime;
use crate::models::reservation::{NewReservation, Reservation, ReservationPatch};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub room_id: String,
    #[serde(default, with = "datetime::optional")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "datetime::optional")]
    pub end_time: Option<DateTime<Utc>>,
}

// `"room_id": null` reads as missing, so validation reports it
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl CreateReservationRequest {
    /// Checks the request and turns it into a create intent.
    ///
    /// Overlap with existing reservations is not checked here; that needs the store.
    pub fn validate(&self) -> BookingResult<NewReservation> {
        if self.room_id.is_empty() {
            return Err(BookingError::validation("room_id is required"));
        }

        let start_time = self
            .start_time
            .ok_or_else(|| BookingError::validation("invalid start_time"))?;
        let end_time = self
            .end_time
            .ok_or_else(|| BookingError::validation("invalid end_time"))?;

        if start_time >= end_time {
            return Err(BookingError::validation(
                "start_time must be before end_time",
            ));
        }

        Ok(NewReservation {
            room_id: self.room_id.clone(),
            start_time,
            end_time,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default, with = "datetime::optional")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "datetime::optional")]
    pub end_time: Option<DateTime<Utc>>,
}

impl UpdateReservationRequest {
    /// Turns the request into a sparse patch. An empty `room_id` counts as absent.
    ///
    /// The patched window is not checked for ordering or overlap.
    pub fn validate(&self) -> BookingResult<ReservationPatch> {
        let patch = ReservationPatch {
            room_id: self.room_id.clone().filter(|room_id| !room_id.is_empty()),
            start_time: self.start_time,
            end_time: self.end_time,
        };

        if patch.is_empty() {
            return Err(BookingError::validation("no fields to update"));
        }

        Ok(patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: String,
    pub room_id: String,
    #[serde(with = "datetime::required")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "datetime::required")]
    pub end_time: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            room_id: reservation.room_id,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationResponse {
    pub id: String,
}
