use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted booking of a room over the half-open window `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Reservation {
    /// Returns true when both reservations book the same room over intersecting windows.
    ///
    /// Windows that only touch (`self.end_time == other.start_time`) do not overlap, so
    /// back-to-back bookings are allowed.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        self.room_id == other.room_id
            && windows_overlap(
                self.start_time,
                self.end_time,
                other.start_time,
                other.end_time,
            )
    }
}

/// Half-open interval intersection: `[a_start, a_end)` and `[b_start, b_end)`.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// A validated create intent. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl NewReservation {
    pub fn overlaps(&self, existing: &Reservation) -> bool {
        self.room_id == existing.room_id
            && windows_overlap(
                self.start_time,
                self.end_time,
                existing.start_time,
                existing.end_time,
            )
    }

    pub fn into_reservation(self, id: String) -> Reservation {
        Reservation {
            id,
            room_id: self.room_id,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// A sparse update. Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationPatch {
    pub room_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ReservationPatch {
    pub fn is_empty(&self) -> bool {
        self.room_id.is_none() && self.start_time.is_none() && self.end_time.is_none()
    }

    /// Applies the present fields to `reservation` in place.
    pub fn apply_to(&self, reservation: &mut Reservation) {
        if let Some(room_id) = &self.room_id {
            reservation.room_id = room_id.clone();
        }
        if let Some(start_time) = self.start_time {
            reservation.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            reservation.end_time = end_time;
        }
    }
}
