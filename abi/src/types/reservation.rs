use chrono::NaiveDate;
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::{
    validate_guest, validate_range, Error, GuestId, ReservationId, ReservationWindow, Validator,
};

/// A room booked for the half-open stay `[start, end)`.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// assigned by storage, `None` until persisted
    pub id: Option<ReservationId>,
    pub room_number: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub guest_id: Option<GuestId>,
}

impl Reservation {
    pub fn new(
        room_number: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        guest_id: GuestId,
    ) -> Self {
        Self {
            id: None,
            room_number: room_number.into(),
            start,
            end,
            guest_id: Some(guest_id),
        }
    }

    pub fn validate_dates(&self, today: NaiveDate) -> Result<(), Error> {
        validate_range(self.start, self.end, today)
    }

    pub fn validate_guest(&self) -> Result<(), Error> {
        validate_guest(self.guest_id)
    }

    /// strict overlap: back-to-back stays (`start == other.end`) do not overlap
    pub fn overlaps(&self, room_number: &str, start: NaiveDate, end: NaiveDate) -> bool {
        self.room_number == room_number && self.end > start && self.start < end
    }

    /// overwrite every mutable field from `details`, keeping our identity
    pub fn apply(&mut self, details: Reservation) {
        self.room_number = details.room_number;
        self.start = details.start;
        self.end = details.end;
        self.guest_id = details.guest_id;
    }

    pub fn window(&self) -> ReservationWindow {
        ReservationWindow::new(self.room_number.clone(), self.start, self.end)
    }
}

// Identity equality: only persisted reservations with the same id are the same entity.
// Two unsaved reservations never compare equal, not even to themselves.
impl PartialEq for Reservation {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Validator for Reservation {
    fn validate(&self) -> Result<(), Error> {
        if self.room_number.trim().is_empty() {
            return Err(Error::InvalidRoomNumber);
        }
        Ok(())
    }
}

impl FromRow<'_, PgRow> for Reservation {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: Some(row.try_get("id")?),
            room_number: row.try_get("room_number")?,
            start: row.try_get("start_date")?,
            end: row.try_get("end_date")?,
            guest_id: row.try_get("guest_id")?,
        })
    }
}
