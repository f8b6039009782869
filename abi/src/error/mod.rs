use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

mod conflict;
pub use conflict::{ReservationConflict, ReservationConflictInfo, ReservationWindow};

use crate::{GuestId, ReservationId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("database error: {0}")]
    DbError(sqlx::Error),

    #[error("Failed to read configuration file")]
    ConfigReadError,

    #[error("Failed to parse configuration file")]
    ConfigParseError,

    #[error("Start date and end date are required.")]
    MissingDates,

    #[error("The end date of the reservation must be after the start date.")]
    InvalidDateRange,

    #[error("Reservations cannot be made for past dates.")]
    PastStartDate,

    #[error("{0}")]
    ConflictReservation(ReservationConflictInfo),

    #[error("The guest id is required and must be valid.")]
    InvalidGuestId(Option<GuestId>),

    #[error("The room number is required.")]
    InvalidRoomNumber,

    #[error("Invalid reservation id: {0}")]
    InvalidReservationId(String),

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("Reservation with id {0} not found.")]
    NotFound(ReservationId),

    #[error("unknown error")]
    Unknown,
}

impl Error {
    /// business and request validation failures, i.e. caller-input problems
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingDates
                | Self::InvalidDateRange
                | Self::PastStartDate
                | Self::ConflictReservation(_)
                | Self::InvalidGuestId(_)
                | Self::InvalidRoomNumber
                | Self::InvalidReservationId(_)
                | Self::InvalidPayload(_)
        )
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // sqlx errors carry no comparable state
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::ConfigReadError, Self::ConfigReadError) => true,
            (Self::ConfigParseError, Self::ConfigParseError) => true,
            (Self::MissingDates, Self::MissingDates) => true,
            (Self::InvalidDateRange, Self::InvalidDateRange) => true,
            (Self::PastStartDate, Self::PastStartDate) => true,
            (Self::ConflictReservation(v1), Self::ConflictReservation(v2)) => v1 == v2,
            (Self::InvalidGuestId(v1), Self::InvalidGuestId(v2)) => v1 == v2,
            (Self::InvalidRoomNumber, Self::InvalidRoomNumber) => true,
            (Self::InvalidReservationId(v1), Self::InvalidReservationId(v2)) => v1 == v2,
            (Self::InvalidPayload(v1), Self::InvalidPayload(v2)) => v1 == v2,
            (Self::NotFound(v1), Self::NotFound(v2)) => v1 == v2,
            (Self::Unknown, Self::Unknown) => true,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(e) => {
                let err: &PgDatabaseError = e.downcast_ref();
                match (err.code(), err.schema(), err.table()) {
                    ("23P01", Some("rsvp"), Some("reservations")) => match err.detail() {
                        Some(detail) => Error::ConflictReservation(detail.into()),
                        None => Error::ConflictReservation(ReservationConflictInfo::Unparsed(
                            err.message().to_string(),
                        )),
                    },
                    _ => Error::DbError(sqlx::Error::Database(e)),
                }
            }
            _ => Error::DbError(e),
        }
    }
}
