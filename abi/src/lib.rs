mod config;
mod error;
mod types;

use chrono::{Local, NaiveDate};

pub use config::*;
pub use error::*;
pub use types::*;

pub type ReservationId = i64;
pub type GuestId = i64;

pub trait Validator {
    fn validate(&self) -> Result<(), Error>;
}

/// the calendar date used for the "no past check-in" rule
pub fn today() -> NaiveDate {
    Local::now().naive_local().date()
}
