mod manager;
mod store;

use std::sync::Arc;

use abi::{Error, ReservationId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub use store::{MemoryStore, PgStore, ReservationStore};

pub struct ReservationManager {
    store: Arc<dyn ReservationStore>,
}

#[async_trait]
pub trait Rsvp {
    /// make a reservation, rejecting bad dates, double bookings and unknown guests
    async fn reserve(&self, rsvp: abi::Reservation) -> Result<abi::Reservation, Error>;
    /// overwrite room, dates and guest of an existing reservation, re-checking every rule
    async fn update(
        &self,
        id: ReservationId,
        details: abi::Reservation,
    ) -> Result<abi::Reservation, Error>;
    /// delete a reservation
    async fn delete(&self, id: ReservationId) -> Result<(), Error>;
    /// get a reservation by id
    async fn get(&self, id: ReservationId) -> Result<abi::Reservation, Error>;
    /// list every reservation
    async fn list(&self) -> Result<Vec<abi::Reservation>, Error>;
    /// fail if another reservation holds `room_number` during `[start, end)`
    async fn check_availability(
        &self,
        room_number: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> Result<(), Error>;
}
