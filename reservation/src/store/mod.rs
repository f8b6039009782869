mod memory;
mod postgres;

use abi::{Error, Reservation, ReservationId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Where reservations live. Implementations only persist and query; every business rule is
/// decided by the manager.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Reservation>, Error>;
    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, Error>;
    /// persist a new reservation and return it with its assigned id
    async fn insert(&self, rsvp: Reservation) -> Result<Reservation, Error>;
    async fn update(&self, id: ReservationId, rsvp: Reservation) -> Result<Reservation, Error>;
    async fn delete(&self, id: ReservationId) -> Result<(), Error>;
    /// reservations of `room_number` with `existing.end > start AND existing.start < end`
    async fn find_overlapping(
        &self,
        room_number: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, Error>;
}
