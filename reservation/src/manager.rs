use std::sync::Arc;

use abi::{DbConfig, Error, ReservationId, Validator};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{MemoryStore, PgStore, ReservationManager, ReservationStore, Rsvp};

#[async_trait]
impl Rsvp for ReservationManager {
    async fn reserve(&self, rsvp: abi::Reservation) -> Result<abi::Reservation, Error> {
        rsvp.validate()?;
        self.admit(&rsvp, None)
            .await
            .map_err(|e| rejected("reserve", &rsvp, e))?;

        // the engine checks then inserts without isolation; postgres' exclusion constraint
        // catches a writer that loses the race
        let rsvp = self.store.insert(rsvp).await?;
        info!(id = ?rsvp.id, room = %rsvp.room_number, start = %rsvp.start, end = %rsvp.end, "reservation created");
        Ok(rsvp)
    }

    async fn update(
        &self,
        id: ReservationId,
        details: abi::Reservation,
    ) -> Result<abi::Reservation, Error> {
        let mut rsvp = self.get(id).await?;
        rsvp.apply(details);

        rsvp.validate()?;
        self.admit(&rsvp, Some(id))
            .await
            .map_err(|e| rejected("update", &rsvp, e))?;

        // a writer that loses the race on update gets the update wording too
        let rsvp = self
            .store
            .update(id, rsvp)
            .await
            .map_err(|e| match e {
                Error::ConflictReservation(info) => Error::ConflictReservation(info.rebooked()),
                e => e,
            })?;
        info!(id, room = %rsvp.room_number, start = %rsvp.start, end = %rsvp.end, "reservation updated");
        Ok(rsvp)
    }

    async fn delete(&self, id: ReservationId) -> Result<(), Error> {
        self.get(id).await?;
        self.store.delete(id).await?;
        info!(id, "reservation deleted");
        Ok(())
    }

    async fn get(&self, id: ReservationId) -> Result<abi::Reservation, Error> {
        debug!(id, "loading reservation");
        self.store.find_by_id(id).await?.ok_or(Error::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<abi::Reservation>, Error> {
        let rsvps = self.store.find_all().await?;
        debug!(count = rsvps.len(), "listed reservations");
        Ok(rsvps)
    }

    async fn check_availability(
        &self,
        room_number: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> Result<(), Error> {
        let overlapping = self
            .store
            .find_overlapping(room_number, start, end)
            .await?;
        abi::check_conflicts(
            abi::ReservationWindow::new(room_number, start, end),
            &overlapping,
            exclude,
        )
    }
}

impl ReservationManager {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, Error> {
        let store = PgStore::from_config(config).await?;
        Ok(Self::new(Arc::new(store)))
    }

    /// dates, then availability, then guest: the first failing rule wins
    async fn admit(
        &self,
        rsvp: &abi::Reservation,
        exclude: Option<ReservationId>,
    ) -> Result<(), Error> {
        rsvp.validate_dates(abi::today())?;
        self.check_availability(&rsvp.room_number, rsvp.start, rsvp.end, exclude)
            .await?;
        rsvp.validate_guest()
    }
}

fn rejected(op: &str, rsvp: &abi::Reservation, e: Error) -> Error {
    if e.is_validation() {
        warn!(op, room = %rsvp.room_number, start = %rsvp.start, end = %rsvp.end, reason = %e, "reservation rejected");
    }
    e
}
