use std::collections::BTreeMap;

use abi::{Error, Reservation, ReservationId};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::ReservationStore;

/// Process-local store. Unlike postgres it has no exclusion constraint, so two racing writers
/// can still double-book a room.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: ReservationId,
    rows: BTreeMap<ReservationId, Reservation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Reservation>, Error> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, Error> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, mut rsvp: Reservation) -> Result<Reservation, Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        rsvp.id = Some(id);
        inner.rows.insert(id, rsvp.clone());
        Ok(rsvp)
    }

    async fn update(&self, id: ReservationId, mut rsvp: Reservation) -> Result<Reservation, Error> {
        let mut inner = self.inner.write().await;
        let slot = inner.rows.get_mut(&id).ok_or(Error::NotFound(id))?;
        rsvp.id = Some(id);
        *slot = rsvp.clone();
        Ok(rsvp)
    }

    async fn delete(&self, id: ReservationId) -> Result<(), Error> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound(id))
    }

    async fn find_overlapping(
        &self,
        room_number: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .values()
            .filter(|rsvp| rsvp.overlaps(room_number, start, end))
            .cloned()
            .collect())
    }
}
