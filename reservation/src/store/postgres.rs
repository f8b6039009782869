use abi::{DbConfig, Error, Reservation, ReservationId};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use super::ReservationStore;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, Error> {
        let pool = PgPoolOptions::default()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn find_all(&self) -> Result<Vec<Reservation>, Error> {
        let rsvps = sqlx::query_as("SELECT * FROM rsvp.reservations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rsvps)
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, Error> {
        let rsvp = sqlx::query_as("SELECT * FROM rsvp.reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rsvp)
    }

    async fn insert(&self, mut rsvp: Reservation) -> Result<Reservation, Error> {
        let id: ReservationId = sqlx::query(
            r#"
            INSERT INTO rsvp.reservations (room_number, start_date, end_date, guest_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&rsvp.room_number)
        .bind(rsvp.start)
        .bind(rsvp.end)
        .bind(rsvp.guest_id)
        .fetch_one(&self.pool)
        .await?
        .try_get(0)?;

        rsvp.id = Some(id);
        Ok(rsvp)
    }

    async fn update(&self, id: ReservationId, rsvp: Reservation) -> Result<Reservation, Error> {
        let updated: Option<Reservation> = sqlx::query_as(
            r#"
            UPDATE rsvp.reservations
            SET room_number = $1, start_date = $2, end_date = $3, guest_id = $4, updated_at = now()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&rsvp.room_number)
        .bind(rsvp.start)
        .bind(rsvp.end)
        .bind(rsvp.guest_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(Error::NotFound(id))
    }

    async fn delete(&self, id: ReservationId) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM rsvp.reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    async fn find_overlapping(
        &self,
        room_number: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Reservation>, Error> {
        let rsvps = sqlx::query_as(
            r#"
            SELECT * FROM rsvp.reservations
            WHERE room_number = $1 AND end_date > $2 AND start_date < $3
            ORDER BY id
            "#,
        )
        .bind(room_number)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rsvps)
    }
}
