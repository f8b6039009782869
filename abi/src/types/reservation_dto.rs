use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, GuestId, Reservation, ReservationId};

/// JSON shape of a reservation. Every field is optional on the wire so that an
/// incomplete payload is reported through the normal validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    #[serde(default)]
    pub id: Option<ReservationId>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub guest_id: Option<GuestId>,
}

impl From<Reservation> for ReservationDto {
    fn from(rsvp: Reservation) -> Self {
        Self {
            id: rsvp.id,
            room_number: Some(rsvp.room_number),
            start_date: Some(rsvp.start),
            end_date: Some(rsvp.end),
            guest_id: rsvp.guest_id,
        }
    }
}

// the payload id is dropped: identity comes from the url or from storage
impl TryFrom<ReservationDto> for Reservation {
    type Error = Error;

    fn try_from(dto: ReservationDto) -> Result<Self, Self::Error> {
        let (start, end) = match (dto.start_date, dto.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(Error::MissingDates),
        };
        let room_number = match dto.room_number {
            Some(room) if !room.trim().is_empty() => room,
            _ => return Err(Error::InvalidRoomNumber),
        };

        Ok(Self {
            id: None,
            room_number,
            start,
            end,
            guest_id: dto.guest_id,
        })
    }
}

impl ReservationDto {
    pub fn from_list(reservations: Vec<Reservation>) -> Vec<Self> {
        reservations.into_iter().map(Self::from).collect()
    }
}
