use chrono::NaiveDate;

use crate::{
    Error, GuestId, ReservationConflict, ReservationConflictInfo, ReservationId, ReservationWindow,
};

mod reservation;
mod reservation_dto;

pub use reservation::Reservation;
pub use reservation_dto::ReservationDto;

/// check-out must come strictly after check-in, and check-in may not be in the past
pub fn validate_range(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<(), Error> {
    if end <= start {
        return Err(Error::InvalidDateRange);
    }
    if start < today {
        return Err(Error::PastStartDate);
    }
    Ok(())
}

// no guest registry to consult, a positive id is all we can check
pub fn validate_guest(guest_id: Option<GuestId>) -> Result<(), Error> {
    match guest_id {
        Some(id) if id > 0 => Ok(()),
        other => Err(Error::InvalidGuestId(other)),
    }
}

/// Decide whether the `candidate` stay may take its room given the reservations storage reported
/// as overlapping. On update, `exclude` is the id being updated: a reservation never conflicts
/// with itself.
pub fn check_conflicts(
    candidate: ReservationWindow,
    overlapping: &[Reservation],
    exclude: Option<ReservationId>,
) -> Result<(), Error> {
    let blocker = overlapping
        .iter()
        .find(|existing| exclude.is_none() || existing.id != exclude);

    let Some(existing) = blocker else {
        return Ok(());
    };

    let info: ReservationConflictInfo = ReservationConflict {
        new: candidate,
        old: existing.window(),
    }
    .into();
    match exclude {
        Some(_) => Err(Error::ConflictReservation(info.rebooked())),
        None => Err(Error::ConflictReservation(info)),
    }
}
