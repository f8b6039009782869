use std::sync::Arc;

use abi::{Config, Reservation, ReservationDto, ReservationId};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use reservation::{ReservationManager, Rsvp};
use serde::Serialize;

use crate::{
    error::{ApiError, AtPath},
    RsvpService,
};

type SharedService = Arc<RsvpService>;
type BodyResult = Result<Json<ReservationDto>, JsonRejection>;
type IdResult = Result<Path<ReservationId>, PathRejection>;

impl RsvpService {
    pub fn new(manager: ReservationManager) -> Self {
        Self { manager }
    }

    pub async fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        Ok(Self {
            manager: ReservationManager::from_config(&config.db).await?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub(crate) fn routes() -> Router<SharedService> {
    Router::new()
        .route("/health", get(health))
        .route("/reservations", get(list).post(reserve))
        .route(
            "/reservations/:id",
            get(get_reservation).put(update).delete(delete),
        )
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// make a reservation
async fn reserve(
    State(svc): State<SharedService>,
    OriginalUri(uri): OriginalUri,
    payload: BodyResult,
) -> Result<(StatusCode, Json<ReservationDto>), ApiError> {
    let rsvp = parse_body(payload).at(&uri)?;
    let rsvp = svc.manager.reserve(rsvp).await.at(&uri)?;
    Ok((StatusCode::CREATED, Json(rsvp.into())))
}

/// get a reservation by id
async fn get_reservation(
    State(svc): State<SharedService>,
    OriginalUri(uri): OriginalUri,
    id: IdResult,
) -> Result<Json<ReservationDto>, ApiError> {
    let id = parse_id(id).at(&uri)?;
    let rsvp = svc.manager.get(id).await.at(&uri)?;
    Ok(Json(rsvp.into()))
}

/// list all reservations
async fn list(
    State(svc): State<SharedService>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<ReservationDto>>, ApiError> {
    let rsvps = svc.manager.list().await.at(&uri)?;
    Ok(Json(ReservationDto::from_list(rsvps)))
}

/// replace room, dates and guest of a reservation
async fn update(
    State(svc): State<SharedService>,
    OriginalUri(uri): OriginalUri,
    id: IdResult,
    payload: BodyResult,
) -> Result<Json<ReservationDto>, ApiError> {
    let id = parse_id(id).at(&uri)?;
    let details = match parse_body(payload) {
        Ok(details) => details,
        Err(e) => {
            // an unknown id is reported as such, whatever the payload
            svc.manager.get(id).await.at(&uri)?;
            return Err(ApiError::new(e, &uri));
        }
    };
    let rsvp = svc.manager.update(id, details).await.at(&uri)?;
    Ok(Json(rsvp.into()))
}

/// delete a reservation by id
async fn delete(
    State(svc): State<SharedService>,
    OriginalUri(uri): OriginalUri,
    id: IdResult,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(id).at(&uri)?;
    svc.manager.delete(id).await.at(&uri)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_body(payload: BodyResult) -> Result<Reservation, abi::Error> {
    let Json(dto) = payload.map_err(|e| abi::Error::InvalidPayload(e.body_text()))?;
    dto.try_into()
}

fn parse_id(id: IdResult) -> Result<ReservationId, abi::Error> {
    id.map(|Path(id)| id)
        .map_err(|e| abi::Error::InvalidReservationId(e.body_text()))
}
