mod error;
mod service;
#[cfg(test)]
pub mod test_utils;

use std::sync::Arc;

use abi::Config;
use axum::Router;
use reservation::ReservationManager;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, ErrorBody};

pub struct RsvpService {
    manager: ReservationManager,
}

/// Build the HTTP router around an already constructed service.
pub fn router(svc: RsvpService) -> Router {
    service::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(svc))
}

pub async fn start_server(config: &Config) -> Result<(), anyhow::Error> {
    let addr = config.server.addr();
    let svc = RsvpService::from_config(config).await?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at {}", addr);
    axum::serve(listener, router(svc)).await?;

    Ok(())
}
