use std::path::Path;

use abi::Config;
use anyhow::{anyhow, Result};
use reservation_service::start_server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // we would first try RESERVATION_CONFIG env var,
    // then try "./reservation.yml", then try "~/.config/reservation.yml"
    // then try "/etc/reservation.yml"
    let filename = match std::env::var("RESERVATION_CONFIG") {
        Ok(filename) => filename,
        Err(_) => find_config_file()?,
    };
    let config = Config::load(&filename)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(config.log.level))
        .init();
    info!("config file: {}", filename);

    start_server(&config).await
}

fn find_config_file() -> Result<String> {
    let home = shellexpand::tilde("~/.config/reservation.yml");
    let candidates = [
        Path::new("./reservation.yml"),
        Path::new(home.as_ref()),
        Path::new("/etc/reservation.yml"),
    ];

    candidates
        .iter()
        .find(|p| p.exists())
        .map(|p| p.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("no config file found"))
}
