use std::sync::{Arc, Mutex};
use std::time::Duration;

use ott_finder::client::MovieClient;
use ott_finder::config::{Config, Interface};
use ott_finder::{tui, web};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    match config.interface {
        Interface::Web => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init(),
        // The terminal belongs to the UI.
        Interface::Tui => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init()
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::new()?;
    init_tracing(&config)?;

    info!("Starting OTT Finder ({:?})", config.interface);
    let client = MovieClient::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!("Movie API at {}", client.base_url());

    match config.interface {
        Interface::Web => web::run_server(&config, Arc::new(client)).await,
        Interface::Tui => tui::run(&client, &config.region).await,
    }
}
