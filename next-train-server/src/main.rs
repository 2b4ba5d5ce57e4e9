use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use next_train_server::cache::CachedFeed;
use next_train_server::config::ServerConfig;
use next_train_server::domain::Network;
use next_train_server::septa::{ArrivalsSource, MockSeptaClient, SeptaClient};
use next_train_server::service::StationLookup;
use next_train_server::stations::{NetworkSchema, load_network};
use next_train_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Fail fast on missing or empty station files
    let load = |network| {
        load_network(
            config.station_file(network),
            &NetworkSchema::for_network(network),
        )
    };
    let regional_rail = load(Network::RegionalRail)?;
    let metro = load(Network::Metro)?;

    let source = match &config.mock_arrivals_dir {
        Some(dir) => {
            let mock = MockSeptaClient::new(dir)?;
            warn!(
                dir = %dir.display(),
                stations = mock.available_stations().len(),
                "using mock arrivals"
            );
            ArrivalsSource::Mock(mock)
        }
        None => ArrivalsSource::Live(SeptaClient::new(config.septa.clone())?),
    };
    let feed = CachedFeed::new(source, &config.cache);
    if !feed.is_enabled() {
        info!("arrivals cache disabled");
    }

    let state = AppState::new(
        StationLookup::new(
            Network::RegionalRail,
            Arc::new(regional_rail),
            config.max_distance_miles,
        ),
        StationLookup::new(Network::Metro, Arc::new(metro), config.max_distance_miles),
        Arc::new(feed),
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "next-train server listening");
    info!("  GET       /health");
    info!("  GET|POST  /stations/{{network}}/nearest");
    info!("  GET|POST  /stations/{{network}}/next-train");

    axum::serve(listener, app).await?;
    Ok(())
}
