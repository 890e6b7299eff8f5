use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsemap_client::MapApiClient;
use pulsemap_core::MapStyle;
use pulsemap_tracker::{SimulatedGeoSource, Tracker, TrackerConfig};

// Default map origin when no real geo source is wired in.
const DEFAULT_ORIGIN: [f64; 2] = [40.7128, -74.0060];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulsemap_tracker=debug,pulsemap_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("pulsemap-tracker starting...");

    let config = TrackerConfig::from_env();
    let client = MapApiClient::with_base_url(&config.base_url);
    let geo = Arc::new(SimulatedGeoSource::new(DEFAULT_ORIGIN, 0.0005));

    let tracker = Arc::new(Tracker::new(config, client, geo, MapStyle::default()));
    tracker.enable_tracking().await;

    let runner = tracker.clone();
    let run_handle = tokio::spawn(async move { runner.run().await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("ctrl-c received, shutting down");
    tracker.shutdown();
    run_handle.await??;

    tracing::info!("tracker shutdown complete");
    Ok(())
}
