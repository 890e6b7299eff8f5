// Console rendering demo: runs the tracker against a backend and prints
// each snapshot instead of drawing a map. Declares a water alert a few
// seconds in and clears it again before exiting.
//
// Usage: cargo run --example console_map
// Set PULSEMAP_API_URL to point at a backend.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use pulsemap_client::MapApiClient;
use pulsemap_contracts::AlertKind;
use pulsemap_core::{MapStyle, SessionMarkerKind};
use pulsemap_tracker::{SimulatedGeoSource, Tracker, TrackerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("pulsemap_tracker=info")
        .init();

    let config = TrackerConfig::from_env().with_dummy_count(5);
    let client = MapApiClient::with_base_url(&config.base_url);
    let geo = Arc::new(SimulatedGeoSource::new([40.7128, -74.0060], 0.0005));

    let tracker = Arc::new(Tracker::new(config, client, geo, MapStyle::default()));
    tracker.enable_tracking().await;

    let mut snapshots = tracker.subscribe();
    let runner = tracker.clone();
    let run_handle = tokio::spawn(async move { runner.run().await });

    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let model = snapshots.borrow_and_update().clone();
            let icons = model
                .markers
                .iter()
                .filter(|m| matches!(m.kind, SessionMarkerKind::Icon { .. }))
                .count();
            println!(
                "sessions={} (alerted={}) heat_points={} alert_markers={} connections={:?}",
                model.markers.len(),
                icons,
                model.heat.len(),
                model.alerts.len(),
                model.active_connections,
            );
            if let Some(error) = &model.location_error {
                println!("  location error: {error}");
            }
        }
    });

    tokio::time::sleep(Duration::from_secs(5)).await;
    println!("-- requesting water alert --");
    tracker.request_alert(AlertKind::Water).await;

    tokio::time::sleep(Duration::from_secs(5)).await;
    println!("-- clearing alert --");
    tracker.clear_alert().await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    tracker.shutdown();
    run_handle.await??;
    printer.abort();

    Ok(())
}
