// Tracker runtime
//
// One cooperative scheduler replaces the original page's overlapping
// browser timers: four spawned loops (position push, session poll, alert
// poll, marker sweep) share a watch-channel shutdown signal, and each tick
// awaits its own work, so a slow response never races a newer tick of the
// same loop. Errors inside a tick are logged and swallowed; the next tick
// is the retry.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pulsemap_client::MapApiClient;
use pulsemap_contracts::{ActiveAlert, AlertKind, AlertMarker, LocationUpdate, Session};
use pulsemap_core::{build_render_model, reconcile_sessions, MapStyle, MarkerBoard, RenderModel};

use crate::config::TrackerConfig;
use crate::geo::GeoSource;

/// Lifetime of a self-declared status alert, mirroring the marker lifetime.
const ACTIVE_ALERT_TTL_MS: i64 = 30_000;

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Mutable state shared between the loops and the user-facing operations.
#[derive(Debug, Default)]
struct TrackerState {
    tracking: bool,
    active_alert: Option<ActiveAlert>,
    location_error: Option<String>,
    last_position: Option<[f64; 2]>,
    sessions: Vec<Session>,
    board: MarkerBoard,
    active_connections: Option<u32>,
}

/// Everything a loop needs, shared behind one Arc.
struct Shared {
    state: Mutex<TrackerState>,
    client: MapApiClient,
    geo: Arc<dyn GeoSource>,
    config: TrackerConfig,
    style: MapStyle,
    session_id: String,
    joined_at: DateTime<Utc>,
    render_tx: watch::Sender<RenderModel>,
}

impl Shared {
    /// Rebuild the render model from current state and publish it.
    async fn publish(&self) {
        let state = self.state.lock().await;
        let model = build_render_model(
            &state.sessions,
            &state.board,
            &self.style,
            &self.session_id,
            now_ms(),
            state.active_connections,
            state.location_error.clone(),
        );
        self.render_tx.send_replace(model);
    }
}

/// The local participant's tracker: owns the session identity, drives the
/// polling loops, and exposes the user-facing operations.
pub struct Tracker {
    shared: Arc<Shared>,
    render_rx: watch::Receiver<RenderModel>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Tracker {
    pub fn new(
        config: TrackerConfig,
        client: MapApiClient,
        geo: Arc<dyn GeoSource>,
        style: MapStyle,
    ) -> Self {
        let session_id = Uuid::now_v7().to_string();
        let joined_at = Utc::now();
        let (render_tx, render_rx) = watch::channel(RenderModel::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(session_id = %session_id, "tracker session created");

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(TrackerState::default()),
                client,
                geo,
                config,
                style,
                session_id,
                joined_at,
                render_tx,
            }),
            render_rx,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// The page-lifetime session id of the local participant.
    pub fn session_id(&self) -> &str {
        &self.shared.session_id
    }

    /// Receiver for render snapshots; the drawing layer watches this.
    pub fn subscribe(&self) -> watch::Receiver<RenderModel> {
        self.render_rx.clone()
    }

    /// Run the loops until shutdown, then send a best-effort disconnect.
    pub async fn run(&self) -> Result<()> {
        info!(
            base_url = %self.shared.client.base_url(),
            dummy_count = self.shared.config.dummy_count,
            "starting tracker loops"
        );

        // One-shot fix up front so the map has a position before the first
        // tracked push.
        initial_fix(&self.shared).await;

        let position_handle =
            spawn_position_loop(self.shared.clone(), self.shutdown_rx.clone());
        let session_handle = spawn_session_loop(self.shared.clone(), self.shutdown_rx.clone());
        let alerts_handle = spawn_alerts_loop(self.shared.clone(), self.shutdown_rx.clone());
        let sweep_handle = spawn_sweep_loop(self.shared.clone(), self.shutdown_rx.clone());

        let mut shutdown_rx = self.shutdown_rx.clone();
        shutdown_rx.changed().await.ok();

        info!("shutdown signal received, stopping loops");
        position_handle.abort();
        session_handle.abort();
        alerts_handle.abort();
        sweep_handle.abort();

        // Best-effort: tell the backend we are gone.
        self.disable_tracking().await;

        info!("tracker stopped");
        Ok(())
    }

    /// Signal the loops to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Start pushing position updates.
    pub async fn enable_tracking(&self) {
        let mut state = self.shared.state.lock().await;
        if !state.tracking {
            state.tracking = true;
            info!("tracking enabled");
        }
    }

    /// Stop pushing position updates and notify the backend once.
    ///
    /// The flag swap under the lock guarantees exactly one disconnect
    /// notification however many times this is called.
    pub async fn disable_tracking(&self) {
        {
            let mut state = self.shared.state.lock().await;
            if !state.tracking {
                return;
            }
            state.tracking = false;
        }
        info!("tracking disabled");

        if let Err(e) = self
            .shared
            .client
            .notify_disconnect(&self.shared.session_id, self.shared.joined_at)
            .await
        {
            warn!(error = %e, "disconnect notification failed");
        }
    }

    /// Declare a status alert. Optimistic: local state changes first, the
    /// server call is not a gate and its failure is only logged.
    pub async fn request_alert(&self, kind: AlertKind) {
        let now = now_ms();
        let marker = {
            let mut state = self.shared.state.lock().await;
            state.active_alert = Some(ActiveAlert {
                kind,
                expires_at: now + ACTIVE_ALERT_TTL_MS,
            });

            state.last_position.map(|position| {
                let marker = AlertMarker {
                    id: Uuid::now_v7().to_string(),
                    position,
                    kind,
                    created_at: now,
                    creator_id: self.shared.session_id.clone(),
                };
                state.board.insert(marker.clone());
                marker
            })
        };

        let Some(marker) = marker else {
            // No fix yet: the status alert is set, but there is no position
            // to pin a marker to.
            warn!(%kind, "alert requested before the first fix, marker skipped");
            self.shared.publish().await;
            return;
        };

        info!(%kind, marker_id = %marker.id, "alert requested");

        if let Err(e) = self.shared.client.create_alert(&marker).await {
            warn!(error = %e, "alert creation failed");
        }
        // Refresh the marker list right away instead of waiting for the
        // next poll tick.
        match self.shared.client.fetch_alerts().await {
            Ok(markers) => {
                let mut state = self.shared.state.lock().await;
                state.board.replace(markers, now_ms());
            }
            Err(e) => warn!(error = %e, "alert refresh failed"),
        }

        self.shared.publish().await;
    }

    /// Clear the local status alert and remove our marker from the server.
    pub async fn clear_alert(&self) {
        let own_marker = {
            let mut state = self.shared.state.lock().await;
            state.active_alert = None;
            let id = state
                .board
                .find_by_creator(&self.shared.session_id, now_ms())
                .map(|m| m.id.clone());
            if let Some(id) = &id {
                state.board.remove(id);
            }
            id
        };

        info!("alert cleared");

        if let Some(id) = own_marker {
            if let Err(e) = self.shared.client.delete_alert(&id).await {
                warn!(error = %e, marker_id = %id, "alert deletion failed");
            }
        }

        self.shared.publish().await;
    }
}

/// One-shot geolocation at startup; failures become the inline error string.
async fn initial_fix(shared: &Shared) {
    match shared.geo.current_fix().await {
        Ok(fix) => {
            let mut state = shared.state.lock().await;
            state.last_position = Some(fix.position);
            state.location_error = None;
            debug!(lat = fix.position[0], lon = fix.position[1], "initial fix acquired");
        }
        Err(e) => {
            warn!(error = %e, "initial fix failed");
            shared.state.lock().await.location_error = Some(e.to_string());
        }
    }
    shared.publish().await;
}

fn spawn_position_loop(shared: Arc<Shared>, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(shared.config.position_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("position loop shutting down");
                    break;
                }
                _ = ticker.tick() => position_tick(&shared).await,
            }
        }
    })
}

fn spawn_session_loop(shared: Arc<Shared>, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(shared.config.session_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("session loop shutting down");
                    break;
                }
                _ = ticker.tick() => session_tick(&shared).await,
            }
        }
    })
}

fn spawn_alerts_loop(shared: Arc<Shared>, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(shared.config.alert_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("alerts loop shutting down");
                    break;
                }
                _ = ticker.tick() => alerts_tick(&shared).await,
            }
        }
    })
}

fn spawn_sweep_loop(shared: Arc<Shared>, mut shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(shared.config.sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("sweep loop shutting down");
                    break;
                }
                _ = ticker.tick() => sweep_tick(&shared).await,
            }
        }
    })
}

/// Read the geo source and push the position, when tracking is on.
async fn position_tick(shared: &Shared) {
    let alert = {
        let state = shared.state.lock().await;
        if !state.tracking {
            return;
        }
        state.active_alert
    };

    let fix = match shared.geo.current_fix().await {
        Ok(fix) => fix,
        Err(e) => {
            warn!(error = %e, "geolocation failed");
            shared.state.lock().await.location_error = Some(e.to_string());
            shared.publish().await;
            return;
        }
    };

    {
        let mut state = shared.state.lock().await;
        state.last_position = Some(fix.position);
        state.location_error = None;
    }

    let update = LocationUpdate {
        session_id: shared.session_id.clone(),
        position: fix.position,
        timestamp: now_ms(),
        joined_at: shared.joined_at,
        alert,
    };

    match shared.client.push_location(&update).await {
        Ok(ack) => {
            if let Some(active) = ack.active_connections {
                shared.state.lock().await.active_connections = Some(active);
            }
        }
        // Swallowed: the next tick pushes again.
        Err(e) => warn!(error = %e, "position push failed"),
    }
}

/// Poll the session list and reconcile it with local state.
async fn session_tick(shared: &Shared) {
    let polled = match shared
        .client
        .fetch_sessions(shared.config.dummy_count, &shared.session_id)
        .await
    {
        Ok(polled) => polled,
        Err(e) => {
            // Includes non-array bodies; skip the tick.
            warn!(error = %e, "session poll failed");
            return;
        }
    };

    {
        let mut state = shared.state.lock().await;
        let local_alert = state.active_alert;
        state.sessions = reconcile_sessions(polled, &shared.session_id, local_alert);
        debug!(sessions = state.sessions.len(), "session list reconciled");
    }
    shared.publish().await;
}

/// Poll the alert-marker list.
async fn alerts_tick(shared: &Shared) {
    match shared.client.fetch_alerts().await {
        Ok(markers) => {
            let mut state = shared.state.lock().await;
            state.board.replace(markers, now_ms());
        }
        Err(e) => {
            warn!(error = %e, "alert poll failed");
            return;
        }
    }
    shared.publish().await;
}

/// Locally expire markers; runs independently of the server's lifetime.
async fn sweep_tick(shared: &Shared) {
    {
        let mut state = shared.state.lock().await;
        state.board.sweep(now_ms());
    }
    // Publish every sweep so marker countdowns stay fresh.
    shared.publish().await;
}
