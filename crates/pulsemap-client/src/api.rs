// Map API client
//
// Typed wrapper over the backend's location/session/alert endpoints. One
// shared reqwest::Client with a request timeout; every method is a single
// round trip with no retry.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::debug;

use pulsemap_contracts::{
    ActiveConnections, AlertMarker, LocationAck, LocationUpdate, Session,
};

use crate::error::{ClientError, Result};

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the map backend's session, location, and alert endpoints.
#[derive(Debug, Clone)]
pub struct MapApiClient {
    client: Client,
    base_url: String,
}

impl MapApiClient {
    /// Create a client against the default local backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (e.g. the production host).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/location`: push the local session's position. The ack may
    /// piggyback the live connection count.
    pub async fn push_location(&self, update: &LocationUpdate) -> Result<LocationAck> {
        let response = self
            .client
            .post(format!("{}/location", self.base_url))
            .json(update)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("location", response.status()));
        }
        Ok(response.json().await?)
    }

    /// One-shot disconnect notification: the 0-timestamp sentinel tells the
    /// backend to drop the session.
    pub async fn notify_disconnect(
        &self,
        session_id: &str,
        joined_at: DateTime<Utc>,
    ) -> Result<()> {
        let update = LocationUpdate::disconnect(session_id, joined_at);
        self.push_location(&update).await?;
        debug!(session_id, "disconnect notified");
        Ok(())
    }

    /// `GET /api/sessions?dummy_count=N&creator_id=ID`.
    ///
    /// A body that is not a JSON array is reported as `UnexpectedBody`; the
    /// polling caller logs it and skips the tick.
    pub async fn fetch_sessions(
        &self,
        dummy_count: u32,
        creator_id: &str,
    ) -> Result<Vec<Session>> {
        let response = self
            .client
            .get(format!("{}/sessions", self.base_url))
            .query(&[
                ("dummy_count", dummy_count.to_string()),
                ("creator_id", creator_id.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("sessions", response.status()));
        }

        let body: serde_json::Value = response.json().await?;
        if !body.is_array() {
            return Err(ClientError::body("sessions", format!("expected array, got {body}")));
        }
        serde_json::from_value(body).map_err(|e| ClientError::body("sessions", e.to_string()))
    }

    /// `POST /api/alert`: drop a new alert marker on the map.
    pub async fn create_alert(&self, marker: &AlertMarker) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/alert", self.base_url))
            .json(marker)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("alert", response.status()));
        }
        Ok(())
    }

    /// `DELETE /api/alert/:id`.
    pub async fn delete_alert(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/alert/{id}", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("alert", response.status()));
        }
        Ok(())
    }

    /// `GET /api/alerts`: the current marker list.
    pub async fn fetch_alerts(&self) -> Result<Vec<AlertMarker>> {
        let response = self
            .client
            .get(format!("{}/alerts", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("alerts", response.status()));
        }
        Ok(response.json().await?)
    }

    /// `GET /api/activeConnections`.
    pub async fn active_connections(&self) -> Result<ActiveConnections> {
        let response = self
            .client
            .get(format!("{}/activeConnections", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("activeConnections", response.status()));
        }
        Ok(response.json().await?)
    }
}

impl Default for MapApiClient {
    fn default() -> Self {
        Self::new()
    }
}
