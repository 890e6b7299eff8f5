// Location update DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::ActiveAlert;

/// Body of `POST /api/location`.
///
/// `timestamp == 0` is the disconnect sentinel: the backend drops the
/// session instead of updating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    pub session_id: String,
    /// `[lat, lon]` in degrees.
    pub position: [f64; 2],
    /// Milliseconds since the Unix epoch, or 0 to disconnect.
    pub timestamp: i64,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<ActiveAlert>,
}

impl LocationUpdate {
    /// The disconnect sentinel for a session.
    pub fn disconnect(session_id: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            position: [0.0, 0.0],
            timestamp: 0,
            joined_at,
            alert: None,
        }
    }

    pub fn is_disconnect(&self) -> bool {
        self.timestamp == 0
    }
}

/// Response of `POST /api/location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAck {
    #[serde(default)]
    pub success: bool,
    /// Present when the backend piggybacks the live connection count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_connections: Option<u32>,
}

/// Response of `GET /api/activeConnections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveConnections {
    pub active: u32,
}
