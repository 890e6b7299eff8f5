// Session DTOs for the map backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::ActiveAlert;

/// A tracked map participant, real or server-simulated.
///
/// Identity is `id`. The local participant's id is a UUID generated once
/// per process run; server-simulated ("dummy") sessions carry ids assigned
/// by the backend and keep them across polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// `[lat, lon]` in degrees.
    pub position: [f64; 2],
    /// Milliseconds since the Unix epoch of the last position update.
    pub last_update: i64,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub is_dummy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<ActiveAlert>,
}

impl Session {
    /// Shortened id for popups and log lines.
    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(8);
        &self.id[..end]
    }
}
