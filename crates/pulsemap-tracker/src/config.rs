// Tracker configuration, loaded from environment variables

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Runtime knobs for the polling loops.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Base URL of the map backend, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// How often the local position is pushed.
    pub position_interval: Duration,
    /// How often the session list is polled.
    pub session_interval: Duration,
    /// How often the alert-marker list is polled.
    pub alert_interval: Duration,
    /// How often expired markers are swept.
    pub sweep_interval: Duration,
    /// Number of synthetic sessions requested from the backend.
    pub dummy_count: u32,
}

impl TrackerConfig {
    /// Create configuration from environment variables
    ///
    /// Environment variables:
    /// - `PULSEMAP_API_URL`: backend base URL (default: local host)
    /// - `PULSEMAP_POSITION_INTERVAL_MS` (default: 2000)
    /// - `PULSEMAP_SESSION_INTERVAL_MS` (default: 2500)
    /// - `PULSEMAP_ALERT_INTERVAL_MS` (default: 3000)
    /// - `PULSEMAP_DUMMY_COUNT`: synthetic session count; anything that
    ///   does not parse counts as 0
    pub fn from_env() -> Self {
        let base_url = env::var("PULSEMAP_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            position_interval: env_interval("PULSEMAP_POSITION_INTERVAL_MS", 2000),
            session_interval: env_interval("PULSEMAP_SESSION_INTERVAL_MS", 2500),
            alert_interval: env_interval("PULSEMAP_ALERT_INTERVAL_MS", 3000),
            sweep_interval: Duration::from_millis(1000),
            dummy_count: env::var("PULSEMAP_DUMMY_COUNT")
                .map(|v| parse_dummy_count(&v))
                .unwrap_or(0),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_dummy_count(mut self, dummy_count: u32) -> Self {
        self.dummy_count = dummy_count;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            position_interval: Duration::from_millis(2000),
            session_interval: Duration::from_millis(2500),
            alert_interval: Duration::from_millis(3000),
            sweep_interval: Duration::from_millis(1000),
            dummy_count: 0,
        }
    }
}

/// Parse a user-supplied dummy-session count. Non-numeric input counts as 0.
pub fn parse_dummy_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn env_interval(key: &str, default_ms: u64) -> Duration {
    let ms = env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
