// Alert DTOs: per-session status alerts and ad-hoc map markers

use serde::{Deserialize, Serialize};

/// Self-declared participant status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Water,
    Medical,
    Arrest,
    Stayaway,
}

impl AlertKind {
    pub const ALL: [AlertKind; 4] = [
        AlertKind::Water,
        AlertKind::Medical,
        AlertKind::Arrest,
        AlertKind::Stayaway,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Water => "water",
            AlertKind::Medical => "medical",
            AlertKind::Arrest => "arrest",
            AlertKind::Stayaway => "stayaway",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status alert currently attached to a session.
///
/// The backend holds at most one per session; for the local session the
/// locally held alert is authoritative and the server echo is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveAlert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Milliseconds since the Unix epoch.
    pub expires_at: i64,
}

/// An ad-hoc alert dropped on the map.
///
/// Markers are expired client-side 30 s after `created_at`, independent of
/// how long the backend keeps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertMarker {
    pub id: String,
    /// `[lat, lon]` in degrees.
    pub position: [f64; 2],
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub creator_id: String,
}

impl AlertMarker {
    /// Age of the marker at `now` (ms since epoch). Saturates at zero for
    /// markers stamped in the future.
    pub fn age_ms(&self, now: i64) -> i64 {
        (now - self.created_at).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_kind_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&AlertKind::Stayaway).unwrap(), "\"stayaway\"");
        let kind: AlertKind = serde_json::from_str("\"medical\"").unwrap();
        assert_eq!(kind, AlertKind::Medical);
    }

    #[test]
    fn active_alert_round_trips_type_field() {
        let alert = ActiveAlert {
            kind: AlertKind::Water,
            expires_at: 1754300030000,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "water");
        assert_eq!(json["expiresAt"], 1754300030000i64);
    }

    #[test]
    fn marker_age_saturates_for_future_stamps() {
        let marker = AlertMarker {
            id: "m1".to_string(),
            position: [0.0, 0.0],
            kind: AlertKind::Arrest,
            created_at: 2_000,
            creator_id: "c1".to_string(),
        };
        assert_eq!(marker.age_ms(1_000), 0);
        assert_eq!(marker.age_ms(32_000), 30_000);
    }
}
