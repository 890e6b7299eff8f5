// Render model
//
// The boundary handed to the drawing layer. Sessions become either icon
// markers (alert active and an icon is configured for its kind) or weighted
// circle markers; every session also contributes a weighted heat point.
// Alert markers carry their remaining lifetime and whether the viewer may
// delete them.

use serde::Serialize;

use pulsemap_contracts::{AlertKind, AlertMarker, Session};

use crate::markers::{MarkerBoard, MARKER_TTL_MS};
use crate::style::MapStyle;

/// One rendered session marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionMarker {
    pub session_id: String,
    pub position: [f64; 2],
    pub is_self: bool,
    #[serde(flatten)]
    pub kind: SessionMarkerKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "marker", rename_all = "lowercase")]
pub enum SessionMarkerKind {
    /// Alert icon with a popup describing the session.
    Icon {
        symbol: String,
        color: String,
        popup: String,
    },
    /// Plain presence marker, radius scaled by heat weight.
    Circle { color: String, radius: f64 },
}

/// One weighted heatmap contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatPoint {
    pub position: [f64; 2],
    pub intensity: f64,
}

/// An alert marker as shown on the map: countdown plus a delete affordance
/// restricted to its creator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub position: [f64; 2],
    pub kind: AlertKind,
    pub remaining_ms: i64,
    pub deletable: bool,
}

/// Everything the drawing layer needs for one frame.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderModel {
    pub markers: Vec<SessionMarker>,
    pub heat: Vec<HeatPoint>,
    pub alerts: Vec<MarkerView>,
    pub active_connections: Option<u32>,
    /// Last geolocation failure, surfaced inline to the user.
    pub location_error: Option<String>,
}

/// Build the render model for one frame.
///
/// `sessions` must already be reconciled: ids are unique and the local
/// session carries the locally held alert.
pub fn build_render_model(
    sessions: &[Session],
    board: &MarkerBoard,
    style: &MapStyle,
    local_id: &str,
    now: i64,
    active_connections: Option<u32>,
    location_error: Option<String>,
) -> RenderModel {
    let markers = sessions
        .iter()
        .map(|s| session_marker(s, style, local_id, now))
        .collect();

    let heat = sessions
        .iter()
        .map(|s| HeatPoint {
            position: s.position,
            intensity: style.weight_for(s.is_dummy),
        })
        .collect();

    let alerts = board
        .live(now)
        .map(|m| marker_view(m, local_id, now))
        .collect();

    RenderModel {
        markers,
        heat,
        alerts,
        active_connections,
        location_error,
    }
}

fn session_marker(session: &Session, style: &MapStyle, local_id: &str, now: i64) -> SessionMarker {
    let active_icon = session
        .alert
        .filter(|a| a.expires_at > now)
        .and_then(|a| style.icon(a.kind));

    let kind = match active_icon {
        Some(icon) => SessionMarkerKind::Icon {
            symbol: icon.symbol.to_string(),
            color: icon.color.to_string(),
            popup: format!(
                "Session {} · joined {} · {}",
                session.short_id(),
                session.joined_at.format("%H:%M:%S"),
                icon.label,
            ),
        },
        None => SessionMarkerKind::Circle {
            color: style.circle_color.to_string(),
            radius: style.circle_radius * style.weight_for(session.is_dummy),
        },
    };

    SessionMarker {
        session_id: session.id.clone(),
        position: session.position,
        is_self: session.id == local_id,
        kind,
    }
}

fn marker_view(marker: &AlertMarker, local_id: &str, now: i64) -> MarkerView {
    MarkerView {
        id: marker.id.clone(),
        position: marker.position,
        kind: marker.kind,
        remaining_ms: MARKER_TTL_MS - marker.age_ms(now),
        deletable: marker.creator_id == local_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulsemap_contracts::ActiveAlert;

    const NOW: i64 = 1_754_300_000_000;

    fn session(id: &str, is_dummy: bool, alert: Option<ActiveAlert>) -> Session {
        Session {
            id: id.to_string(),
            position: [40.7, -74.0],
            last_update: NOW,
            joined_at: Utc::now(),
            is_dummy,
            creator_id: None,
            alert,
        }
    }

    fn active(kind: AlertKind) -> ActiveAlert {
        ActiveAlert {
            kind,
            expires_at: NOW + 20_000,
        }
    }

    #[test]
    fn alerted_session_renders_as_icon_with_popup() {
        let sessions = vec![session("A", false, Some(active(AlertKind::Medical)))];
        let model = build_render_model(
            &sessions,
            &MarkerBoard::new(),
            &MapStyle::default(),
            "A",
            NOW,
            None,
            None,
        );

        assert_eq!(model.markers.len(), 1);
        assert!(model.markers[0].is_self);
        match &model.markers[0].kind {
            SessionMarkerKind::Icon { popup, .. } => assert!(popup.contains("medical help")),
            other => panic!("expected icon marker, got {other:?}"),
        }
    }

    #[test]
    fn expired_alert_falls_back_to_circle() {
        let expired = ActiveAlert {
            kind: AlertKind::Water,
            expires_at: NOW - 1,
        };
        let sessions = vec![session("A", false, Some(expired))];
        let model = build_render_model(
            &sessions,
            &MarkerBoard::new(),
            &MapStyle::default(),
            "me",
            NOW,
            None,
            None,
        );

        assert!(matches!(
            model.markers[0].kind,
            SessionMarkerKind::Circle { .. }
        ));
    }

    #[test]
    fn dummy_sessions_get_lower_heat_intensity_and_smaller_circles() {
        let sessions = vec![session("real", false, None), session("dummy", true, None)];
        let style = MapStyle::default();
        let model = build_render_model(
            &sessions,
            &MarkerBoard::new(),
            &style,
            "me",
            NOW,
            None,
            None,
        );

        assert_eq!(model.heat[0].intensity, style.heat.real);
        assert_eq!(model.heat[1].intensity, style.heat.dummy);
        let radius = |m: &SessionMarker| match m.kind {
            SessionMarkerKind::Circle { radius, .. } => radius,
            _ => panic!("expected circle"),
        };
        assert!(radius(&model.markers[1]) < radius(&model.markers[0]));
    }

    #[test]
    fn marker_views_carry_countdown_and_creator_gated_delete() {
        let mut board = MarkerBoard::new();
        board.insert(AlertMarker {
            id: "m1".to_string(),
            position: [40.7, -74.0],
            kind: AlertKind::Arrest,
            created_at: NOW - 10_000,
            creator_id: "me".to_string(),
        });
        board.insert(AlertMarker {
            id: "m2".to_string(),
            position: [40.8, -74.1],
            kind: AlertKind::Water,
            created_at: NOW - 5_000,
            creator_id: "them".to_string(),
        });

        let model = build_render_model(
            &[],
            &board,
            &MapStyle::default(),
            "me",
            NOW,
            None,
            None,
        );

        assert_eq!(model.alerts.len(), 2);
        let mine = model.alerts.iter().find(|a| a.id == "m1").unwrap();
        let theirs = model.alerts.iter().find(|a| a.id == "m2").unwrap();
        assert_eq!(mine.remaining_ms, 20_000);
        assert!(mine.deletable);
        assert!(!theirs.deletable);
    }

    #[test]
    fn expired_markers_never_reach_the_model() {
        let mut board = MarkerBoard::new();
        board.insert(AlertMarker {
            id: "old".to_string(),
            position: [0.0, 0.0],
            kind: AlertKind::Water,
            created_at: NOW - MARKER_TTL_MS,
            creator_id: "me".to_string(),
        });

        let model = build_render_model(
            &[],
            &board,
            &MapStyle::default(),
            "me",
            NOW,
            None,
            None,
        );

        assert!(model.alerts.is_empty());
    }
}
