// Session reconciliation
//
// Merges a freshly polled session list with locally authoritative state.
// Two deliberate asymmetries, kept as distinct paths:
// - self: the locally held alert replaces whatever the server echoed back
// - others: the server record is accepted verbatim (server-of-record)
// Dummy sessions keep the ids the server assigned them; the client never
// rewrites identity.

use std::collections::HashSet;

use tracing::debug;

use pulsemap_contracts::{ActiveAlert, Session};

/// Reconcile a polled session list against local state.
///
/// Duplicate ids are dropped, first occurrence wins. The record matching
/// `local_id` has its alert replaced with `local_alert` - including
/// replacement with `None` when no local alert is active.
pub fn reconcile_sessions(
    polled: Vec<Session>,
    local_id: &str,
    local_alert: Option<ActiveAlert>,
) -> Vec<Session> {
    let mut seen: HashSet<String> = HashSet::with_capacity(polled.len());
    let mut merged = Vec::with_capacity(polled.len());
    let mut dropped = 0usize;

    for mut session in polled {
        if !seen.insert(session.id.clone()) {
            dropped += 1;
            continue;
        }
        if session.id == local_id {
            // Self path: local view is authoritative for our own alert.
            session.alert = local_alert;
        }
        // Others path: record accepted as-is.
        merged.push(session);
    }

    if dropped > 0 {
        debug!(dropped, "dropped duplicate session records");
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulsemap_contracts::AlertKind;

    fn session(id: &str, alert: Option<ActiveAlert>) -> Session {
        Session {
            id: id.to_string(),
            position: [40.0, -74.0],
            last_update: 1_754_300_000_000,
            joined_at: Utc::now(),
            is_dummy: false,
            creator_id: None,
            alert,
        }
    }

    fn alert(kind: AlertKind) -> ActiveAlert {
        ActiveAlert {
            kind,
            expires_at: 1_754_300_030_000,
        }
    }

    #[test]
    fn duplicate_ids_first_occurrence_wins() {
        let polled = vec![
            session("A", None),
            session("B", Some(alert(AlertKind::Water))),
            session("A", Some(alert(AlertKind::Arrest))),
        ];

        let merged = reconcile_sessions(polled, "none", None);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "A");
        assert!(merged[0].alert.is_none());
        assert_eq!(merged[1].id, "B");
    }

    #[test]
    fn local_alert_overrides_server_echo() {
        // Duplicate self records plus a server echo that disagrees with the
        // locally held alert: dedup keeps the first, the local alert wins.
        let polled = vec![
            session("A", None),
            session("A", Some(alert(AlertKind::Water))),
        ];

        let merged = reconcile_sessions(polled, "A", Some(alert(AlertKind::Medical)));

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "A");
        assert_eq!(merged[0].alert.unwrap().kind, AlertKind::Medical);
    }

    #[test]
    fn clearing_the_local_alert_clears_the_self_record() {
        let polled = vec![session("A", Some(alert(AlertKind::Water)))];

        let merged = reconcile_sessions(polled, "A", None);

        assert!(merged[0].alert.is_none());
    }

    #[test]
    fn other_sessions_are_accepted_verbatim() {
        let polled = vec![session("B", Some(alert(AlertKind::Stayaway)))];

        let merged = reconcile_sessions(polled, "A", Some(alert(AlertKind::Medical)));

        assert_eq!(merged[0].alert.unwrap().kind, AlertKind::Stayaway);
    }

    #[test]
    fn dummy_ids_pass_through_unchanged() {
        let mut dummy = session("dummy-7", None);
        dummy.is_dummy = true;

        let first = reconcile_sessions(vec![dummy.clone()], "A", None);
        let second = reconcile_sessions(vec![dummy], "A", None);

        assert_eq!(first[0].id, "dummy-7");
        assert_eq!(first[0].id, second[0].id);
    }
}
