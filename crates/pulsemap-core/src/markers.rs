// Alert-marker board
//
// Holds the last fetched marker list and enforces the fixed client-side
// lifetime: a marker older than 30 s is gone, whatever the server says.
// This can drop markers the backend still reports; the next poll brings
// back only the ones young enough to survive the sweep.

use tracing::debug;

use pulsemap_contracts::AlertMarker;

/// Client-side marker lifetime in milliseconds.
pub const MARKER_TTL_MS: i64 = 30_000;

/// The set of ad-hoc alert markers currently known to the client.
#[derive(Debug, Default, Clone)]
pub struct MarkerBoard {
    markers: Vec<AlertMarker>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board with a freshly polled list. Markers already past
    /// their lifetime are dropped on the way in.
    pub fn replace(&mut self, polled: Vec<AlertMarker>, now: i64) {
        self.markers = polled
            .into_iter()
            .filter(|m| m.age_ms(now) < MARKER_TTL_MS)
            .collect();
    }

    /// Drop every marker whose lifetime has elapsed. Returns the number of
    /// markers removed.
    pub fn sweep(&mut self, now: i64) -> usize {
        let before = self.markers.len();
        self.markers.retain(|m| m.age_ms(now) < MARKER_TTL_MS);
        let removed = before - self.markers.len();
        if removed > 0 {
            debug!(removed, remaining = self.markers.len(), "expired alert markers");
        }
        removed
    }

    /// Markers still alive at `now`.
    pub fn live(&self, now: i64) -> impl Iterator<Item = &AlertMarker> {
        self.markers.iter().filter(move |m| m.age_ms(now) < MARKER_TTL_MS)
    }

    /// Add a locally created marker without waiting for the next poll.
    pub fn insert(&mut self, marker: AlertMarker) {
        self.markers.push(marker);
    }

    pub fn remove(&mut self, id: &str) {
        self.markers.retain(|m| m.id != id);
    }

    /// The live marker created by `creator_id`, if any.
    pub fn find_by_creator(&self, creator_id: &str, now: i64) -> Option<&AlertMarker> {
        self.live(now).find(|m| m.creator_id == creator_id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
