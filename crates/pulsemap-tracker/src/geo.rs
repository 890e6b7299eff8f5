// Geolocation seam
//
// The device geolocation API is outside this crate; implementations of
// GeoSource bridge to it. The simulated source exists for demos and tests.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Mutex;
use thiserror::Error;

/// Errors from a geolocation source. Surfaced to the user as an inline
/// status string, never fatal.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("location request timed out")]
    Timeout,
}

/// One position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    /// `[lat, lon]` in degrees.
    pub position: [f64; 2],
}

/// A source of position fixes.
#[async_trait]
pub trait GeoSource: Send + Sync {
    async fn current_fix(&self) -> Result<GeoFix, GeoError>;
}

/// A source pinned to one coordinate.
#[derive(Debug, Clone)]
pub struct FixedGeoSource {
    position: [f64; 2],
}

impl FixedGeoSource {
    pub fn new(position: [f64; 2]) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeoSource for FixedGeoSource {
    async fn current_fix(&self) -> Result<GeoFix, GeoError> {
        Ok(GeoFix {
            position: self.position,
        })
    }
}

/// A random walk around an origin, used by the demo binary.
#[derive(Debug)]
pub struct SimulatedGeoSource {
    current: Mutex<[f64; 2]>,
    /// Maximum per-fix drift in degrees.
    step: f64,
}

impl SimulatedGeoSource {
    pub fn new(origin: [f64; 2], step: f64) -> Self {
        Self {
            current: Mutex::new(origin),
            step,
        }
    }
}

#[async_trait]
impl GeoSource for SimulatedGeoSource {
    async fn current_fix(&self) -> Result<GeoFix, GeoError> {
        let mut rng = rand::thread_rng();
        let mut current = self.current.lock().expect("geo walk lock poisoned");
        current[0] += rng.gen_range(-self.step..=self.step);
        current[1] += rng.gen_range(-self.step..=self.step);
        Ok(GeoFix { position: *current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_source_always_returns_its_coordinate() {
        let source = FixedGeoSource::new([40.7128, -74.006]);
        let fix = source.current_fix().await.unwrap();
        assert_eq!(fix.position, [40.7128, -74.006]);
    }

    #[tokio::test]
    async fn simulated_walk_drifts_within_the_step_bound() {
        let origin = [40.7128, -74.006];
        let source = SimulatedGeoSource::new(origin, 0.001);

        let mut previous = origin;
        for _ in 0..50 {
            let fix = source.current_fix().await.unwrap();
            assert!((fix.position[0] - previous[0]).abs() <= 0.001 + f64::EPSILON);
            assert!((fix.position[1] - previous[1]).abs() <= 0.001 + f64::EPSILON);
            previous = fix.position;
        }
    }
}
