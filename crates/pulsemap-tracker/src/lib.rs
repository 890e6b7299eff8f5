// Polling runtime for Pulsemap
//
// Owns the local participant's session: pushes its position, polls the
// session and alert-marker lists, reconciles them with locally held state,
// and publishes render snapshots over a watch channel. All loops stop on
// one shared shutdown signal.

pub mod config;
pub mod geo;
pub mod worker;

pub use config::{parse_dummy_count, TrackerConfig};
pub use geo::{FixedGeoSource, GeoError, GeoFix, GeoSource, SimulatedGeoSource};
pub use worker::Tracker;
