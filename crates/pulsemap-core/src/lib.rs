// Core state logic for Pulsemap
//
// Everything here is IO-free: the tracker runtime feeds polled data in and
// hands the resulting render model to whatever draws the map. Key pieces:
// - reconcile: merge a polled session list with locally authoritative state
// - markers: the alert-marker board with its fixed client-side lifetime
// - render: the marker/heatmap model consumed by the drawing layer
// - style: immutable icon and palette configuration

pub mod markers;
pub mod reconcile;
pub mod render;
pub mod style;

pub use markers::{MarkerBoard, MARKER_TTL_MS};
pub use reconcile::reconcile_sessions;
pub use render::{build_render_model, HeatPoint, MarkerView, RenderModel, SessionMarker, SessionMarkerKind};
pub use style::{AlertIcon, HeatWeights, MapStyle};
