// Wire contracts for the Pulsemap API
// This crate defines the DTOs exchanged with the map backend: sessions,
// status alerts, ad-hoc alert markers, location updates, and the
// cookie-session auth payloads. Pure data, no IO.

pub mod alert;
pub mod auth;
pub mod location;
pub mod session;

pub use alert::*;
pub use auth::*;
pub use location::*;
pub use session::*;
