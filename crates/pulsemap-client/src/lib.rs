// HTTP client for the Pulsemap backend
//
// Three surfaces, each a thin typed wrapper over reqwest:
// - MapApiClient: location pushes, session/marker polls, connection count
// - AuthClient: the cookie-session auth endpoints
// - TranscriptionClient: the disconnected audio-transcription demo
//
// No retries and no backoff anywhere: callers poll, so the next tick is the
// retry.

pub mod api;
pub mod auth;
pub mod error;
pub mod transcribe;

pub use api::MapApiClient;
pub use auth::AuthClient;
pub use error::{ClientError, Result};
pub use transcribe::TranscriptionClient;
