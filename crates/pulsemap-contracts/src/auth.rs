// Auth DTOs for the cookie-session endpoints
// The backend keeps the session in a cookie; these shapes only carry the
// credentials in and the identity out.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login` and `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The authenticated identity returned by login/signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

/// Response of `GET /api/auth/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Error body the auth endpoints return on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthError {
    pub error: String,
}
