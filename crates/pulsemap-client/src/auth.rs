// Cookie-session auth client
//
// Wraps /api/auth/{check,login,signup,logout}. The backend keeps the
// session in a cookie, so this client carries its own jar; rejections
// surface the server's error string.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use pulsemap_contracts::{AuthStatus, AuthUser, Credentials};

use crate::error::{ClientError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the cookie-session auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `GET /api/auth/check`. A 401 is a normal "not logged in" answer,
    /// not an error.
    pub async fn check(&self) -> Result<AuthStatus> {
        let response = self
            .client
            .get(format!("{}/auth/check", self.base_url))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(AuthStatus {
                authenticated: false,
                user_id: None,
                username: None,
            });
        }
        if !response.status().is_success() {
            return Err(ClientError::status("auth/check", response.status()));
        }
        Ok(response.json().await?)
    }

    /// `POST /api/auth/login`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthUser> {
        self.submit("login", credentials).await
    }

    /// `POST /api/auth/signup`.
    pub async fn signup(&self, credentials: &Credentials) -> Result<AuthUser> {
        self.submit("signup", credentials).await
    }

    /// `POST /api/auth/logout`. Clears the server-side session; the cookie
    /// jar keeps whatever the server left behind.
    pub async fn logout(&self) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/auth/logout", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::status("auth/logout", response.status()));
        }
        debug!("logged out");
        Ok(())
    }

    async fn submit(&self, endpoint: &str, credentials: &Credentials) -> Result<AuthUser> {
        let response = self
            .client
            .post(format!("{}/auth/{endpoint}", self.base_url))
            .json(credentials)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            // The backend answers rejections with {"error": "..."}.
            let reason = response
                .json::<pulsemap_contracts::AuthError>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| "unknown error".to_string());
            Err(ClientError::AuthRejected(reason))
        }
    }
}
