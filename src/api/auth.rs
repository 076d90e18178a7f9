//! Client for the authentication endpoint.
//!
//! The remote API issues bearer tokens through `POST /auth/login`; the
//! session store drives this client and keeps the resulting token.

use serde::Serialize;

use crate::api::types::LoginResponse;
use crate::error::ApiError;

/// Token lifetime requested on login, in minutes
pub const TOKEN_TTL_MINUTES: u32 = 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    expires_in_mins: u32,
}

/// Client for the auth endpoints of the remote API
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl AuthApi {
    /// Creates a new auth client against `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let client = super::build_client(timeout_seconds)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchanges credentials for a bearer token and user snapshot
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] on rejected credentials (the server
    /// answers 400 with a message) and [`ApiError::Transport`] when the
    /// request itself fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        tracing::debug!(username, "Requesting login token");

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username,
                password,
                expires_in_mins: TOKEN_TTL_MINUTES,
            })
            .send()
            .await?;

        super::decode(response).await
    }
}
