//! HTTP clients for the remote products API.
//!
//! This module provides typed clients for the DummyJSON-compatible API the
//! application talks to: [`auth::AuthApi`] for the login endpoint and
//! [`products::ProductsApi`] for the product endpoints. Both share the same
//! client construction and response handling so errors carry the
//! server-supplied message whenever one exists.

pub mod auth;
pub mod products;
pub mod types;

pub use auth::AuthApi;
pub use products::ProductsApi;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;

const USER_AGENT: &str = "kardex/0.1.0";

/// Error body shape used by the remote API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Builds the reqwest client shared by the API collaborators
pub(crate) fn build_client(timeout_seconds: u64) -> Result<Client, ApiError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Checks the response status and decodes the body
///
/// Non-2xx responses become [`ApiError::Status`], carrying the `message`
/// field of the error body when the server supplied one.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.is_empty());
        tracing::error!(status = status.as_u16(), body = %body, "API returned an error response");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response.json::<T>().await.map_err(|e| {
        tracing::error!("Failed to decode API response: {}", e);
        ApiError::Transport(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_succeeds() {
        let client = build_client(30);
        assert!(client.is_ok());
    }

    #[test]
    fn test_error_body_parses_message_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.message, "Invalid credentials");
    }
}
