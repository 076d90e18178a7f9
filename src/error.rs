//! Error types for Kardex
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Main error type for Kardex operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session management, catalog operations, and
/// credential storage.
#[derive(Error, Debug)]
pub enum KardexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Product draft validation failures (user-facing messages)
    #[error("{0}")]
    Validation(FieldErrors),

    /// Errors from the remote products API or the transport beneath it
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session lifecycle errors (user-facing messages)
    #[error("{0}")]
    Session(String),

    /// Credential storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Error returned by the API client layer
///
/// Non-2xx responses become [`ApiError::Status`] with the message extracted
/// from the response body when the server supplied one. Connection, timeout,
/// and decode failures surface as [`ApiError::Transport`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status code
    #[error("API request failed with status {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Error message parsed from the response body, when present
        message: Option<String>,
    },

    /// The request never produced a usable response
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns the HTTP status code, when the server produced a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }

    /// Resolves the message shown to the user for this error
    ///
    /// Prefers the server-supplied message when one exists; otherwise falls
    /// back to the operation-specific message provided by the caller.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type alias for Kardex operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = KardexError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_session_error_display() {
        let error = KardexError::Session("No hay sesión activa".to_string());
        assert_eq!(error.to_string(), "No hay sesión activa");
    }

    #[test]
    fn test_storage_error_display() {
        let error = KardexError::Storage("credentials dir unavailable".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: credentials dir unavailable"
        );
    }

    #[test]
    fn test_api_status_error_display() {
        let error = ApiError::Status {
            status: 404,
            message: Some("Product not found".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "API request failed with status 404: Product not found"
        );
    }

    #[test]
    fn test_api_status_error_display_without_body() {
        let error = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(
            error.to_string(),
            "API request failed with status 500: no error message"
        );
    }

    #[test]
    fn test_api_error_status_accessor() {
        let error = ApiError::Status {
            status: 401,
            message: None,
        };
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let error = ApiError::Status {
            status: 400,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            error.user_message("Usuario o contraseña incorrectos"),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_user_message_falls_back_without_server_message() {
        let error = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(
            error.user_message("Error al cargar productos"),
            "Error al cargar productos"
        );
    }

    #[test]
    fn test_user_message_falls_back_on_empty_server_message() {
        let error = ApiError::Status {
            status: 502,
            message: Some(String::new()),
        };
        assert_eq!(
            error.user_message("Error al cargar productos"),
            "Error al cargar productos"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: KardexError = io_error.into();
        assert!(matches!(error, KardexError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: KardexError = json_error.into();
        assert!(matches!(error, KardexError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: KardexError = yaml_error.into();
        assert!(matches!(error, KardexError::Yaml(_)));
    }

    #[test]
    fn test_api_error_wraps_into_kardex_error() {
        let error: KardexError = ApiError::Status {
            status: 404,
            message: None,
        }
        .into();
        assert!(matches!(error, KardexError::Api(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KardexError>();
        assert_send_sync::<ApiError>();
    }
}
