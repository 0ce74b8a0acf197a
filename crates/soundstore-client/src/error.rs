//! Error types for soundstore-client
//!
//! This module provides error handling for the catalog client library.

use std::collections::BTreeMap;

/// Result type for all catalog operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
/// Most functions in this crate return this type for consistent error handling.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for catalog client operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client/connection errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors when sending or receiving data
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Non-2xx response whose body is not a well-formed envelope
    #[error("HTTP status error: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    /// Domain failure reported by the server envelope (`isSuccess=false`)
    #[error("API error: {message}")]
    Api {
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// Login rejected by the server
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// No session token is stored
    #[error("No active session")]
    NotAuthenticated,

    /// Local validation failure, caught before any network call
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Credential store I/O failure
    #[error("Credential store error: {reason}")]
    Store { reason: String },
}

impl Error {
    /// Create an HTTP status error from an undecodable non-2xx response
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a domain error from an envelope message
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    /// Create a domain error carrying a field-keyed error map
    pub fn api_with_fields(
        message: impl Into<String>,
        field_errors: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self::Api {
            message: message.into(),
            field_errors,
        }
    }

    /// Create an invalid-credentials error
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
        }
    }

    /// Create a local validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a credential store error
    pub fn store(reason: impl Into<String>) -> Self {
        Self::Store {
            reason: reason.into(),
        }
    }

    /// Field-keyed validation errors returned by the server, if any
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Error::Api { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Check whether this error should tear down the session
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Error::InvalidCredentials { .. } | Error::NotAuthenticated
        ) || matches!(self, Error::HttpStatus { status, .. } if *status == 401 || *status == 403)
    }

    /// Get a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            Error::Http(_) => {
                "Network connection failed. Please check your connection and try again.".to_string()
            }
            Error::HttpStatus { status, .. } => {
                format!("The server returned an unexpected response ({status}).")
            }
            Error::Api { message, .. } => message.clone(),
            Error::InvalidCredentials { message } => message.clone(),
            Error::NotAuthenticated => "You are not logged in.".to_string(),
            Error::Validation { reason } => reason.clone(),
            Error::InvalidConfig { reason } => format!("Configuration error: {reason}"),
            Error::Store { reason } => format!("Session storage error: {reason}"),
            Error::Serialization(_) | Error::UrlParse(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }
}

// Import builder error type for From implementation
use crate::config::ApiBuilderError;

impl From<ApiBuilderError> for Error {
    fn from(err: ApiBuilderError) -> Self {
        Error::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Error::Validation {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_exposed() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), vec!["Name is required".to_string()]);

        let err = Error::api_with_fields("Validation failed", fields);
        let map = err.field_errors().expect("field errors present");
        assert_eq!(map["name"], vec!["Name is required".to_string()]);

        let plain = Error::api("Something went wrong");
        assert!(plain.field_errors().is_none());
    }

    #[test]
    fn test_auth_failure_classification() {
        assert!(Error::invalid_credentials("bad password").is_auth_failure());
        assert!(Error::NotAuthenticated.is_auth_failure());
        assert!(Error::http_status(401, "unauthorized").is_auth_failure());
        assert!(!Error::http_status(500, "oops").is_auth_failure());
        assert!(!Error::api("domain failure").is_auth_failure());
    }

    #[test]
    fn test_user_message_uses_server_message() {
        let err = Error::api("Category not found");
        assert_eq!(err.user_message(), "Category not found");
    }
}
