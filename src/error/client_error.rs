//! Unified error type for the folio client.

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use crate::traits::{HttpError, StorageError};

/// Unified error type returned by [`crate::client::ApiClient`] and everything
/// built on it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("{0}")]
    Http(#[from] HttpError),

    /// Authentication/session errors, including refresh failures.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered 2xx but reported `status: false`.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Local session storage failed.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ClientError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Http(_) => ErrorCategory::Network,
            ClientError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::Client
                }
            }
            ClientError::Api { status, .. } => match *status {
                401 => ErrorCategory::Auth,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            ClientError::Rejected { .. } | ClientError::Json(_) => ErrorCategory::Client,
            ClientError::Storage(_) => ErrorCategory::System,
            ClientError::Config { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Auth(AuthError::RefreshAbandoned) => true,
            _ => self.category().is_retryable(),
        }
    }

    /// Check if the user has to sign in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ClientError::Auth(err) => err.requires_reauth(),
            ClientError::Api { status: 401, .. } => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(HttpError::Timeout(_)) => {
                "The server took too long to respond.".to_string()
            }
            ClientError::Http(_) => "Could not reach the server.".to_string(),
            ClientError::Auth(err) => err.user_message(),
            ClientError::Api { status: 401, .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ClientError::Api { status: 403, .. } => {
                "Access denied. You don't have permission for this action.".to_string()
            }
            ClientError::Api { status: 404, .. } => "The requested item was not found.".to_string(),
            ClientError::Api { message, .. } | ClientError::Rejected { message } => {
                message.clone()
            }
            ClientError::Json(_) => "The server sent an unexpected response.".to_string(),
            ClientError::Storage(_) => "Could not access local session storage.".to_string(),
            ClientError::Config { message } => message.clone(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Http(_) => "E_NET",
            ClientError::Auth(err) => err.error_code(),
            ClientError::Api { .. } => "E_API_STATUS",
            ClientError::Rejected { .. } => "E_API_REJECTED",
            ClientError::Json(_) => "E_API_DECODE",
            ClientError::Storage(_) => "E_STORAGE",
            ClientError::Config { .. } => "E_CONFIG",
        }
    }
}
