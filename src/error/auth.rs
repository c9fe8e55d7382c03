//! Authentication-related error types.
//!
//! This module defines errors related to sign-in, token refresh and the
//! persisted session.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// A refresh was required but no refresh token is stored.
    MissingRefreshToken,

    /// The refresh endpoint answered but declined the exchange
    /// (non-2xx status or `status: false`).
    RefreshRejected { message: String },

    /// The refresh exchange could not be completed (transport failure or
    /// malformed response).
    RefreshFailed { message: String },

    /// The task driving the refresh went away before it settled.
    RefreshAbandoned,

    /// No credentials available (user not logged in).
    NotAuthenticated,

    /// The sign-in endpoint rejected the supplied email/password.
    SignInRejected { message: String },

    /// Credentials could not be saved.
    CredentialsSaveFailed { message: String },
}

impl AuthError {
    /// Check if this error means the user has to sign in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::MissingRefreshToken
                | AuthError::RefreshRejected { .. }
                | AuthError::RefreshFailed { .. }
                | AuthError::NotAuthenticated
        )
    }

    /// Check if the stored session is already gone when this error is
    /// reported. A failed refresh episode clears it before anyone sees the
    /// error.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AuthError::MissingRefreshToken
                | AuthError::RefreshRejected { .. }
                | AuthError::RefreshFailed { .. }
                | AuthError::CredentialsSaveFailed { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::MissingRefreshToken => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::RefreshRejected { .. } => {
                "Your session could not be renewed. Please sign in again.".to_string()
            }
            AuthError::RefreshFailed { .. } => {
                "Failed to renew your session. Please sign in again.".to_string()
            }
            AuthError::RefreshAbandoned => {
                "Session renewal was interrupted. Please try again.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::SignInRejected { .. } => {
                "Login failed. Please check your credentials.".to_string()
            }
            AuthError::CredentialsSaveFailed { .. } => {
                "Could not save your session. Please check file permissions.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingRefreshToken => "E_AUTH_NO_REFRESH",
            AuthError::RefreshRejected { .. } => "E_AUTH_REFRESH_REJ",
            AuthError::RefreshFailed { .. } => "E_AUTH_REFRESH_FAIL",
            AuthError::RefreshAbandoned => "E_AUTH_REFRESH_ABANDONED",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::SignInRejected { .. } => "E_AUTH_SIGNIN",
            AuthError::CredentialsSaveFailed { .. } => "E_AUTH_CRED_SAVE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingRefreshToken => write!(f, "No refresh token available"),
            AuthError::RefreshRejected { message } => {
                write!(f, "Token refresh rejected: {}", message)
            }
            AuthError::RefreshFailed { message } => {
                write!(f, "Token refresh failed: {}", message)
            }
            AuthError::RefreshAbandoned => write!(f, "Token refresh abandoned before completion"),
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::SignInRejected { message } => write!(f, "Sign-in rejected: {}", message),
            AuthError::CredentialsSaveFailed { message } => {
                write!(f, "Failed to save credentials: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
