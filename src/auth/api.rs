//! Calls to the `/api/auth/*` endpoints that bypass the request pipeline.
//!
//! Sign-in and the refresh exchange go straight to the transport: neither
//! carries the stored access token, and a 401 from either must never start
//! a refresh episode of its own.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::credentials::CredentialPair;
use crate::client::{response_message, Envelope};
use crate::error::{AuthError, ClientError, ClientResult};
use crate::traits::{ApiRequest, HttpClient};

/// Path of the sign-in endpoint.
pub const SIGNIN_PATH: &str = "/api/auth/signin";

/// Path of the session check endpoint.
pub const CHECK_AUTH_PATH: &str = "/api/auth/check-auth";

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// `data` of a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInData {
    pub session: CredentialPair,
    #[serde(default)]
    pub user: serde_json::Value,
}

/// Client for the auth endpoints.
#[derive(Clone)]
pub struct AuthApi {
    http: Arc<dyn HttpClient>,
    base_url: String,
    refresh_url: String,
}

impl AuthApi {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>, refresh_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            refresh_url: refresh_url.into(),
        }
    }

    /// Full URL of the refresh endpoint.
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }

    /// Exchange a refresh token for a new credential pair.
    ///
    /// POST {refresh_url} `{refresh_token}`
    ///
    /// Transport failures and malformed bodies are `RefreshFailed`; a non-2xx
    /// status or `status: false` is `RefreshRejected`.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<CredentialPair, AuthError> {
        let request = ApiRequest::post(self.refresh_url.as_str())
            .with_json(&RefreshRequest { refresh_token })
            .map_err(|e| AuthError::RefreshFailed {
                message: e.to_string(),
            })?;

        debug!(url = %request.url, "exchanging refresh token");
        let response = self
            .http
            .execute(&request)
            .await
            .map_err(|e| AuthError::RefreshFailed {
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(AuthError::RefreshRejected {
                message: format!("HTTP {}: {}", response.status, response_message(&response)),
            });
        }

        let envelope: Envelope<CredentialPair> =
            response.json().map_err(|e| AuthError::RefreshFailed {
                message: format!("malformed refresh response: {}", e),
            })?;

        if !envelope.status {
            return Err(AuthError::RefreshRejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "refresh declined".to_string()),
            });
        }

        envelope.data.ok_or_else(|| AuthError::RefreshFailed {
            message: "refresh response carried no tokens".to_string(),
        })
    }

    /// Sign in with email and password.
    ///
    /// POST /api/auth/signin `{email, password}`
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<SignInData> {
        let request = ApiRequest::post(format!("{}{}", self.base_url, SIGNIN_PATH))
            .with_json(&SignInRequest { email, password })?;

        debug!(url = %request.url, "signing in");
        let response = self.http.execute(&request).await?;

        if !response.is_success() {
            return Err(AuthError::SignInRejected {
                message: response_message(&response),
            }
            .into());
        }

        let envelope: Envelope<SignInData> = response.json()?;
        match (envelope.status, envelope.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ClientError::Rejected {
                message: "sign-in response carried no session".to_string(),
            }),
            (false, _) => Err(AuthError::SignInRejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "invalid credentials".to_string()),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for AuthApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthApi")
            .field("base_url", &self.base_url)
            .field("refresh_url", &self.refresh_url)
            .finish()
    }
}
