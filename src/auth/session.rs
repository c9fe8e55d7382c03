//! Session lifecycle: sign-in, sign-out, startup check and explicit refresh.

use std::sync::Arc;
use tracing::{info, warn};

use super::api::CHECK_AUTH_PATH;
use crate::client::{decode, ApiClient};
use crate::error::{AuthError, ClientError, ClientResult};
use crate::traits::{ApiRequest, TeardownReason};

/// Outcome of [`SessionManager::check_auth`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// The server accepted the stored session.
    Authenticated { user: Option<serde_json::Value> },
    /// No usable session.
    Unauthenticated,
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated { .. })
    }
}

/// Manages the signed-in session on top of an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: Arc<ApiClient>,
}

impl SessionManager {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Sign in and persist the session. Returns the signed-in user.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<serde_json::Value> {
        let data = self.client.auth_api().sign_in(email, password).await?;
        self.client
            .credentials()
            .store_session(&data.session, &data.user)
            .map_err(|e| AuthError::CredentialsSaveFailed {
                message: e.to_string(),
            })?;
        info!("signed in");
        Ok(data.user)
    }

    /// Clear the stored session and notify.
    pub fn logout(&self) -> ClientResult<()> {
        self.end_session(TeardownReason::LoggedOut)
    }

    /// Verify the stored session with the server.
    ///
    /// Without an access token this answers `Unauthenticated` without any
    /// network call. A session the server does not accept is ended, unless
    /// a failed refresh already ended it.
    pub async fn check_auth(&self) -> ClientResult<SessionStatus> {
        if !self.client.credentials().has_access_token() {
            return Ok(SessionStatus::Unauthenticated);
        }

        let request = ApiRequest::get(self.client.url(CHECK_AUTH_PATH));
        let outcome = match self.client.send(request).await {
            Ok(response) => decode::<serde_json::Value>(&response),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(_) => Ok(SessionStatus::Authenticated {
                user: self.client.credentials().user(),
            }),
            Err(ClientError::Auth(err)) if err.ends_session() => {
                Ok(SessionStatus::Unauthenticated)
            }
            Err(err) => {
                warn!(error = %err, "stored session rejected");
                self.end_session(TeardownReason::SessionInvalid)?;
                Ok(SessionStatus::Unauthenticated)
            }
        }
    }

    /// Renew the credential pair now, sharing any running refresh.
    pub async fn refresh_access_token(&self) -> Result<(), AuthError> {
        self.client.coordinator().refresh().await
    }

    /// The stored user, if signed in.
    pub fn current_user(&self) -> Option<serde_json::Value> {
        self.client.credentials().user()
    }

    fn end_session(&self, reason: TeardownReason) -> ClientResult<()> {
        let cleared = self.client.credentials().clear();
        self.client.notifier().session_terminated(&reason);
        cleared.map_err(ClientError::from)
    }
}
