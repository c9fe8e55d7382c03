//! The authenticated request pipeline.
//!
//! Every API call goes through [`ApiClient::send`]: the stored access token
//! is attached, the request is executed, and a 401 on a request that has not
//! been replayed yet is handed to the [`RefreshCoordinator`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::adapters::{ConsoleNotifier, FileStore, ReqwestHttpClient};
use crate::auth::{authorize, AuthApi, CredentialStore, RefreshCoordinator};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::traits::{ApiRequest, HttpClient, KeyValueStore, Response, SessionNotifier};

/// Response wrapper used by every API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Best-effort human-readable message from an error response: the
/// envelope's `message`, else the raw body, else the status line.
pub fn response_message(response: &Response) -> String {
    if let Ok(envelope) = response.json::<Envelope<serde_json::Value>>() {
        if let Some(message) = envelope.message.filter(|m| !m.is_empty()) {
            return message;
        }
    }
    match response.text() {
        Ok(text) if !text.trim().is_empty() => text,
        _ => format!("HTTP {}", response.status),
    }
}

/// Turn a final response into the envelope's payload.
///
/// Non-2xx becomes `ClientError::Api`, `status: false` becomes
/// `ClientError::Rejected`. A missing `data` is decoded as JSON `null`, so
/// `()` and `Option<_>` payloads accept it.
pub fn decode<T: DeserializeOwned>(response: &Response) -> ClientResult<T> {
    if !response.is_success() {
        return Err(ClientError::Api {
            status: response.status,
            message: response_message(response),
        });
    }

    let envelope: Envelope<serde_json::Value> = response.json()?;
    if !envelope.status {
        return Err(ClientError::Rejected {
            message: envelope
                .message
                .unwrap_or_else(|| "request was not accepted".to_string()),
        });
    }

    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    Ok(serde_json::from_value(data)?)
}

/// Authenticated API client.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
    credentials: CredentialStore,
    notifier: Arc<dyn SessionNotifier>,
    auth: AuthApi,
    coordinator: RefreshCoordinator,
}

impl ApiClient {
    /// Assemble a client from its collaborators.
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn SessionNotifier>,
    ) -> Self {
        let credentials = CredentialStore::new(store);
        let auth = AuthApi::new(http.clone(), config.base_url.clone(), config.refresh_url());
        let coordinator = RefreshCoordinator::new(
            http.clone(),
            auth.clone(),
            credentials.clone(),
            notifier.clone(),
        );
        Self {
            http,
            config,
            credentials,
            notifier,
            auth,
            coordinator,
        }
    }

    /// Production client: reqwest transport, file store, console notifier.
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        let path = match config.storage_path.clone() {
            Some(path) => path,
            None => FileStore::default_path().ok_or_else(|| ClientError::Config {
                message: "cannot determine home directory for session storage".to_string(),
            })?,
        };
        let store = FileStore::open(path)?;
        Ok(Self::new(
            config,
            Arc::new(http),
            Arc::new(store),
            Arc::new(ConsoleNotifier::new()),
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn notifier(&self) -> &Arc<dyn SessionNotifier> {
        &self.notifier
    }

    pub fn auth_api(&self) -> &AuthApi {
        &self.auth
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    /// Send a request through the pipeline.
    ///
    /// Any status is returned as `Ok`; only a 401 on a request that has not
    /// been replayed yet is intercepted. If the refresh fails the error is
    /// the refresh failure.
    pub async fn send(&self, request: ApiRequest) -> ClientResult<Response> {
        let token = self.credentials.access_token();
        let request = authorize(request, token.as_deref());

        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.http.execute(&request).await?;

        if response.is_unauthorized() && !request.is_retried() {
            return self.coordinator.recover(request).await;
        }
        Ok(response)
    }

    /// GET `path` and decode the envelope payload.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(ApiRequest::get(self.url(path))).await?;
        decode(&response)
    }

    /// POST `body` as JSON to `path` and decode the envelope payload.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::post(self.url(path)).with_json(body)?;
        let response = self.send(request).await?;
        decode(&response)
    }

    /// PATCH `body` as JSON to `path` and decode the envelope payload.
    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::patch(self.url(path)).with_json(body)?;
        let response = self.send(request).await?;
        decode(&response)
    }

    /// DELETE `path`, discarding any payload.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.send(ApiRequest::delete(self.url(path))).await?;
        decode::<serde_json::Value>(&response).map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("coordinator", &self.coordinator)
            .finish()
    }
}
