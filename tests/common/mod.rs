//! Common test utilities for integration tests.
//!
//! Provides a client wired to the mock transport, an in-memory store and a
//! recording notifier, plus canned auth responses.
//!
//! # Example
//!
//! ```ignore
//! let t = TestClient::signed_in();
//! t.mock.set_response(REFRESH_URL, refresh_ok("T2", "R2"));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use folio::auth::CoordinatorState;
use folio::{ApiClient, ClientConfig};

/// Base URL the mock transport answers for.
pub const BASE_URL: &str = "http://api.test";

/// Refresh endpoint under [`BASE_URL`].
pub const REFRESH_URL: &str = "http://api.test/api/auth/refresh-token";

/// A client plus handles on its collaborators.
pub struct TestClient {
    pub mock: MockHttpClient,
    pub store: InMemoryStore,
    pub notifier: RecordingNotifier,
    pub client: Arc<ApiClient>,
}

impl TestClient {
    /// Client over a store holding `entries`.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let mock = MockHttpClient::new();
        let store = InMemoryStore::with_entries(entries);
        let notifier = RecordingNotifier::new();
        let client = ApiClient::new(
            ClientConfig::new().with_base_url(BASE_URL),
            Arc::new(mock.clone()),
            Arc::new(store.clone()),
            Arc::new(notifier.clone()),
        );
        Self {
            mock,
            store,
            notifier,
            client: Arc::new(client),
        }
    }

    /// Client holding access token `T1`, refresh token `R1` and a user.
    pub fn signed_in() -> Self {
        Self::with_entries(&[
            ("access_token", "T1"),
            ("refresh_token", "R1"),
            ("user", r#"{"email":"admin@example.com"}"#),
        ])
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", BASE_URL, path)
    }

    pub fn state(&self) -> CoordinatorState {
        self.client.coordinator().state()
    }

    /// Yield until `queued` callers wait on the running episode.
    pub async fn wait_for_queue(&self, queued: usize) {
        while self.state() != (CoordinatorState::Refreshing { queued }) {
            tokio::task::yield_now().await;
        }
    }

    /// Stored value for `key`.
    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.snapshot().get(key).cloned()
    }
}
