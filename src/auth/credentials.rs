//! Persisted session credentials.
//!
//! The session lives in the key-value store under three fixed keys. Only
//! login, a successful refresh, and logout/teardown write them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::traits::{KeyValueStore, StorageError};

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Storage key of the signed-in user's JSON.
pub const USER_KEY: &str = "user";

/// An access token together with the refresh token that renews it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens stay out of logs.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Typed access to the session entries of a [`KeyValueStore`].
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// The stored refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    /// Whether an access token is present.
    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// Replace both tokens in one store update.
    pub fn store_pair(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        self.store.set_many(&[
            (ACCESS_TOKEN_KEY, &pair.access_token),
            (REFRESH_TOKEN_KEY, &pair.refresh_token),
        ])
    }

    /// Store a freshly signed-in session: both tokens and the user.
    pub fn store_session(
        &self,
        pair: &CredentialPair,
        user: &serde_json::Value,
    ) -> Result<(), StorageError> {
        let user = serde_json::to_string(user)?;
        self.store.set_many(&[
            (ACCESS_TOKEN_KEY, &pair.access_token),
            (REFRESH_TOKEN_KEY, &pair.refresh_token),
            (USER_KEY, &user),
        ])
    }

    /// The stored user. An unparseable entry reads as absent.
    pub fn user(&self) -> Option<serde_json::Value> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Remove every session entry.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store
            .remove_many(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY])
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_access_token", &self.has_access_token())
            .finish()
    }
}
