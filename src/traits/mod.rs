//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport
//! - [`KeyValueStore`] - Durable key-value storage for the session
//! - [`SessionNotifier`] - Session-teardown hook

pub mod http;
pub mod session;
pub mod storage;

pub use http::{ApiRequest, Headers, HttpClient, HttpError, Method, Response, AUTHORIZATION};
pub use session::{SessionNotifier, TeardownReason};
pub use storage::{KeyValueStore, StorageError};
