//! Concrete implementations of trait abstractions.
//!
//! Production adapters implement the traits defined in `crate::traits`;
//! the [`mock`] submodule provides test doubles for each of them.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`FileStore`] - JSON-file key-value store
//! - [`ConsoleNotifier`] - session teardown reported on stderr
//!
//! # Mock Implementations
//!
//! - [`mock::MockHttpClient`] - Scripted HTTP responses
//! - [`mock::InMemoryStore`] - In-memory key-value store
//! - [`mock::RecordingNotifier`] - Records teardowns

pub mod console_notifier;
pub mod file_store;
pub mod mock;
pub mod reqwest_http;

pub use console_notifier::ConsoleNotifier;
pub use file_store::FileStore;
pub use mock::{InMemoryStore, MockHttpClient, RecordingNotifier};
pub use reqwest_http::ReqwestHttpClient;
