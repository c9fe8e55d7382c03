//! Mock adapters for testing.
//!
//! - [`MockHttpClient`]: scripted transport with request recording
//! - [`InMemoryStore`]: in-memory key-value store
//! - [`RecordingNotifier`]: records session teardowns

mod http;
mod notifier;
mod store;

pub use http::{MockGate, MockHttpClient, MockResponse};
pub use notifier::RecordingNotifier;
pub use store::InMemoryStore;
