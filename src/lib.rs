//! folio - authenticated API client for the portfolio admin
//!
//! Attaches the stored bearer token to every request and recovers from
//! expired sessions with a single-flight token refresh that replays every
//! request rejected while it was in flight.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod portfolio;
pub mod traits;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
