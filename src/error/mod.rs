//! Error handling for the folio client.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Auth Errors**: Sign-in, refresh and session failures
//! - **Unified Error Type**: `ClientError` consolidates transport, auth,
//!   API and storage failures
//!
//! Transport-level (`HttpError`) and storage-level (`StorageError`) errors
//! live next to their traits in [`crate::traits`].
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Auth | Session expired or refresh failed | No |
//! | Server | Backend errors (5xx) | Yes |
//! | Client | Rejected or malformed requests | No |
//! | System | Local storage errors | No |
//! | Configuration | Bad settings | No |

mod auth;
mod category;
mod client_error;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use client_error::ClientError;

/// Result alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;
