//! Authentication for the folio client.
//!
//! This module provides:
//! - Persisted credentials and their storage keys
//! - The request decorator that attaches the bearer token
//! - The auth endpoints (sign-in, token refresh)
//! - The refresh coordinator (single-flight refresh with request replay)
//! - Session lifecycle operations

pub mod api;
pub mod coordinator;
pub mod credentials;
pub mod decorator;
pub mod session;

pub use api::{AuthApi, SignInData};
pub use coordinator::{CoordinatorState, RefreshCoordinator};
pub use credentials::{CredentialPair, CredentialStore};
pub use decorator::authorize;
pub use session::{SessionManager, SessionStatus};
