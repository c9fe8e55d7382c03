//! Session-teardown notification trait.
//!
//! When the session ends (explicit logout, or a refresh episode that could
//! not recover) the rest of the application has to drop back to its
//! unauthenticated entry point. The notifier is that hook.

use crate::error::AuthError;

/// Why the session was torn down.
#[derive(Debug, Clone)]
pub enum TeardownReason {
    /// The user logged out.
    LoggedOut,
    /// The server no longer accepts the stored session.
    SessionInvalid,
    /// A refresh episode failed; carries the refresh failure.
    RefreshFailed(AuthError),
}

impl TeardownReason {
    /// Short description for logs and terminal output.
    pub fn describe(&self) -> String {
        match self {
            TeardownReason::LoggedOut => "logged out".to_string(),
            TeardownReason::SessionInvalid => "session is no longer valid".to_string(),
            TeardownReason::RefreshFailed(err) => err.to_string(),
        }
    }
}

/// Receives session-teardown notifications.
pub trait SessionNotifier: Send + Sync {
    /// Called once per teardown, after stored credentials have been cleared.
    fn session_terminated(&self, reason: &TeardownReason);
}
