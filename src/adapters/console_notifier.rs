//! Terminal session-teardown notifier.
//!
//! The CLI has no login page to redirect to; its unauthenticated entry point
//! is `folio login`, so teardown prints a hint pointing there.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::traits::{SessionNotifier, TeardownReason};

/// Notifier that reports teardown on stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    terminated: AtomicBool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a teardown has been reported during this process.
    pub fn was_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}

impl SessionNotifier for ConsoleNotifier {
    fn session_terminated(&self, reason: &TeardownReason) {
        self.terminated.store(true, Ordering::SeqCst);
        match reason {
            TeardownReason::LoggedOut => eprintln!("Signed out."),
            _ => {
                warn!(reason = %reason.describe(), "session terminated");
                eprintln!("Session ended: {}.", reason.describe());
                eprintln!("Run `folio login <email> <password>` to sign in again.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[test]
    fn test_records_termination() {
        let notifier = ConsoleNotifier::new();
        assert!(!notifier.was_terminated());
        notifier.session_terminated(&TeardownReason::RefreshFailed(
            AuthError::MissingRefreshToken,
        ));
        assert!(notifier.was_terminated());
    }
}
