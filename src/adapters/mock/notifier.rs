//! Recording session notifier for testing.

use std::sync::{Arc, Mutex};

use crate::traits::{SessionNotifier, TeardownReason};

/// Notifier that records every teardown it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    reasons: Arc<Mutex<Vec<TeardownReason>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of teardowns received.
    pub fn count(&self) -> usize {
        self.reasons.lock().unwrap().len()
    }

    /// All received reasons, oldest first.
    pub fn reasons(&self) -> Vec<TeardownReason> {
        self.reasons.lock().unwrap().clone()
    }
}

impl SessionNotifier for RecordingNotifier {
    fn session_terminated(&self, reason: &TeardownReason) {
        self.reasons.lock().unwrap().push(reason.clone());
    }
}
