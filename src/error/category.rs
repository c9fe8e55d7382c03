//! Coarse error classes used by the CLI to pick an exit hint.

use std::fmt;

/// Which side of the portfolio API an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The API could not be reached or did not answer in time.
    Network,

    /// The stored session is gone or was never there.
    Auth,

    /// The API answered with a 5xx.
    Server,

    /// The API refused the call: a 4xx other than 401, a `status: false`
    /// envelope, or a payload that did not decode.
    Client,

    /// The session file could not be read or written.
    System,

    /// A `FOLIO_*` variable or the base URL is unusable.
    Configuration,
}

impl ErrorCategory {
    /// Transport failures and 5xx answers may succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// One-line next step printed by the CLI after the error message.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Is the API reachable? Check FOLIO_API_URL and your connection",
            ErrorCategory::Auth => "Run `folio login <email> <password>` to sign in again",
            ErrorCategory::Server => "The portfolio API failed; try again shortly",
            ErrorCategory::Client => "The API rejected the request; check the id or input",
            ErrorCategory::System => "Check that the session file is writable (FOLIO_STORAGE_PATH)",
            ErrorCategory::Configuration => "Fix the FOLIO_* environment variables and retry",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_and_server_failures_retry() {
        let retryable: Vec<ErrorCategory> = [
            ErrorCategory::Network,
            ErrorCategory::Auth,
            ErrorCategory::Server,
            ErrorCategory::Client,
            ErrorCategory::System,
            ErrorCategory::Configuration,
        ]
        .into_iter()
        .filter(ErrorCategory::is_retryable)
        .collect();

        assert_eq!(retryable, vec![ErrorCategory::Network, ErrorCategory::Server]);
    }

    #[test]
    fn test_auth_hint_points_at_login() {
        assert!(ErrorCategory::Auth.recovery_hint().contains("folio login"));
        assert!(ErrorCategory::System.recovery_hint().contains("FOLIO_STORAGE_PATH"));
    }

    #[test]
    fn test_log_label() {
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }
}
