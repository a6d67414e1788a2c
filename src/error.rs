// src/error.rs
// =============================================================================
// Error types for the link checker.
//
// Only two kinds of error ever reach a caller:
// - ConfigError: the options make no sense (zero timeout, zero concurrency...)
// - InitError: the HTTP client or the logger could not be set up
//
// TransportError never leaves the crate's check path. It describes why one
// HTTP exchange failed and gets folded into a FailureKind, because an
// unreachable URL is data, not a failure of the batch.
// =============================================================================

use thiserror::Error;

/// Rejected configuration. Reported before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },

    #[error("max_concurrent_checks must be greater than zero")]
    ZeroConcurrency,

    #[error("batch_deadline, when set, must be greater than zero")]
    ZeroDeadline,

    #[error("user_agent must not be empty")]
    EmptyUserAgent,
}

/// Failure to build the long-lived pieces (HTTP client, logger).
#[derive(Error, Debug)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client initialization error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("logger initialization error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Why a single HTTP exchange did not produce a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connect or response wait exceeded its configured duration
    #[error("timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, TLS handshake failure
    #[error("connection failed: {0}")]
    Connect(String),

    /// The exchange started but broke (reset, malformed response...)
    #[error("request failed: {0}")]
    Request(String),

    /// Anything the transport did not expect, e.g. a request it could not build
    #[error("unexpected transport error: {0}")]
    Unexpected(String),
}

impl TransportError {
    /// Ordinary network trouble, as opposed to something that smells like a bug.
    pub fn is_expected(&self) -> bool {
        !matches!(self, TransportError::Unexpected(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    // Timeout is checked first: a connect timeout is both is_timeout()
    // and is_connect(), and it must count as a timeout
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_timeout() {
            TransportError::Timeout(message)
        } else if error.is_connect() {
            TransportError::Connect(message)
        } else if error.is_request() || error.is_body() || error.is_decode() {
            TransportError::Request(message)
        } else {
            TransportError::Unexpected(message)
        }
    }
}
