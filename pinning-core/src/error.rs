//! Error types for pinning providers.
//!
//! This module provides the error hierarchy shared by every provider using `thiserror`.
//! Messages that originate from the remote service are displayed verbatim so callers
//! can match on exactly what the service reported.

use thiserror::Error;

/// Result type alias using `PinningError`.
pub type Result<T> = std::result::Result<T, PinningError>;

/// Main error type for all pinning operations.
#[derive(Debug, Error)]
pub enum PinningError {
    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response was received (network, DNS, TLS).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The service answered a write request with a non-2xx status.
    ///
    /// Carries the status line, e.g. `401 Unauthorized`.
    #[error("{0}")]
    HttpStatus(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // RESPONSE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The body looked like JSON but could not be decoded. Carries the raw body.
    #[error("{0}")]
    MalformedResponse(String),

    /// The service reported an `error` field in an otherwise well-formed body.
    #[error("{0}")]
    Api(String),

    /// A field required by the operation was absent from the response.
    #[error("missing field '{0}' in response")]
    MissingField(&'static str),

    /// A numeric field could not be parsed as an unsigned 64-bit integer.
    #[error("invalid number in field '{field}': {value:?}")]
    InvalidNumber {
        /// Response field holding the value
        field: &'static str,
        /// Raw value as sent by the service
        value: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // PROVIDER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Credentials were rejected or the liveness check did not succeed.
    #[error("{0}")]
    Authentication(String),

    /// No pinned content matched the requested hash.
    #[error("unknown content")]
    UnknownContent,

    /// More than one pinned item matched the requested hash.
    #[error("multiple matching contents")]
    MultipleMatchingContents,

    /// An upload completed without the service returning a content hash.
    #[error("no hash returned")]
    NoHashReturned,

    /// The input could not be interpreted as any known content address format.
    #[error("unrecognised format")]
    UnrecognisedFormat,

    // ═══════════════════════════════════════════════════════════════════════════
    // LOCAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Reading upload content failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PinningError {
    /// Returns true if this error is transient and the call may be retried by the caller.
    ///
    /// Providers never retry on their own.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PinningError::HttpError(_) => true,
            PinningError::HttpStatus(status) => status.starts_with('5'),
            _ => false,
        }
    }

    /// Returns true if the error means the requested content does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PinningError::UnknownContent)
    }

    /// Returns true if the remote service rejected the request itself.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            PinningError::Api(_) | PinningError::HttpStatus(_) | PinningError::Authentication(_)
        )
    }
}
