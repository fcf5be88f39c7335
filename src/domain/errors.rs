//! Domain error types
//!
//! This module defines the error hierarchy for Salesledger. Upstream failures
//! are split into transport failures ([`FetchError`]) and payload failures
//! ([`DecodeError`]). Neither exposes third-party error types.

use thiserror::Error;

/// Main Salesledger error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A page request failed at the transport level
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A page payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Report output errors
    #[error("Output error: {0}")]
    Output(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Transport-level failures while requesting a resource page
///
/// Any of these aborts the collection of the resource it occurred on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not reach the API
    #[error("Failed to connect to retail API: {0}")]
    ConnectionFailed(String),

    /// 401 from the API
    #[error("Access denied for {resource} - check personal API token")]
    Unauthorized { resource: String },

    /// 404 from the API
    #[error("URL not found for {resource} - check domain prefix")]
    NotFound { resource: String },

    /// 429 from the API
    #[error("Rate limited by the retail API while fetching {resource}")]
    RateLimited { resource: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx other than 401/404/429)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// A non-empty page did not move the cursor forward
    #[error("Cursor for {resource} did not advance: requested after {cursor}, page reported max {reported}")]
    CursorStalled {
        resource: String,
        cursor: i64,
        reported: i64,
    },
}

impl FetchError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::ConnectionFailed(_)
                | FetchError::Timeout(_)
                | FetchError::RateLimited { .. }
                | FetchError::ServerError { .. }
        )
    }
}

/// Failures decoding a page payload
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not a valid page for this resource
    #[error("Invalid {resource} page after cursor {cursor}: {message}")]
    InvalidPayload {
        resource: String,
        cursor: i64,
        message: String,
    },

    /// A page carried data but no `version.max`
    #[error("{resource} page after cursor {cursor} has data but no version.max")]
    MissingCursor { resource: String, cursor: i64 },
}

// Conversion from std::io::Error
impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::Output(err.to_string())
    }
}
