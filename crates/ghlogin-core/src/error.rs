//! Error types for the login and connection-registry core
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

use crate::traits::host_client::TwoFactorChallenge;

/// Result type alias for login operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the login system
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was blank or otherwise unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A connection with the same host address is already registered
    #[error("a connection to '{0}' already exists")]
    DuplicateConnection(String),

    /// A collaborator returned a result that would break the login
    /// state machine (absent challenge response, empty authorization)
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// The remote host requires a one-time code for this authorization
    #[error("two-factor authentication required")]
    TwoFactorRequired(TwoFactorChallenge),

    /// The remote host rejected the supplied credentials
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Login cache (secret store) errors
    #[error("login cache error: {0}")]
    LoginCache(String),

    /// Connection cache errors
    #[error("connection cache error: {0}")]
    ConnectionCache(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors from cache files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a duplicate connection error for a host
    pub fn duplicate_connection(host: impl Into<String>) -> Self {
        Self::DuplicateConnection(host.into())
    }

    /// Create an invalid operation error
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a login cache error
    pub fn login_cache(msg: impl Into<String>) -> Self {
        Self::LoginCache(msg.into())
    }

    /// Create a connection cache error
    pub fn connection_cache(msg: impl Into<String>) -> Self {
        Self::ConnectionCache(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error is a two-factor challenge
    pub fn is_two_factor_required(&self) -> bool {
        matches!(self, Self::TwoFactorRequired(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
