//! Login cache trait
//!
//! The login cache stores one secret (a password during the login
//! handshake, an authorization token afterwards) per host address. The
//! login flow writes to it twice per login; the [`crate::credentials`]
//! adapter reads it on every outbound request.
//!
//! Implementations must be safe to call concurrently from multiple tasks.

use async_trait::async_trait;

use crate::host::HostAddress;

/// A login retrieved from the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLogin {
    /// Account name the secret belongs to
    pub user_name: String,
    /// The stored secret (password or authorization token)
    pub secret: String,
}

impl CachedLogin {
    /// Create a cached login record
    pub fn new(user_name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            secret: secret.into(),
        }
    }
}

/// Trait for login cache implementations
///
/// Absence of a stored login is `Ok(None)`, not an error; errors are
/// reserved for the storage layer itself failing.
#[async_trait]
pub trait LoginCache: Send + Sync {
    /// Get the login stored for a host, if any
    async fn get_login(&self, host: &HostAddress) -> Result<Option<CachedLogin>, crate::Error>;

    /// Store (or overwrite) the login for a host
    async fn save_login(
        &self,
        user_name: &str,
        secret: &str,
        host: &HostAddress,
    ) -> Result<(), crate::Error>;

    /// Remove the login stored for a host, if any
    async fn erase_login(&self, host: &HostAddress) -> Result<(), crate::Error>;
}
