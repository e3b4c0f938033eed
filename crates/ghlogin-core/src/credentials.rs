//! Credential resolution for remote clients
//!
//! A [`CredentialStore`] is handed to a [`crate::traits::HostClient`]
//! implementation at construction time and resolves the credentials for
//! every outbound request from the login cache. Resolution never fails:
//! requests made before any login has completed (the authorization
//! handshake itself, rate-limit probes) proceed anonymously.

use std::sync::Arc;

use tracing::debug;

use crate::host::HostAddress;
use crate::traits::LoginCache;

/// Credentials a remote client authenticates with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials; unauthenticated requests
    Anonymous,
    /// User name plus secret (password during the handshake, token after)
    Basic {
        /// Account name
        user_name: String,
        /// Password or authorization token
        password: String,
    },
}

/// Resolves credentials for one host from the login cache
pub struct CredentialStore {
    host: HostAddress,
    login_cache: Arc<dyn LoginCache>,
}

impl CredentialStore {
    /// Create a credential store for a host
    pub fn new(host: HostAddress, login_cache: Arc<dyn LoginCache>) -> Self {
        Self { host, login_cache }
    }

    /// The host this store resolves credentials for
    pub fn host(&self) -> &HostAddress {
        &self.host
    }

    /// Resolve the current credentials
    ///
    /// An absent login or a cache failure (logged) resolves to
    /// [`Credentials::Anonymous`] rather than an error.
    pub async fn get_credentials(&self) -> Credentials {
        match self.login_cache.get_login(&self.host).await {
            Ok(Some(login)) => Credentials::Basic {
                user_name: login.user_name,
                password: login.secret,
            },
            Ok(None) => Credentials::Anonymous,
            Err(e) => {
                debug!(host = %self.host, error = %e, "login cache read failed, using anonymous credentials");
                Credentials::Anonymous
            }
        }
    }
}
