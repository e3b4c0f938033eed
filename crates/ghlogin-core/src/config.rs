//! Configuration types for the login system
//!
//! The [`LoginConfig`] describes the registered OAuth application on whose
//! behalf authorizations are created: client id/secret, the scope set to
//! request, and the optional note and machine fingerprint recorded with
//! each authorization.

use serde::{Deserialize, Serialize};

/// Scopes requested for every authorization created by the login flow
pub const DEFAULT_SCOPES: [&str; 4] = ["user", "repo", "gist", "write:public_key"];

/// Application-level login configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    /// The application's client API id
    pub client_id: String,

    /// The application's client API secret
    pub client_secret: String,

    /// Human-readable note stored with created authorizations
    #[serde(default)]
    pub authorization_note: Option<String>,

    /// Machine fingerprint stored with created authorizations
    #[serde(default)]
    pub fingerprint: Option<String>,

    /// Scopes to request
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
}

impl LoginConfig {
    /// Create a configuration with the default scope set
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorization_note: None,
            fingerprint: None,
            scopes: default_scopes(),
        }
    }

    /// Set the authorization note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.authorization_note = Some(note.into());
        self
    }

    /// Set the machine fingerprint
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.client_id.trim().is_empty() {
            return Err(crate::Error::config("client id cannot be blank"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(crate::Error::config("client secret cannot be blank"));
        }
        if self.scopes.is_empty() {
            return Err(crate::Error::config("scope set cannot be empty"));
        }
        Ok(())
    }
}
