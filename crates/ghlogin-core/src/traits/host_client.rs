//! Remote client trait
//!
//! [`HostClient`] is the narrow view of a githost API client the login
//! flow needs: create an application authorization and fetch the current
//! authenticated identity. Implementing a real HTTP client is out of scope
//! for this crate; embedders supply one and it resolves its own
//! credentials lazily through [`crate::credentials::CredentialStore`].
//!
//! A host that requires a one-time code rejects the authorization request
//! with [`crate::Error::TwoFactorRequired`], carrying the challenge that
//! is then passed to the [`crate::traits::TwoFactorChallengeHandler`].

use async_trait::async_trait;

/// Request payload for creating an application authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthorization {
    /// Scopes the authorization grants
    pub scopes: Vec<String>,
    /// Human-readable note stored with the authorization
    pub note: Option<String>,
    /// Machine fingerprint stored with the authorization
    pub fingerprint: Option<String>,
}

/// A token-bearing authorization issued by the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    /// The issued token
    pub token: String,
}

impl Authorization {
    /// Create an authorization carrying a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// The authenticated account identity reported by the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Account login name
    pub login: String,
    /// Display name, if the account has one
    pub name: Option<String>,
    /// Public email, if the account exposes one
    pub email: Option<String>,
}

impl UserIdentity {
    /// Create an identity with only a login name
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: None,
            email: None,
        }
    }
}

/// Delivery channel of a two-factor one-time code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwoFactorType {
    /// The host did not say how the code is delivered
    #[default]
    Unknown,
    /// Code delivered by text message
    Sms,
    /// Code generated by an authenticator application
    AuthenticatorApp,
}

/// The challenge raised when a host requires a one-time code
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TwoFactorChallenge {
    /// How the code reaches the user
    pub kind: TwoFactorType,
    /// Host-provided message accompanying the challenge, if any
    pub message: Option<String>,
}

impl TwoFactorChallenge {
    /// Create a challenge of the given kind
    pub fn new(kind: TwoFactorType) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

/// Trait for remote githost clients
///
/// Requests are made with whatever credentials the client resolves for
/// itself; during a login handshake that is the provisional password the
/// flow has just cached.
#[async_trait]
pub trait HostClient: Send + Sync {
    /// Create (or fetch-or-create) an application authorization
    ///
    /// # Parameters
    ///
    /// - `client_id` / `client_secret`: the registered application
    /// - `request`: scopes, note and fingerprint for the authorization
    /// - `otp_code`: one-time code answering a previous challenge, if any
    ///
    /// # Errors
    ///
    /// - [`crate::Error::TwoFactorRequired`]: a one-time code is needed
    /// - [`crate::Error::Authentication`]: the credentials were rejected
    async fn create_authorization(
        &self,
        client_id: &str,
        client_secret: &str,
        request: &NewAuthorization,
        otp_code: Option<&str>,
    ) -> Result<Authorization, crate::Error>;

    /// Fetch the currently authenticated identity
    async fn current_user(&self) -> Result<UserIdentity, crate::Error>;
}
