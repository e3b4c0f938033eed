//! Login orchestration
//!
//! The [`LoginManager`] drives the authorization handshake against a
//! [`HostClient`]:
//!
//! 1. Cache the user's password provisionally, so the client (which
//!    resolves its credentials lazily from the same cache) can
//!    authenticate the authorization request
//! 2. Ask the host to create an application authorization
//! 3. On a two-factor challenge, consult the challenge handler and either
//!    retry with the supplied code or re-issue the request without one to
//!    make the host resend the code
//! 4. Replace the cached password with the issued token
//! 5. Fetch and return the authenticated identity
//!
//! The retry loop has no iteration cap; it terminates because a malformed
//! handler or host response (no outcome, blank token) fails fast instead
//! of looping.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::LoginConfig;
use crate::error::{Error, Result};
use crate::host::HostAddress;
use crate::traits::{
    Authorization, ChallengeResponse, HostClient, LoginCache, NewAuthorization,
    TwoFactorChallengeHandler, UserIdentity,
};

/// Orchestrates the login handshake and token persistence
pub struct LoginManager {
    login_cache: Arc<dyn LoginCache>,
    challenge_handler: Arc<dyn TwoFactorChallengeHandler>,
    config: LoginConfig,
}

impl LoginManager {
    /// Create a login manager
    ///
    /// Fails if the configuration is invalid (blank client id/secret,
    /// empty scope set).
    pub fn new(
        login_cache: Arc<dyn LoginCache>,
        challenge_handler: Arc<dyn TwoFactorChallengeHandler>,
        config: LoginConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            login_cache,
            challenge_handler,
            config,
        })
    }

    /// Log in to a host with a user name and password
    ///
    /// On success the issued token has replaced the password in the login
    /// cache and the authenticated identity is returned. Two-factor
    /// challenges are delegated to the challenge handler; an
    /// authentication rejection from the host surfaces unchanged.
    pub async fn login(
        &self,
        host: &HostAddress,
        client: &dyn HostClient,
        user_name: &str,
        password: &str,
    ) -> Result<UserIdentity> {
        if user_name.trim().is_empty() {
            return Err(Error::invalid_input("user name may not be blank"));
        }
        if password.trim().is_empty() {
            return Err(Error::invalid_input("password may not be blank"));
        }

        info!(host = %host, user = user_name, "logging in");

        // The client reads its credentials from the same cache, so the
        // password must be stored before the first authorization request.
        self.login_cache
            .save_login(user_name, password, host)
            .await?;

        let request = NewAuthorization {
            scopes: self.config.scopes.clone(),
            note: self.config.authorization_note.clone(),
            fingerprint: self.config.fingerprint.clone(),
        };

        let token = loop {
            match self
                .create_authorization(client, &request, None)
                .await
            {
                Ok(authorization) => break authorization_token(authorization)?,
                Err(Error::TwoFactorRequired(challenge)) => {
                    debug!(kind = ?challenge.kind, "two-factor challenge received");

                    let response = self
                        .challenge_handler
                        .handle_challenge(client, &challenge)
                        .await?
                        .ok_or_else(|| {
                            Error::invalid_operation(
                                "two-factor challenge handler returned no outcome",
                            )
                        })?;

                    match response {
                        ChallengeResponse::AuthenticationCode(code) => {
                            if code.trim().is_empty() {
                                return Err(Error::invalid_operation(
                                    "two-factor challenge handler returned a blank code",
                                ));
                            }
                            // Errors here (including a failed challenge)
                            // propagate rather than re-entering the loop.
                            let authorization = self
                                .create_authorization(client, &request, Some(&code))
                                .await?;
                            break authorization_token(authorization)?;
                        }
                        ChallengeResponse::ResendRequested => {
                            // Re-issuing the request without a code makes
                            // the host send a fresh one.
                            debug!("two-factor code resend requested");
                        }
                    }
                }
                Err(other) => return Err(other),
            }
        };

        self.login_cache.save_login(user_name, &token, host).await?;
        info!(host = %host, user = user_name, "authorization token cached");

        client.current_user().await
    }

    /// Resolve the identity for an already-cached login
    ///
    /// The client authenticates itself with whatever secret its credential
    /// store resolves; no handshake is performed.
    pub async fn login_from_cache(
        &self,
        _host: &HostAddress,
        client: &dyn HostClient,
    ) -> Result<UserIdentity> {
        client.current_user().await
    }

    /// Discard the cached login for a host
    pub async fn logout(&self, host: &HostAddress) -> Result<()> {
        debug!(host = %host, "erasing cached login");
        self.login_cache.erase_login(host).await
    }

    async fn create_authorization(
        &self,
        client: &dyn HostClient,
        request: &NewAuthorization,
        otp_code: Option<&str>,
    ) -> Result<Authorization> {
        client
            .create_authorization(
                &self.config.client_id,
                &self.config.client_secret,
                request,
                otp_code,
            )
            .await
    }
}

/// Extract the token, treating an empty one as a protocol violation
///
/// A misbehaving client (a mock set up wrong, a broken proxy) that keeps
/// producing tokenless authorizations would otherwise spin the retry loop
/// forever.
fn authorization_token(authorization: Authorization) -> Result<String> {
    if authorization.token.trim().is_empty() {
        return Err(Error::invalid_operation(
            "remote host returned an authorization without a token",
        ));
    }
    Ok(authorization.token)
}
