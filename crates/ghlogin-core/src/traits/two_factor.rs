//! Two-factor challenge handler trait
//!
//! The handler owns the out-of-band part of a two-factor login: prompting
//! the user for a one-time code, or relaying a request to have the host
//! resend it. Its I/O may block on user input for arbitrarily long; the
//! login flow awaits it once per challenge.

use async_trait::async_trait;

use crate::traits::host_client::{HostClient, TwoFactorChallenge};

/// Outcome of handling a single two-factor challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeResponse {
    /// The user supplied a one-time code
    AuthenticationCode(String),
    /// The user asked for the code to be re-sent
    ResendRequested,
}

/// Trait for two-factor challenge handlers
///
/// Returning `Ok(None)` means the handler produced no outcome at all; the
/// login flow treats that as a programming error and fails fast rather
/// than re-issuing the challenge forever.
#[async_trait]
pub trait TwoFactorChallengeHandler: Send + Sync {
    /// Handle a challenge raised during authorization creation
    async fn handle_challenge(
        &self,
        client: &dyn HostClient,
        challenge: &TwoFactorChallenge,
    ) -> Result<Option<ChallengeResponse>, crate::Error>;
}
