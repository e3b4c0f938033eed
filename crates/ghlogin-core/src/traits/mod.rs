//! Collaborator interfaces consumed by the core
//!
//! This module defines the abstract interfaces the login flow and the
//! connection registry depend on.
//!
//! - [`LoginCache`]: secret storage keyed by host address
//! - [`ConnectionCache`]: persisted collection of known connections
//! - [`HostClient`]: the remote authorization/identity API
//! - [`TwoFactorChallengeHandler`]: out-of-band one-time-code prompts

pub mod connection_cache;
pub mod host_client;
pub mod login_cache;
pub mod two_factor;

pub use connection_cache::ConnectionCache;
pub use host_client::{
    Authorization, HostClient, NewAuthorization, TwoFactorChallenge, TwoFactorType, UserIdentity,
};
pub use login_cache::{CachedLogin, LoginCache};
pub use two_factor::{ChallengeResponse, TwoFactorChallengeHandler};
