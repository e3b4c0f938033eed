// # ghlogin-core
//
// Core library for githost login orchestration and the connection
// registry.
//
// ## Architecture Overview
//
// - **HostAddress / ConnectionDetails**: canonical value types
// - **LoginCache / ConnectionCache**: persistence collaborator traits,
//   with in-memory and JSON-file implementations
// - **HostClient / TwoFactorChallengeHandler**: the remote API and the
//   out-of-band code prompt, both supplied by the embedder
// - **ConnectionManager**: registry of known connections, synchronized
//   with its cache and publishing add/remove notifications
// - **LoginManager**: the authorization handshake, including two-factor
//   retry and token persistence
// - **CredentialStore**: resolves a client's credentials from the login
//   cache, degrading to anonymous
//
// ## Design Principles
//
// 1. **Collaborators are explicit**: every component takes its caches,
//    client and handler as constructor parameters
// 2. **Single-writer**: one logical flow of sequential async operations;
//    no cross-process coordination over the cache files
// 3. **Degrade on the load path, surface on the save path**: cache reads
//    never fail a caller, cache writes may

pub mod cache;
pub mod config;
pub mod connection;
pub mod credentials;
pub mod error;
pub mod host;
pub mod login;
pub mod manager;
pub mod traits;

// Re-export core types for convenience
pub use cache::{FileLoginCache, JsonConnectionCache, MemoryConnectionCache, MemoryLoginCache};
pub use config::LoginConfig;
pub use connection::ConnectionDetails;
pub use credentials::{CredentialStore, Credentials};
pub use error::{Error, Result};
pub use host::HostAddress;
pub use login::LoginManager;
pub use manager::{ConnectionEvent, ConnectionManager};
pub use traits::{ConnectionCache, HostClient, LoginCache, TwoFactorChallengeHandler};
