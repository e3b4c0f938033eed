//! Connection cache trait
//!
//! The connection cache persists the full list of known connections. The
//! registry loads it once at startup and rewrites the whole list after
//! every mutation; order must be preserved round-trip.

use async_trait::async_trait;

use crate::connection::ConnectionDetails;

/// Trait for connection cache implementations
#[async_trait]
pub trait ConnectionCache: Send + Sync {
    /// Load all persisted connections, in storage order
    async fn load(&self) -> Result<Vec<ConnectionDetails>, crate::Error>;

    /// Persist the given connections, replacing the previous contents
    async fn save(&self, connections: &[ConnectionDetails]) -> Result<(), crate::Error>;
}
