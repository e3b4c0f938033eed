// # Memory caches
//
// In-memory implementations of LoginCache and ConnectionCache.
//
// Nothing persists across restarts; first use after a restart sees an
// empty cache. Useful for tests, demos, and embedders that manage
// persistence themselves.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::connection::ConnectionDetails;
use crate::host::HostAddress;
use crate::traits::connection_cache::ConnectionCache;
use crate::traits::login_cache::{CachedLogin, LoginCache};

/// In-memory login cache
///
/// Stores one login per credential-cache key in a `HashMap` behind a
/// `RwLock`. Cheap to clone; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoginCache {
    inner: Arc<RwLock<HashMap<String, CachedLogin>>>,
}

impl MemoryLoginCache {
    /// Create an empty login cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored logins
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Remove all stored logins
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

#[async_trait]
impl LoginCache for MemoryLoginCache {
    async fn get_login(&self, host: &HostAddress) -> Result<Option<CachedLogin>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.get(&host.credential_cache_key()).cloned())
    }

    async fn save_login(
        &self,
        user_name: &str,
        secret: &str,
        host: &HostAddress,
    ) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.insert(
            host.credential_cache_key(),
            CachedLogin::new(user_name, secret),
        );
        Ok(())
    }

    async fn erase_login(&self, host: &HostAddress) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.remove(&host.credential_cache_key());
        Ok(())
    }
}

/// In-memory connection cache
///
/// Holds the persisted-list snapshot in a `Vec` behind a `RwLock`,
/// preserving save order.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnectionCache {
    inner: Arc<RwLock<Vec<ConnectionDetails>>>,
}

impl MemoryConnectionCache {
    /// Create an empty connection cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-seeded with connections
    pub fn with_connections(connections: Vec<ConnectionDetails>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(connections)),
        }
    }
}

#[async_trait]
impl ConnectionCache for MemoryConnectionCache {
    async fn load(&self) -> Result<Vec<ConnectionDetails>, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, connections: &[ConnectionDetails]) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        *guard = connections.to_vec();
        Ok(())
    }
}
