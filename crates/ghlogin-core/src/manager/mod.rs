//! Connection registry
//!
//! The [`ConnectionManager`] owns the in-memory list of known connections,
//! keeps it synchronized with a [`ConnectionCache`], and publishes
//! add/remove notifications to subscribers.
//!
//! ## Event flow
//!
//! 1. `initialize()` loads the persisted list and publishes one `Added`
//!    batch for everything loaded
//! 2. `add()` / `remove()` mutate the in-memory list, publish the affected
//!    entry, then persist the full list
//!
//! ## Ordering
//!
//! The notification is published before the cache write is awaited, so a
//! subscriber can observe the in-memory change before it is durable. If
//! the cache write then fails, the error propagates to the caller even
//! though registry and subscribers already moved on. A stricter design
//! would persist first and notify after; the registry deliberately keeps
//! the original ordering.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, info};

use crate::connection::ConnectionDetails;
use crate::error::{Error, Result};
use crate::host::HostAddress;
use crate::traits::ConnectionCache;

/// Capacity of the notification channel; lagging subscribers miss events
/// rather than blocking mutations.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications published by the registry
///
/// Each notification carries the exact, ordered, non-empty batch affected
/// by the single operation that triggered it: one entry for `add`/`remove`,
/// the whole loaded batch for `initialize`. Subscribers must not assume at
/// most one entry per notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Connections appended to the registry
    Added(Vec<ConnectionDetails>),
    /// Connections removed from the registry
    Removed(Vec<ConnectionDetails>),
}

/// Maintains the list of known connections, backed by a cache
pub struct ConnectionManager {
    cache: Arc<dyn ConnectionCache>,
    inner: RwLock<Vec<ConnectionDetails>>,
    events: broadcast::Sender<ConnectionEvent>,
}

impl ConnectionManager {
    /// Create an empty registry backed by the given cache
    pub fn new(cache: Arc<dyn ConnectionCache>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            cache,
            inner: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Subscribe to registry notifications
    ///
    /// Events published before the call are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.events.subscribe()
    }

    /// Subscribe to registry notifications as a `Stream`
    pub fn event_stream(&self) -> BroadcastStream<ConnectionEvent> {
        BroadcastStream::new(self.events.subscribe())
    }

    /// Snapshot of the registry, in insertion order
    pub async fn connections(&self) -> Vec<ConnectionDetails> {
        self.inner.read().await.clone()
    }

    /// Load the persisted connections into the (expected-empty) registry
    ///
    /// A cache load failure is logged and swallowed: the registry stays
    /// empty and initialization never fails. A non-empty load publishes a
    /// single `Added` batch in cache order.
    pub async fn initialize(&self) {
        match self.cache.load().await {
            Ok(connections) => {
                debug!(count = connections.len(), "loaded connection cache");
                self.inner.write().await.extend(connections.iter().cloned());
                if !connections.is_empty() {
                    self.publish(ConnectionEvent::Added(connections));
                }
            }
            Err(e) => {
                error!(error = %e, "failed to load connection cache");
            }
        }
    }

    /// Register a new connection
    ///
    /// Fails with [`Error::DuplicateConnection`] before any mutation if the
    /// host is already registered. Otherwise appends the entry, publishes
    /// it, persists the updated registry and returns it. A persistence
    /// failure propagates after the in-memory mutation and notification
    /// have already happened (see module docs).
    pub async fn add(&self, address: HostAddress, user_name: &str) -> Result<ConnectionDetails> {
        if user_name.trim().is_empty() {
            return Err(Error::invalid_input("user name may not be blank"));
        }

        let connection = ConnectionDetails::new(address, user_name);

        let snapshot = {
            let mut inner = self.inner.write().await;
            if inner
                .iter()
                .any(|c| c.host_address == connection.host_address)
            {
                return Err(Error::duplicate_connection(connection.host_address.host()));
            }
            inner.push(connection.clone());
            inner.clone()
        };

        info!(host = %connection.host_address, user = %connection.user_name, "connection added");
        self.publish(ConnectionEvent::Added(vec![connection.clone()]));

        self.cache.save(&snapshot).await?;
        Ok(connection)
    }

    /// Remove the connection registered for a host
    ///
    /// Returns `Ok(false)` without any notification or cache write when the
    /// host is not registered.
    pub async fn remove(&self, address: &HostAddress) -> Result<bool> {
        let (removed, snapshot) = {
            let mut inner = self.inner.write().await;
            match inner.iter().position(|c| &c.host_address == address) {
                Some(index) => {
                    let removed = inner.remove(index);
                    (removed, inner.clone())
                }
                None => return Ok(false),
            }
        };

        info!(host = %removed.host_address, "connection removed");
        self.publish(ConnectionEvent::Removed(vec![removed]));

        self.cache.save(&snapshot).await?;
        Ok(true)
    }

    /// Whether a connection is registered for the host
    pub async fn exists(&self, address: &HostAddress) -> bool {
        self.find(address).await.is_some()
    }

    /// Find the connection registered for the host
    pub async fn find(&self, address: &HostAddress) -> Option<ConnectionDetails> {
        self.inner
            .read()
            .await
            .iter()
            .find(|c| &c.host_address == address)
            .cloned()
    }

    fn publish(&self, event: ConnectionEvent) {
        // Send only fails when there are no subscribers, which is fine.
        let _ = self.events.send(event);
    }
}
