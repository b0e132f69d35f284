//! In-memory ClientDirectory implementation
//!
//! The registry lives behind one `tokio::sync::Mutex`. Fan-out only enqueues
//! into bounded outboxes and never awaits while the lock is held, so a slow
//! peer cannot hold up other handlers waiting for the lock.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientDirectory, ClientEntry, ConnectionId, Departure, DisplayName, FanOut, Registry,
    RegistryError, RelayMessage,
};

/// Mutex-guarded [`Registry`]
#[derive(Debug, Default)]
pub struct InMemoryClientDirectory {
    registry: Mutex<Registry>,
}

impl InMemoryClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientDirectory for InMemoryClientDirectory {
    async fn register(&self, id: ConnectionId, entry: ClientEntry) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().await;
        let name = entry.name.clone();
        registry.insert(id, entry)?;
        tracing::debug!(
            "Connection {} registered as '{}' ({} online)",
            id,
            name,
            registry.len()
        );
        Ok(())
    }

    async fn broadcast(&self, message: RelayMessage, exclude: Option<ConnectionId>) -> FanOut {
        let registry = self.registry.lock().await;
        let result = registry.fan_out(&message, exclude.as_ref());
        tracing::debug!(
            "Broadcasted '{}' to {} client(s), {} failed",
            message,
            result.delivered,
            result.failed.len()
        );
        result
    }

    async fn remove(&self, id: ConnectionId) -> Option<Departure> {
        let mut registry = self.registry.lock().await;
        let departure = registry.depart(&id)?;
        tracing::debug!(
            "Connection {} ('{}') unregistered ({} online)",
            id,
            departure.name,
            registry.len()
        );
        Some(departure)
    }

    async fn name_of(&self, id: ConnectionId) -> Option<DisplayName> {
        self.registry.lock().await.name_of(&id).cloned()
    }

    async fn count(&self) -> usize {
        self.registry.lock().await.len()
    }
}
