//! ClientDirectory trait 定義
//!
//! Use cases reach the shared registry only through this trait. Every method
//! is one critical section over the registry; implementations must not let a
//! fan-out interleave with an insertion or removal.

use async_trait::async_trait;

use super::{ClientEntry, ConnectionId, Departure, DisplayName, FanOut, RegistryError, RelayMessage};

/// Shared directory of admitted clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Admit a connection that completed its handshake
    async fn register(&self, id: ConnectionId, entry: ClientEntry) -> Result<(), RegistryError>;

    /// Queue `message` for every client except `exclude`
    async fn broadcast(&self, message: RelayMessage, exclude: Option<ConnectionId>) -> FanOut;

    /// Announce the departure of `id` and drop its entry; `None` if absent
    async fn remove(&self, id: ConnectionId) -> Option<Departure>;

    /// Display name of a registered connection
    async fn name_of(&self, id: ConnectionId) -> Option<DisplayName>;

    /// Number of registered connections
    async fn count(&self) -> usize;
}
