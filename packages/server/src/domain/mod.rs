//! Domain layer: the relay's value objects, the client registry model and the
//! interface the use cases need over shared registry state.

mod directory;
mod entity;
mod error;
mod message;
mod registry;
mod value_object;

pub use directory::ClientDirectory;
#[cfg(test)]
pub use directory::MockClientDirectory;
pub use entity::{ClientEntry, Outbox};
pub use error::{DomainError, RegistryError};
pub use message::RelayMessage;
pub use registry::{Departure, FanOut, Registry};
pub use value_object::{ConnectionId, DisplayName};
