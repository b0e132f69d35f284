//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{ConnectionId, RegistryError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UseCaseError {
    /// Registering the connection failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The connection is not (or no longer) in the registry
    #[error("connection {0} is not registered")]
    NotRegistered(ConnectionId),
}
