//! Domain errors.

use thiserror::Error;

use super::ConnectionId;

/// Errors raised while building domain values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The handshake carried no usable display name
    #[error("display name is empty")]
    EmptyDisplayName,
}

/// Errors raised by registry mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection already completed its handshake
    #[error("connection {0} is already registered")]
    AlreadyRegistered(ConnectionId),
}
