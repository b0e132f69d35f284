//! Errors surfaced by the UI layer.

use std::{io, net::SocketAddr};

use thiserror::Error;

use crate::domain::DomainError;

/// Fatal errors of the listener
#[derive(Debug, Error)]
pub enum ServerError {
    /// Creating, binding or listening on the socket failed
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Reasons a connection never completes its handshake
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// The peer closed the connection before sending a name
    #[error("connection closed before handshake")]
    Closed,

    /// Reading the name failed
    #[error("failed to read display name: {0}")]
    Io(#[from] io::Error),

    /// The name was unusable
    #[error("invalid display name: {0}")]
    InvalidName(#[from] DomainError),
}
