//! Error types for the terminal client.

use std::{io, net::SocketAddr};

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting to the server failed
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The server closed the connection
    #[error("connection closed by server")]
    ServerClosed,

    /// Reading from or writing to the server failed
    #[error("connection error: {0}")]
    Io(#[from] io::Error),
}
