//! Registry entry of a client that completed its handshake.

use std::net::SocketAddr;

use tokio::sync::mpsc;

use super::DisplayName;

/// Outbound queue of one connection, drained by that connection's writer task.
///
/// Dropping the last `Outbox` of a connection closes its transport: the writer
/// finishes the queued payloads and shuts the socket down.
pub type Outbox = mpsc::Sender<String>;

/// A live, admitted client.
#[derive(Debug, Clone)]
pub struct ClientEntry {
    pub name: DisplayName,
    pub peer: SocketAddr,
    pub outbox: Outbox,
}

impl ClientEntry {
    pub fn new(name: DisplayName, peer: SocketAddr, outbox: Outbox) -> Self {
        Self { name, peer, outbox }
    }
}
