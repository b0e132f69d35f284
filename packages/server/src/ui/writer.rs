//! Outbound side of a connection.
//!
//! Each admitted connection gets one writer task that drains its outbox onto
//! the socket. The writer is the only code that writes to the socket after the
//! handshake, so fan-out never touches a transport directly.

use std::{net::SocketAddr, time::Duration};

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc,
    time::timeout,
};

/// Why a writer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterExit {
    /// Every sender of the outbox was dropped (the client was removed)
    Closed,
    /// A write failed
    Failed,
    /// A write did not complete within the send timeout
    TimedOut,
}

/// Write queued payloads until the outbox closes or a write fails.
///
/// Every write is bounded by `send_timeout`. On exit the write half is shut
/// down; errors from the shutdown are ignored.
pub async fn run_writer<W>(
    mut writer: W,
    mut outbox: mpsc::Receiver<String>,
    send_timeout: Duration,
    peer: SocketAddr,
) -> WriterExit
where
    W: AsyncWrite + Unpin,
{
    let mut exit = WriterExit::Closed;

    while let Some(payload) = outbox.recv().await {
        match timeout(send_timeout, writer.write_all(payload.as_bytes())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!("Failed to write to {}: {}", peer, e);
                exit = WriterExit::Failed;
                break;
            }
            Err(_) => {
                tracing::warn!("Write to {} timed out after {:?}", peer, send_timeout);
                exit = WriterExit::TimedOut;
                break;
            }
        }
    }

    // Stop accepting payloads before the (possibly slow) shutdown.
    drop(outbox);
    let _ = timeout(send_timeout, writer.shutdown()).await;
    tracing::debug!("Writer for {} stopped: {:?}", peer, exit);

    exit
}
