//! Per-connection lifecycle: `AwaitingHandshake -> Active -> Terminated`.

use std::{net::SocketAddr, sync::Arc};

use hiroba_shared::protocol::decode_chunk;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite},
    sync::mpsc,
};

use crate::{
    config::ReadErrorAction,
    domain::{ConnectionId, DisplayName},
};

use super::{error::HandshakeError, state::AppState, writer::run_writer};

/// Drive one accepted connection until it terminates.
///
/// Removal runs exactly once on every path out of this function. A connection
/// that never completed its handshake has no registry entry, so its removal
/// only closes the stream.
pub async fn handle_connection<S>(stream: S, peer: SocketAddr, state: Arc<AppState>)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let id = ConnectionId::generate();
    let (mut reader, writer) = tokio::io::split(stream);

    // AwaitingHandshake
    let name = match read_handshake(&mut reader, state.config.chunk_size).await {
        Ok(name) => name,
        Err(e) => {
            tracing::info!("Handshake with {} failed: {}", peer, e);
            state.leave_chat.execute(id).await;
            return;
        }
    };

    // The writer starts only after admission, so the acknowledgement reaches
    // the client once it is already visible to the rest of the room.
    let (outbox, outbox_rx) = mpsc::channel(state.config.outbox_capacity.get());
    if let Err(e) = state.join_chat.execute(id, name.clone(), peer, outbox).await {
        tracing::warn!("Failed to admit {} as '{}': {}", peer, name, e);
        state.leave_chat.execute(id).await;
        return;
    }
    let mut send_task = tokio::spawn(run_writer(
        writer,
        outbox_rx,
        state.config.send_timeout,
        peer,
    ));

    // Active
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        receive_loop(reader, id, peer, state_clone).await;
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => {}
        _ = &mut send_task => recv_task.abort(),
    };

    // Terminated
    state.leave_chat.execute(id).await;
    tracing::info!(
        "{} ('{}') disconnected, {} client(s) remaining",
        peer,
        name,
        state.leave_chat.count_remaining_participants().await
    );
}

/// Read the first chunk and turn it into a display name.
async fn read_handshake<R>(reader: &mut R, chunk_size: usize) -> Result<DisplayName, HandshakeError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; chunk_size];
    let n = reader.read(&mut buf).await?;
    if n == 0 {
        return Err(HandshakeError::Closed);
    }
    Ok(DisplayName::new(decode_chunk(&buf[..n]))?)
}

/// Relay every chunk the client sends until it disconnects.
async fn receive_loop<R>(mut reader: R, id: ConnectionId, peer: SocketAddr, state: Arc<AppState>)
where
    R: AsyncRead + Unpin,
{
    let config = &state.config;
    let mut buf = vec![0u8; config.chunk_size];
    let mut consecutive_errors = 0u32;

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!("{} closed the connection", peer);
                return;
            }
            Ok(n) => {
                consecutive_errors = 0;
                let text = decode_chunk(&buf[..n]);
                tracing::info!("<{}> {}", peer.ip(), text);

                if let Err(e) = state.relay_message.execute(id, text).await {
                    tracing::warn!("Stopped relaying for {}: {}", peer, e);
                    return;
                }
            }
            Err(e) => {
                consecutive_errors += 1;
                match config
                    .read_error_policy
                    .on_error(&e, consecutive_errors, config.max_read_retries)
                {
                    ReadErrorAction::Retry => {
                        tracing::debug!(
                            "Read from {} failed ({}), retrying ({}/{})",
                            peer,
                            e,
                            consecutive_errors,
                            config.max_read_retries
                        );
                        tokio::task::yield_now().await;
                    }
                    ReadErrorAction::Terminate => {
                        tracing::warn!("Read from {} failed: {}", peer, e);
                        return;
                    }
                }
            }
        }
    }
}
