//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::net::{TcpListener, TcpSocket};

use crate::{
    config::ServerConfig,
    usecase::{JoinChatUseCase, LeaveChatUseCase, RelayMessageUseCase},
};

use super::{error::ServerError, handler::handle_connection, signal::shutdown_signal, state::AppState};

/// Pause after a failed `accept` so that exhausted descriptors do not spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(config, join_chat_usecase, relay_message_usecase, leave_chat_usecase);
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// JoinChatUseCase（参加のユースケース）
    join_chat_usecase: Arc<JoinChatUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    relay_message_usecase: Arc<RelayMessageUseCase>,
    /// LeaveChatUseCase（退出のユースケース）
    leave_chat_usecase: Arc<LeaveChatUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        config: ServerConfig,
        join_chat_usecase: Arc<JoinChatUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        leave_chat_usecase: Arc<LeaveChatUseCase>,
    ) -> Self {
        Self {
            config,
            join_chat_usecase,
            relay_message_usecase,
            leave_chat_usecase,
        }
    }

    /// Bind the configured address with `SO_REUSEADDR` and the configured backlog.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the socket cannot be created, bound or
    /// put into listening state.
    pub fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self.config.addr;
        let bind_error = |source: std::io::Error| ServerError::Bind { addr, source };

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(bind_error)?;
        socket.set_reuseaddr(true).map_err(bind_error)?;
        socket.bind(addr).map_err(bind_error)?;
        socket.listen(self.config.backlog).map_err(bind_error)
    }

    /// Bind and serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.bind()?;
        self.serve(listener, shutdown_signal()).await;
        Ok(())
    }

    /// Accept connections on `listener` until `shutdown` resolves.
    ///
    /// Every accepted connection is handed to its own task. Connections that
    /// are still open when `shutdown` resolves keep running on the runtime.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let state = Arc::new(AppState {
            config: self.config,
            join_chat: self.join_chat_usecase,
            relay_message: self.relay_message_usecase,
            leave_chat: self.leave_chat_usecase,
        });

        match listener.local_addr() {
            Ok(addr) => tracing::info!("Chat relay listening on {}", addr),
            Err(e) => tracing::warn!("Chat relay listening on unknown address: {}", e),
        }
        tracing::info!("Press Ctrl+C to shutdown");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::info!("{} connected", peer);
                        let state = state.clone();
                        tokio::spawn(async move {
                            handle_connection(stream, peer, state).await;
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        tracing::info!("Server shutdown complete");
    }
}
