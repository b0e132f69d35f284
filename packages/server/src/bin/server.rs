//! Hiroba chat relay server.
//!
//! Accepts TCP connections and relays every message a client sends to all
//! other connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server -- 127.0.0.1 9000
//! cargo run --bin hiroba-server -- 0.0.0.0 9000 --send-timeout-ms 2000 --read-error-policy fail-fast
//! ```

use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use clap::Parser;
use hiroba_server::{
    config::{
        DEFAULT_BACKLOG, DEFAULT_MAX_READ_RETRIES, DEFAULT_OUTBOX_CAPACITY, ReadErrorPolicy,
        ServerConfig,
    },
    infrastructure::InMemoryClientDirectory,
    ui::Server,
    usecase::{JoinChatUseCase, LeaveChatUseCase, RelayMessageUseCase},
};
use hiroba_shared::{
    cli::{Endpoint, parse_args_or_exit},
    logger::setup_logger,
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server", version)]
#[command(about = "TCP chat relay broadcasting every message to all other clients", long_about = None)]
struct Args {
    #[command(flatten)]
    endpoint: Endpoint,

    /// Pending connections queued by the listener
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    backlog: u32,

    /// Upper bound of each write to a client, in milliseconds
    #[arg(long, default_value_t = 5000)]
    send_timeout_ms: u64,

    /// Messages queued per client before it is considered stalled
    #[arg(long, default_value_t = DEFAULT_OUTBOX_CAPACITY)]
    outbox_capacity: NonZeroUsize,

    /// How to react to read errors on connected clients
    #[arg(long, value_enum, default_value_t = ReadErrorPolicy::Classify)]
    read_error_policy: ReadErrorPolicy,

    /// Consecutive read errors retried before a client is dropped
    #[arg(long, default_value_t = DEFAULT_MAX_READ_RETRIES)]
    max_read_retries: u32,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::new(self.endpoint.socket_addr());
        config.backlog = self.backlog;
        config.send_timeout = Duration::from_millis(self.send_timeout_ms);
        config.outbox_capacity = self.outbox_capacity;
        config.read_error_policy = self.read_error_policy;
        config.max_read_retries = self.max_read_retries;
        config
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args: Args = parse_args_or_exit();
    let config = args.into_config();

    // Initialize dependencies in order:
    // 1. ClientDirectory (the shared registry)
    // 2. UseCases
    // 3. Server

    // 1. Create ClientDirectory
    let directory = Arc::new(InMemoryClientDirectory::new());

    // 2. Create UseCases
    let leave_chat_usecase = Arc::new(LeaveChatUseCase::new(directory.clone()));
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(
        directory.clone(),
        leave_chat_usecase.clone(),
    ));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(
        directory.clone(),
        leave_chat_usecase.clone(),
    ));

    // 3. Create and run the server
    let server = Server::new(
        config,
        join_chat_usecase,
        relay_message_usecase,
        leave_chat_usecase,
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
