//! Server configuration.

use std::{io, net::SocketAddr, num::NonZeroUsize, time::Duration};

use clap::ValueEnum;
use hiroba_shared::protocol::MAX_CHUNK_SIZE;

/// Pending connections the listener queues before accepting.
pub const DEFAULT_BACKLOG: u32 = 100;
/// Upper bound of a single socket write.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);
/// Payloads queued per connection before it counts as stalled.
pub const DEFAULT_OUTBOX_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => unreachable!(),
};
/// Consecutive retried read errors tolerated before a connection is dropped.
pub const DEFAULT_MAX_READ_RETRIES: u32 = 8;

/// How an active connection reacts to a failed read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReadErrorPolicy {
    /// Retry interruptions and timeouts, drop the connection on anything else
    #[default]
    Classify,
    /// Retry every error
    RetryAll,
    /// Drop the connection on the first error
    FailFast,
}

/// Decision taken after a failed read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorAction {
    Retry,
    Terminate,
}

impl ReadErrorPolicy {
    /// Decide what to do about `error`, the `consecutive`-th failed read in a row.
    ///
    /// Retrying policies give up once `consecutive` exceeds `max_retries`, so a
    /// persistent failure cannot spin forever.
    pub fn on_error(&self, error: &io::Error, consecutive: u32, max_retries: u32) -> ReadErrorAction {
        let retryable = match self {
            ReadErrorPolicy::Classify => is_transient(error),
            ReadErrorPolicy::RetryAll => true,
            ReadErrorPolicy::FailFast => false,
        };

        if retryable && consecutive <= max_retries {
            ReadErrorAction::Retry
        } else {
            ReadErrorAction::Terminate
        }
    }
}

fn is_transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// Runtime settings of the relay server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Listen backlog
    pub backlog: u32,
    /// Maximum bytes taken from the socket per read
    pub chunk_size: usize,
    /// Upper bound of each write to a client
    pub send_timeout: Duration,
    /// Capacity of each client's outbound queue
    pub outbox_capacity: NonZeroUsize,
    /// Reaction to read errors on active connections
    pub read_error_policy: ReadErrorPolicy,
    /// Consecutive retried read errors tolerated
    pub max_read_retries: u32,
}

impl ServerConfig {
    /// Configuration with default tuning for the given listen address.
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            backlog: DEFAULT_BACKLOG,
            chunk_size: MAX_CHUNK_SIZE,
            send_timeout: DEFAULT_SEND_TIMEOUT,
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
            read_error_policy: ReadErrorPolicy::default(),
            max_read_retries: DEFAULT_MAX_READ_RETRIES,
        }
    }
}
