//! UI layer: TCP listener, per-connection handler and outbound writer.

mod error;
mod handler;
mod server;
mod signal;
pub mod state;
mod writer;

pub use error::{HandshakeError, ServerError};
pub use handler::handle_connection;
pub use server::Server;
pub use signal::shutdown_signal;
