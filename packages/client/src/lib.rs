//! Hiroba terminal chat client.
//!
//! Multiplexes keyboard input and the server socket: typed lines are sent to
//! the relay, relayed lines are printed. Own messages are right-aligned,
//! everything received is left-aligned.

pub mod error;
pub mod formatter;
pub mod input;
pub mod session;
pub mod ui;

pub use session::{Session, run_client};
