//! Pieces shared by the Hiroba relay server and terminal client.
//!
//! - [`protocol`]: wire constants and chunk/line codecs
//! - [`cli`]: the `<IPAddress> <port>` positional arguments both binaries take
//! - [`logger`]: tracing subscriber setup

pub mod cli;
pub mod logger;
pub mod protocol;
