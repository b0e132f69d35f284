//! Hiroba relay server.
//!
//! Accepts TCP connections, admits each one after it sends a display name,
//! and relays every chunk it sends to all other admitted connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
