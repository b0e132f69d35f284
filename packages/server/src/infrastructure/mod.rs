//! Infrastructure layer: concrete implementations of domain interfaces.

pub mod directory;

pub use directory::InMemoryClientDirectory;
