//! DM Portal Storage Layer
//!
//! Persistent key-value slots backing the session client.
//! SQLite on disk for the host application, an in-memory map for tests
//! and ephemeral sessions.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

pub type Result<T> = std::result::Result<T, StorageError>;
