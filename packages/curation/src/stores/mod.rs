//! Storage implementations for the curation library.
//!
//! Available backends:
//! - `MemoryStore` - In-memory storage (always available)
//! - `JsonArtifactStore` - Feed and corpus artifacts as JSON files on disk
//! - `SqliteSubscriberStore` - SQLite subscriber storage (requires `sqlite` feature)

pub mod json_file;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use json_file::JsonArtifactStore;
pub use memory::MemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSubscriberStore;
