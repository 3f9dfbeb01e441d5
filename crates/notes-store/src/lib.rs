//! notes-store: Storage layer for the notes service
//!
//! This crate provides:
//! - The `AccountRepository` and `NoteRepository` contracts
//! - A PostgreSQL implementation (`Store`) using sqlx
//! - An in-memory implementation (`MemoryStore`) for tests and local runs
//! - Embedded schema migrations
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{NoteRepository, Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let notes = store.list_notes_by_author(account_id).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::*;
pub use repository::{AccountRepository, NoteRepository};
pub use store::{Store, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
