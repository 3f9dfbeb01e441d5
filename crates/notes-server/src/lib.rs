//! notes-server: HTTP API server for the notes service
//!
//! This crate provides:
//! - Account registration and login with HS256 bearer credentials
//! - Strict and optional authentication gates as axum extractors
//! - Note CRUD plus public-slug and per-email sharing
//!
//! # Architecture
//!
//! Handlers are thin: they extract the caller, call into
//! [`services::IdentityService`] or [`services::NotesService`], and map
//! errors onto JSON responses through [`ApiError`]. The services only see
//! the repository traits from `notes-store`, so the server runs the same
//! against PostgreSQL or the in-memory store.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notes_server::{AppState, ServerConfig, routes};
//! use notes_store::MemoryStore;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::with_store(config, Arc::new(MemoryStore::new()));
//! let app = routes::build_app(state)?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig, StorageBackend};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
