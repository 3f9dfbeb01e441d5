//! Application state shared across handlers.

use std::sync::Arc;

use notes_store::{AccountRepository, NoteRepository};

use crate::auth::TokenService;
use crate::config::ServerConfig;
use crate::services::{IdentityService, NotesService};

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login.
    identity: IdentityService,
    /// Note operations.
    notes: NotesService,
    /// Bearer credential verification for the auth gates.
    tokens: TokenService,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state over the given repositories.
    pub fn new(
        config: ServerConfig,
        accounts: Arc<dyn AccountRepository>,
        notes: Arc<dyn NoteRepository>,
    ) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl);
        Self {
            identity: IdentityService::new(accounts, tokens.clone()),
            notes: NotesService::new(notes),
            tokens,
            config: Arc::new(config),
        }
    }

    /// Create application state backed by one store serving both repositories.
    pub fn with_store<S>(config: ServerConfig, store: Arc<S>) -> Self
    where
        S: AccountRepository + NoteRepository + 'static,
    {
        Self::new(config, store.clone(), store)
    }

    pub fn identity(&self) -> &IdentityService {
        &self.identity
    }

    pub fn notes(&self) -> &NotesService {
        &self.notes
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("port", &self.config.port)
            .field("storage", &self.config.storage)
            .finish_non_exhaustive()
    }
}
