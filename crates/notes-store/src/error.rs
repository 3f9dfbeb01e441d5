//! Error types for the storage layer.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// An account with this email already exists.
    #[error("email already in use: {0}")]
    DuplicateEmail(String),

    /// Another note already carries this slug.
    #[error("slug already in use: {0}")]
    DuplicateSlug(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether this error is a storage-level uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateEmail(_) | Self::DuplicateSlug(_))
    }
}

/// Name of the unique index guarding `accounts.email`.
pub(crate) const ACCOUNTS_EMAIL_KEY: &str = "accounts_email_key";

/// Name of the unique index guarding `notes.slug`.
pub(crate) const NOTES_SLUG_KEY: &str = "notes_slug_key";

/// Map a unique-violation on one of our indexes to its domain error.
///
/// `value` is the offending email or slug; every other error passes
/// through unchanged.
pub(crate) fn map_unique_violation(err: sqlx::Error, value: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        match db.constraint() {
            Some(ACCOUNTS_EMAIL_KEY) => return StoreError::DuplicateEmail(value.to_string()),
            Some(NOTES_SLUG_KEY) => return StoreError::DuplicateSlug(value.to_string()),
            _ => {}
        }
    }
    StoreError::Connection(err)
}
