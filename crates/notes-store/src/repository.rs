//! Repository contracts between business logic and storage.
//!
//! The identity and notes components only ever hold an
//! `Arc<dyn AccountRepository>` / `Arc<dyn NoteRepository>`, so the
//! PostgreSQL store and the in-memory store are interchangeable.
//!
//! Every owner-scoped operation is a single conditional statement: the
//! owner match lives in the same query as the read or write, and "does not
//! exist" is indistinguishable from "not yours".

use async_trait::async_trait;
use notes_core::{AccountId, Note, NoteId, NoteSummary, Viewer};

use crate::error::StoreResult;
use crate::models::{AccountRow, NewAccount, NewNote, NoteUpdate};

/// Account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with `StoreError::DuplicateEmail` if the email is taken.
    async fn insert_account(&self, account: &NewAccount) -> StoreResult<AccountRow>;

    /// Look up an account by its login email.
    async fn get_account_by_email(&self, email: &str) -> StoreResult<Option<AccountRow>>;

    /// Look up an account by id.
    async fn get_account_by_id(&self, id: AccountId) -> StoreResult<Option<AccountRow>>;
}

/// Note and share-grant persistence.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note. The returned note has no share grants yet.
    async fn insert_note(&self, note: &NewNote) -> StoreResult<Note>;

    /// Summaries of every note owned by `author`, newest-created first.
    async fn list_notes_by_author(&self, author: AccountId) -> StoreResult<Vec<NoteSummary>>;

    /// The full note, if it exists and `author` owns it.
    async fn get_owned_note(&self, id: NoteId, author: AccountId) -> StoreResult<Option<Note>>;

    /// Apply `update` if `update.author_id` owns the note.
    ///
    /// Returns `None` without touching anything otherwise.
    async fn update_owned_note(&self, update: &NoteUpdate) -> StoreResult<Option<NoteSummary>>;

    /// Delete the note if `author` owns it. Returns whether a row was removed.
    async fn delete_owned_note(&self, id: NoteId, author: AccountId) -> StoreResult<bool>;

    /// Grant `email` read access if `owner` owns the note.
    ///
    /// A note without a slug is given `fallback_slug` in the same statement,
    /// so the grantee has something to look it up by. Granting an existing
    /// grant again refreshes it and still counts as success. Returns the
    /// note's slug, or `None` if the note did not match.
    async fn grant_share(
        &self,
        id: NoteId,
        owner: AccountId,
        email: &str,
        fallback_slug: &str,
    ) -> StoreResult<Option<String>>;

    /// Remove `email`'s grant if `owner` owns the note and the grant exists.
    async fn revoke_share(&self, id: NoteId, owner: AccountId, email: &str) -> StoreResult<bool>;

    /// Resolve a slug for `viewer`.
    ///
    /// Anonymous viewers see the note only when it is public. Authenticated
    /// viewers also see it when they own it or their email holds a grant.
    async fn find_visible_by_slug(
        &self,
        slug: &str,
        viewer: Option<&Viewer>,
    ) -> StoreResult<Option<Note>>;
}
