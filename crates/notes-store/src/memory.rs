//! In-process store for tests and local development.
//!
//! Mirrors the PostgreSQL store's semantics: unique emails and slugs,
//! owner-scoped mutations that either fully apply or do nothing, and share
//! grants that disappear with their note. Each operation takes the lock
//! once, which gives it the same atomicity as the single SQL statements.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notes_core::{AccountId, Note, NoteId, NoteSummary, Viewer};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{AccountRow, NewAccount, NewNote, NoteUpdate};
use crate::repository::{AccountRepository, NoteRepository};

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<Uuid, AccountRow>,
    notes: HashMap<Uuid, Note>,
    /// (note id, email) -> granted at
    shares: BTreeMap<(Uuid, String), DateTime<Utc>>,
}

impl Inner {
    fn slug_taken(&self, slug: &str, except: Uuid) -> bool {
        self.notes
            .values()
            .any(|n| n.id.0 != except && n.slug.as_deref() == Some(slug))
    }

    fn shared_with(&self, note_id: Uuid) -> Vec<String> {
        let mut grants: Vec<(&DateTime<Utc>, &String)> = self
            .shares
            .iter()
            .filter(|((id, _), _)| *id == note_id)
            .map(|((_, email), at)| (at, email))
            .collect();
        grants.sort();
        grants.into_iter().map(|(_, email)| email.clone()).collect()
    }

    fn with_shares(&self, note: &Note) -> Note {
        Note {
            shared_with: self.shared_with(note.id.0),
            ..note.clone()
        }
    }

    fn owned_mut(&mut self, id: NoteId, owner: AccountId) -> Option<&mut Note> {
        self.notes.get_mut(&id.0).filter(|n| n.is_owned_by(owner))
    }
}

/// Store that keeps everything in memory behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn insert_account(&self, account: &NewAccount) -> StoreResult<AccountRow> {
        let mut inner = self.inner.write().await;
        if inner.accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::DuplicateEmail(account.email.clone()));
        }

        let row = AccountRow {
            id: Uuid::new_v4(),
            email: account.email.clone(),
            name: account.name.clone(),
            password_hash: account.password_hash.clone(),
            created_at: account.created_at,
        };
        inner.accounts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_account_by_email(&self, email: &str) -> StoreResult<Option<AccountRow>> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn get_account_by_id(&self, id: AccountId) -> StoreResult<Option<AccountRow>> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.get(&id.0).cloned())
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn insert_note(&self, note: &NewNote) -> StoreResult<Note> {
        let mut inner = self.inner.write().await;
        if let Some(slug) = &note.slug
            && inner.slug_taken(slug, note.id.0)
        {
            return Err(StoreError::DuplicateSlug(slug.clone()));
        }

        let stored = Note {
            id: note.id,
            author_id: note.author_id,
            title: note.title.clone(),
            content: note.content.clone(),
            public: note.public,
            slug: note.slug.clone(),
            shared_with: Vec::new(),
            created_at: note.created_at,
            updated_at: note.created_at,
        };
        inner.notes.insert(note.id.0, stored.clone());
        Ok(stored)
    }

    async fn list_notes_by_author(&self, author: AccountId) -> StoreResult<Vec<NoteSummary>> {
        let inner = self.inner.read().await;
        let mut notes: Vec<&Note> = inner
            .notes
            .values()
            .filter(|n| n.is_owned_by(author))
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes.into_iter().map(Note::summary).collect())
    }

    async fn get_owned_note(&self, id: NoteId, author: AccountId) -> StoreResult<Option<Note>> {
        let inner = self.inner.read().await;
        Ok(inner
            .notes
            .get(&id.0)
            .filter(|n| n.is_owned_by(author))
            .map(|n| inner.with_shares(n)))
    }

    async fn update_owned_note(&self, update: &NoteUpdate) -> StoreResult<Option<NoteSummary>> {
        let mut inner = self.inner.write().await;
        if inner.owned_mut(update.id, update.author_id).is_none() {
            return Ok(None);
        }
        if let Some(slug) = &update.slug
            && inner.slug_taken(slug, update.id.0)
        {
            return Err(StoreError::DuplicateSlug(slug.clone()));
        }

        let Some(note) = inner.owned_mut(update.id, update.author_id) else {
            return Ok(None);
        };
        note.title = update.title.clone();
        note.content = update.content.clone();
        note.public = update.public;
        note.slug = update.slug.clone();
        note.updated_at = update.updated_at;
        Ok(Some(note.summary()))
    }

    async fn delete_owned_note(&self, id: NoteId, author: AccountId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        if inner.owned_mut(id, author).is_none() {
            return Ok(false);
        }
        inner.notes.remove(&id.0);
        inner.shares.retain(|(note_id, _), _| *note_id != id.0);
        Ok(true)
    }

    async fn grant_share(
        &self,
        id: NoteId,
        owner: AccountId,
        email: &str,
        fallback_slug: &str,
    ) -> StoreResult<Option<String>> {
        let mut inner = self.inner.write().await;
        let Some(current) = inner.owned_mut(id, owner).map(|n| n.slug.clone()) else {
            return Ok(None);
        };

        let slug = match current {
            Some(slug) => slug,
            None => {
                if inner.slug_taken(fallback_slug, id.0) {
                    return Err(StoreError::DuplicateSlug(fallback_slug.to_string()));
                }
                fallback_slug.to_string()
            }
        };
        if let Some(note) = inner.owned_mut(id, owner) {
            note.slug = Some(slug.clone());
        }
        inner.shares.insert((id.0, email.to_string()), Utc::now());
        Ok(Some(slug))
    }

    async fn revoke_share(&self, id: NoteId, owner: AccountId, email: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        if inner.owned_mut(id, owner).is_none() {
            return Ok(false);
        }
        Ok(inner.shares.remove(&(id.0, email.to_string())).is_some())
    }

    async fn find_visible_by_slug(
        &self,
        slug: &str,
        viewer: Option<&Viewer>,
    ) -> StoreResult<Option<Note>> {
        let inner = self.inner.read().await;
        let Some(note) = inner.notes.values().find(|n| n.slug.as_deref() == Some(slug)) else {
            return Ok(None);
        };

        let visible = note.public
            || viewer.is_some_and(|v| {
                note.is_owned_by(v.account_id)
                    || inner.shares.contains_key(&(note.id.0, v.email.clone()))
            });

        Ok(visible.then(|| inner.with_shares(note)))
    }
}
