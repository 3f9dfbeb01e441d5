//! Note business rules and access control.
//!
//! Every owner-scoped check happens inside the storage call itself; this
//! layer validates input, derives slugs and turns "no row matched" into the
//! right error for each operation.

use std::sync::Arc;

use chrono::Utc;
use notes_core::{AccountId, Note, NoteId, NoteSummary, Viewer, derive_slug, validate};
use notes_store::{NewNote, NoteRepository, NoteUpdate, StoreError};

/// Note failures.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("owner is required")]
    MissingOwner,

    #[error("email is required")]
    MissingEmail,

    #[error("invalid email format provided")]
    InvalidEmail,

    /// Covers both "does not exist" and "not visible to you".
    #[error("note not found")]
    NotFound,

    #[error("not permitted to modify this note")]
    Unauthorized,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Caller-supplied note fields for create and update.
#[derive(Debug, Clone)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub public: bool,
}

impl NoteInput {
    fn validate(&self) -> Result<(), NoteError> {
        validate::non_empty("title", &self.title).map_err(|_| NoteError::EmptyTitle)?;
        validate::non_empty("content", &self.content).map_err(|_| NoteError::EmptyContent)?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct NotesService {
    notes: Arc<dyn NoteRepository>,
}

impl NotesService {
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// Create a note owned by `caller`. Public notes get their slug here.
    pub async fn create(&self, caller: AccountId, input: NoteInput) -> Result<Note, NoteError> {
        input.validate()?;

        let id = NoteId::new();
        let slug = input.public.then(|| derive_slug(&input.title, id));
        let note = self
            .notes
            .insert_note(&NewNote {
                id,
                author_id: caller,
                title: input.title,
                content: input.content,
                public: input.public,
                slug,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(note_id = %note.id, public = note.public, "note created");
        Ok(note)
    }

    /// Summaries of the caller's notes, newest first.
    pub async fn list(&self, caller: AccountId) -> Result<Vec<NoteSummary>, NoteError> {
        Ok(self.notes.list_notes_by_author(caller).await?)
    }

    pub async fn get(&self, id: NoteId, caller: AccountId) -> Result<Note, NoteError> {
        self.notes
            .get_owned_note(id, caller)
            .await?
            .ok_or(NoteError::NotFound)
    }

    /// Replace a note's fields.
    ///
    /// The slug is re-derived from the new title every time, public or not.
    pub async fn update(
        &self,
        id: NoteId,
        caller: AccountId,
        input: NoteInput,
    ) -> Result<NoteSummary, NoteError> {
        input.validate()?;

        let slug = derive_slug(&input.title, id);
        let summary = self
            .notes
            .update_owned_note(&NoteUpdate {
                id,
                author_id: caller,
                title: input.title,
                content: input.content,
                public: input.public,
                slug: Some(slug),
                updated_at: Utc::now(),
            })
            .await?
            .ok_or(NoteError::Unauthorized)?;

        tracing::info!(note_id = %id, "note updated");
        Ok(summary)
    }

    pub async fn delete(&self, id: NoteId, caller: AccountId) -> Result<(), NoteError> {
        if !self.notes.delete_owned_note(id, caller).await? {
            return Err(NoteError::NotFound);
        }
        tracing::info!(note_id = %id, "note deleted");
        Ok(())
    }

    /// Grant `email` read access and return the slug it reads the note by.
    pub async fn share_via_email(
        &self,
        id: NoteId,
        owner: AccountId,
        email: &str,
    ) -> Result<String, NoteError> {
        if owner.0.is_nil() {
            return Err(NoteError::MissingOwner);
        }
        if email.is_empty() {
            return Err(NoteError::MissingEmail);
        }
        validate::email(email).map_err(|_| NoteError::InvalidEmail)?;

        // Advisory read: it only supplies the title for a slug the note may
        // lack. The grant below re-checks ownership in its own conditional
        // statement and keeps any existing slug, so a stale or concurrent
        // result here can neither authorize a share nor replace a slug.
        let note = self
            .notes
            .get_owned_note(id, owner)
            .await?
            .ok_or(NoteError::Unauthorized)?;
        let fallback = derive_slug(&note.title, id);

        let slug = self
            .notes
            .grant_share(id, owner, email, &fallback)
            .await?
            .ok_or(NoteError::Unauthorized)?;

        tracing::info!(note_id = %id, "note shared");
        Ok(slug)
    }

    pub async fn revoke_email_share(
        &self,
        id: NoteId,
        owner: AccountId,
        email: &str,
    ) -> Result<(), NoteError> {
        if owner.0.is_nil() {
            return Err(NoteError::MissingOwner);
        }
        if email.is_empty() {
            return Err(NoteError::MissingEmail);
        }

        if !self.notes.revoke_share(id, owner, email).await? {
            return Err(NoteError::Unauthorized);
        }
        tracing::info!(note_id = %id, "share revoked");
        Ok(())
    }

    /// Resolve a slug for an anonymous or authenticated caller.
    ///
    /// Grantee emails are stripped unless the caller owns the note.
    pub async fn get_public_by_slug(
        &self,
        slug: &str,
        viewer: Option<&Viewer>,
    ) -> Result<Note, NoteError> {
        let mut note = self
            .notes
            .find_visible_by_slug(slug, viewer)
            .await?
            .ok_or(NoteError::NotFound)?;

        if !viewer.is_some_and(|v| note.is_owned_by(v.account_id)) {
            note.shared_with.clear();
        }
        Ok(note)
    }
}

impl std::fmt::Debug for NotesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_store::MemoryStore;

    fn service() -> NotesService {
        NotesService::new(Arc::new(MemoryStore::new()))
    }

    fn input(title: &str, public: bool) -> NoteInput {
        NoteInput {
            title: title.to_string(),
            content: "body".to_string(),
            public,
        }
    }

    #[tokio::test]
    async fn test_create_private_has_no_slug() {
        let note = service()
            .create(AccountId::new(), input("Private", false))
            .await
            .unwrap();
        assert!(!note.public);
        assert!(note.slug.is_none());
    }

    #[tokio::test]
    async fn test_create_public_slug_embeds_id() {
        let note = service()
            .create(AccountId::new(), input("My First Note", true))
            .await
            .unwrap();
        let expected = format!("my-first-note-{}", &note.id.to_string()[..6]);
        assert_eq!(note.slug.as_deref(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_fields() {
        let notes = service();
        let owner = AccountId::new();
        assert!(matches!(
            notes.create(owner, input("", false)).await,
            Err(NoteError::EmptyTitle)
        ));
        let mut no_body = input("Title", false);
        no_body.content.clear();
        assert!(matches!(
            notes.create(owner, no_body).await,
            Err(NoteError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_get_hides_other_owners_notes() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Mine", false)).await.unwrap();

        assert_eq!(notes.get(note.id, owner).await.unwrap().title, "Mine");
        assert!(matches!(
            notes.get(note.id, AccountId::new()).await,
            Err(NoteError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_by_stranger_is_rejected_and_changes_nothing() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Original", true)).await.unwrap();

        let err = notes
            .update(note.id, AccountId::new(), input("Hijacked", true))
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::Unauthorized));

        let stored = notes.get(note.id, owner).await.unwrap();
        assert_eq!(stored, note);
    }

    #[tokio::test]
    async fn test_update_rederives_slug_even_when_private() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Draft", false)).await.unwrap();

        let summary = notes
            .update(note.id, owner, input("Final Copy", false))
            .await
            .unwrap();
        let expected = derive_slug("Final Copy", note.id);
        assert_eq!(summary.slug.as_deref(), Some(expected.as_str()));
        assert_eq!(summary.title, "Final Copy");
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Doomed", false)).await.unwrap();

        assert!(matches!(
            notes.delete(note.id, AccountId::new()).await,
            Err(NoteError::NotFound)
        ));
        notes.delete(note.id, owner).await.unwrap();
        assert!(matches!(
            notes.delete(note.id, owner).await,
            Err(NoteError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_share_and_lookup_rules() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Secret Plan", false)).await.unwrap();

        let slug = notes
            .share_via_email(note.id, owner, "someone@example.com")
            .await
            .unwrap();
        assert_eq!(slug, derive_slug("Secret Plan", note.id));

        let grantee = Viewer::new(AccountId::new(), "someone@example.com");
        let other = Viewer::new(AccountId::new(), "other@example.com");
        let owner_view = Viewer::new(owner, "owner@example.com");

        let seen = notes.get_public_by_slug(&slug, Some(&grantee)).await.unwrap();
        assert_eq!(seen.id, note.id);
        assert!(seen.shared_with.is_empty());

        let seen = notes.get_public_by_slug(&slug, Some(&owner_view)).await.unwrap();
        assert_eq!(seen.shared_with, vec!["someone@example.com".to_string()]);

        assert!(matches!(
            notes.get_public_by_slug(&slug, Some(&other)).await,
            Err(NoteError::NotFound)
        ));
        assert!(matches!(
            notes.get_public_by_slug(&slug, None).await,
            Err(NoteError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_share_by_stranger_grants_nothing() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Private", false)).await.unwrap();

        assert!(matches!(
            notes
                .share_via_email(note.id, AccountId::new(), "mallory@example.com")
                .await,
            Err(NoteError::Unauthorized)
        ));
        assert_eq!(notes.get(note.id, owner).await.unwrap().slug, None);

        let slug = notes
            .share_via_email(note.id, owner, "friend@example.com")
            .await
            .unwrap();
        let owner_view = Viewer::new(owner, "owner@example.com");
        let seen = notes.get_public_by_slug(&slug, Some(&owner_view)).await.unwrap();
        assert_eq!(seen.shared_with, vec!["friend@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_share_keeps_existing_slug() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Already Public", true)).await.unwrap();

        let slug = notes
            .share_via_email(note.id, owner, "friend@example.com")
            .await
            .unwrap();
        assert_eq!(Some(slug.clone()), note.slug);
        assert_eq!(notes.get(note.id, owner).await.unwrap().slug, Some(slug));
    }

    #[tokio::test]
    async fn test_share_validation() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Shared", false)).await.unwrap();

        assert!(matches!(
            notes.share_via_email(note.id, owner, "").await,
            Err(NoteError::MissingEmail)
        ));
        assert!(matches!(
            notes.share_via_email(note.id, owner, "nope").await,
            Err(NoteError::InvalidEmail)
        ));
        assert!(matches!(
            notes.share_via_email(note.id, AccountId::from_uuid(uuid::Uuid::nil()), "a@example.com").await,
            Err(NoteError::MissingOwner)
        ));
        assert!(matches!(
            notes.share_via_email(note.id, AccountId::new(), "a@example.com").await,
            Err(NoteError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_revoke_missing_grant_is_unauthorized() {
        let notes = service();
        let owner = AccountId::new();
        let note = notes.create(owner, input("Shared", false)).await.unwrap();

        assert!(matches!(
            notes.revoke_email_share(note.id, owner, "never@example.com").await,
            Err(NoteError::Unauthorized)
        ));

        notes
            .share_via_email(note.id, owner, "friend@example.com")
            .await
            .unwrap();
        notes
            .revoke_email_share(note.id, owner, "friend@example.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_anonymous_sees_public_only() {
        let notes = service();
        let owner = AccountId::new();
        let public = notes.create(owner, input("Open", true)).await.unwrap();
        let slug = public.slug.clone().unwrap();

        assert_eq!(notes.get_public_by_slug(&slug, None).await.unwrap().id, public.id);
        assert!(matches!(
            notes.get_public_by_slug("no-such-slug", None).await,
            Err(NoteError::NotFound)
        ));
    }
}
