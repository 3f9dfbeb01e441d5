//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They are separate from the domain types in notes-core so the
//! password hash never leaves this crate attached to an `Account`.

use chrono::{DateTime, Utc};
use notes_core::{Account, AccountId, Note, NoteId, NoteSummary};
use sqlx::FromRow;
use uuid::Uuid;

// ==================== Account Models ====================

/// Database row for the `accounts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: AccountId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// ==================== Note Models ====================

/// Database row for a full note, with its share grants aggregated in.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub public: bool,
    pub slug: Option<String>,
    pub shared_with: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: NoteId::from_uuid(row.id),
            author_id: AccountId::from_uuid(row.author_id),
            title: row.title,
            content: row.content,
            public: row.public,
            slug: row.slug,
            shared_with: row.shared_with,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for the note list view.
#[derive(Debug, Clone, FromRow)]
pub struct NoteSummaryRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub public: bool,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NoteSummaryRow> for NoteSummary {
    fn from(row: NoteSummaryRow) -> Self {
        Self {
            id: NoteId::from_uuid(row.id),
            author_id: AccountId::from_uuid(row.author_id),
            title: row.title,
            public: row.public,
            slug: row.slug,
            created_at: row.created_at,
        }
    }
}

/// Input for inserting a new note.
///
/// The id is assigned by the caller so the slug can embed it.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: NoteId,
    pub author_id: AccountId,
    pub title: String,
    pub content: String,
    pub public: bool,
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Owner-scoped replacement of a note's editable fields.
#[derive(Debug, Clone)]
pub struct NoteUpdate {
    pub id: NoteId,
    /// Only applied if this account owns the note.
    pub author_id: AccountId,
    pub title: String,
    pub content: String,
    pub public: bool,
    pub slug: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_row_drops_hash() {
        let row = AccountRow {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let id = row.id;
        let account = Account::from(row);
        assert_eq!(account.id.0, id);
        assert_eq!(account.email, "a@example.com");
    }

    #[test]
    fn test_note_row_into_note() {
        let now = Utc::now();
        let row = NoteRow {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "T".to_string(),
            content: "C".to_string(),
            public: false,
            slug: None,
            shared_with: vec!["b@example.com".to_string()],
            created_at: now,
            updated_at: now,
        };
        let note = Note::from(row.clone());
        assert_eq!(note.id.0, row.id);
        assert_eq!(note.shared_with, row.shared_with);
        assert_eq!(note.slug, None);
    }
}
