//! Core data types for the notes service.
//!
//! An account owns notes. A note is private by default; it becomes readable
//! by anyone holding its slug when made public, and by specific readers when
//! its owner shares it with their email address.
//!
//! None of the outward types carry a password credential. The hash only
//! exists on the storage row type in notes-store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Creates a new random AccountId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AccountId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a note.
///
/// The first characters of its hyphenated form double as the slug suffix,
/// see [`crate::derive_slug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// A registered account as seen outside the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The identity resolved from a valid bearer credential.
///
/// Public lookups compare `account_id` against the note owner and `email`
/// against the note's share grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub account_id: AccountId,
    pub email: String,
}

impl Viewer {
    pub fn new(account_id: AccountId, email: impl Into<String>) -> Self {
        Self {
            account_id,
            email: email.into(),
        }
    }
}

// ============================================================================
// Notes
// ============================================================================

/// A full note, including its body and the emails it is shared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub author_id: AccountId,
    pub title: String,
    pub content: String,
    pub public: bool,
    /// Always set on public notes. Private notes gain one once updated or shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Emails granted read access. Only populated for the owner.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_with: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Whether `account` owns this note.
    pub fn is_owned_by(&self, account: AccountId) -> bool {
        self.author_id == account
    }

    /// The list view of this note.
    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id,
            author_id: self.author_id,
            title: self.title.clone(),
            public: self.public,
            slug: self.slug.clone(),
            created_at: self.created_at,
        }
    }
}

/// Lightweight listing entry for a note (no content body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub author_id: AccountId,
    pub title: String,
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_note(public: bool) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::new(),
            author_id: AccountId::new(),
            title: "Groceries".to_string(),
            content: "milk, eggs".to_string(),
            public,
            slug: public.then(|| "groceries-abcdef".to_string()),
            shared_with: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_note_id_round_trips_through_str() {
        let id = NoteId::new();
        let parsed: NoteId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_note_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = AccountId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }

    #[test]
    fn test_private_note_omits_slug_and_shares() {
        let json = serde_json::to_value(sample_note(false)).unwrap();
        assert!(json.get("slug").is_none());
        assert!(json.get("shared_with").is_none());
        assert_eq!(json["public"], false);
    }

    #[test]
    fn test_public_note_serializes_slug() {
        let json = serde_json::to_value(sample_note(true)).unwrap();
        assert_eq!(json["slug"], "groceries-abcdef");
    }

    #[test]
    fn test_summary_drops_content() {
        let note = sample_note(true);
        let summary = note.summary();
        assert_eq!(summary.id, note.id);
        assert_eq!(summary.slug, note.slug);
        let json = serde_json::to_value(summary).unwrap();
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_account_has_no_password_field() {
        let account = Account {
            id: AccountId::new(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(account).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_is_owned_by() {
        let note = sample_note(false);
        assert!(note.is_owned_by(note.author_id));
        assert!(!note.is_owned_by(AccountId::new()));
    }
}
