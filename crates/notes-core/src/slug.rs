//! Slug derivation for public notes.
//!
//! A slug is the lowercased title with spaces turned into hyphens, followed
//! by a hyphen and the first [`SLUG_SUFFIX_LEN`] characters of the note id.
//! The suffix keeps same-titled notes apart; there is no retry loop, the
//! `notes.slug` unique index is the only collision guard.

use crate::types::NoteId;

/// Number of note id characters appended to a slug.
pub const SLUG_SUFFIX_LEN: usize = 6;

/// Derive the slug for a note with the given title and id.
pub fn derive_slug(title: &str, id: NoteId) -> String {
    let base = title.to_lowercase().replace(' ', "-");
    // The hyphenated UUID form is ASCII hex, so byte slicing is safe.
    let id = id.to_string();
    format!("{}-{}", base, &id[..SLUG_SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(s: &str) -> NoteId {
        NoteId::from_uuid(Uuid::parse_str(s).unwrap())
    }

    #[test]
    fn test_my_first_note() {
        let note_id = id("3f2a9c1e-0000-4000-8000-000000000000");
        assert_eq!(derive_slug("My First Note", note_id), "my-first-note-3f2a9c");
    }

    #[test]
    fn test_suffix_is_id_prefix() {
        let note_id = NoteId::new();
        let slug = derive_slug("Anything", note_id);
        let suffix = slug.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), SLUG_SUFFIX_LEN);
        assert!(note_id.to_string().starts_with(suffix));
    }

    #[test]
    fn test_same_title_different_ids() {
        let a = id("aaaaaa00-0000-4000-8000-000000000000");
        let b = id("bbbbbb00-0000-4000-8000-000000000000");
        assert_ne!(derive_slug("Todo", a), derive_slug("Todo", b));
    }

    #[test]
    fn test_deterministic() {
        let note_id = NoteId::new();
        assert_eq!(derive_slug("Weekly Plan", note_id), derive_slug("Weekly Plan", note_id));
    }

    #[test]
    fn test_every_space_becomes_hyphen() {
        let note_id = id("12345678-0000-4000-8000-000000000000");
        assert_eq!(derive_slug("a  b", note_id), "a--b-123456");
    }
}
