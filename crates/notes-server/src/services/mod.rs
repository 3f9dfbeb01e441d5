//! Business logic between the HTTP handlers and the repositories.

pub mod identity;
pub mod notes;

pub use identity::{IdentityError, IdentityService, Session};
pub use notes::{NoteError, NoteInput, NotesService};
