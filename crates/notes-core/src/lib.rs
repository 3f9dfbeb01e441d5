//! notes-core: domain types and rules for the notes service
//!
//! This crate provides:
//! - Typed identifiers for accounts and notes
//! - The outward-facing `Account`, `Note` and `NoteSummary` types
//! - Slug derivation for publicly addressable notes
//! - Input validation shared by the identity and notes components
//!
//! Nothing in here touches storage or HTTP; the store and server crates
//! build on these types.

pub mod slug;
pub mod types;
pub mod validate;

pub use slug::{SLUG_SUFFIX_LEN, derive_slug};
pub use types::*;
pub use validate::{MIN_PASSWORD_LEN, ValidationError};
