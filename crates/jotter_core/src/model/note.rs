//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` record and the two save-request shapes.
//! - Provide the draft validation the editing path must run before saving.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a stored note and never reassigned.
//! - `updated` is the sole list sort key and always reflects the most recent
//!   successful save (import keeps payload values verbatim).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a stored note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = u64;

/// The sole persisted entity: one note.
///
/// Serializes to the storage-slot shape
/// `{id: number, title: string, body: string, updated: string}` with
/// `updated` rendered as an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned on creation; taken verbatim on import.
    pub id: NoteId,
    pub title: String,
    pub body: String,
    /// Stamped by the store on every create/update.
    pub updated: DateTime<Utc>,
}

/// Save input, statically split by intent.
///
/// The two paths were distinguished by field presence in looser shapes;
/// keeping them as variants makes create-vs-update explicit at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    /// New note; the store assigns the id.
    Create { title: String, body: String },
    /// Update in place when `id` matches a stored note; otherwise the store
    /// appends a fresh note (the caller-supplied id is not kept).
    Update {
        id: NoteId,
        title: String,
        body: String,
    },
}

impl SaveRequest {
    /// Title of the draft regardless of variant.
    pub fn title(&self) -> &str {
        match self {
            Self::Create { title, .. } | Self::Update { title, .. } => title,
        }
    }

    /// Body of the draft regardless of variant.
    pub fn body(&self) -> &str {
        match self {
            Self::Create { body, .. } | Self::Update { body, .. } => body,
        }
    }
}

/// Draft rejection reasons for the editing path.
///
/// The store itself does not run this check; callers on the editing path
/// must validate before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyBody,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyBody => write!(f, "note body must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Checks an editor draft for empty fields.
///
/// Whitespace-only input counts as empty.
pub fn validate_draft(title: &str, body: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyBody);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_draft, Note, SaveRequest, ValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn validate_draft_rejects_empty_and_whitespace_fields() {
        assert_eq!(validate_draft("", "body"), Err(ValidationError::EmptyTitle));
        assert_eq!(
            validate_draft("title", "   "),
            Err(ValidationError::EmptyBody)
        );
        assert_eq!(validate_draft("title", "body"), Ok(()));
    }

    #[test]
    fn save_request_exposes_draft_fields_for_both_variants() {
        let create = SaveRequest::Create {
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let update = SaveRequest::Update {
            id: 7,
            title: "t2".to_string(),
            body: "b2".to_string(),
        };
        assert_eq!(create.title(), "t");
        assert_eq!(update.body(), "b2");
    }

    #[test]
    fn note_serializes_updated_as_rfc3339_text() {
        let note = Note {
            id: 1,
            title: "a".to_string(),
            body: "b".to_string(),
            updated: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("2024-05-01T12:00:00Z"));
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
