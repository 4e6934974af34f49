//! Editing session: the store plus active-note state, refreshed as one unit.
//!
//! # Responsibility
//! - Run the caller-side draft validation the store deliberately does not.
//! - Refresh the cached list and the selection after every mutation.
//! - Plumb exchange documents between the wire codec and the store.
//!
//! # Invariants
//! - `notes()` always reflects the store state as of the last successful
//!   operation, sorted most recently updated first.
//! - Validation failures leave both the store and the cached list untouched.

use crate::model::note::{validate_draft, Note, NoteId, SaveRequest, ValidationError};
use crate::repo::note_store::{NoteStore, StoreError, StoreResult};
use crate::service::selection::SelectionController;
use crate::wire::{self, WireError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session-level error for the UI-facing flows.
#[derive(Debug)]
pub enum SessionError {
    /// Draft rejected before it reached the store.
    Validation(ValidationError),
    /// Store or persistence-medium failure.
    Store(StoreError),
    /// Import document could not be parsed.
    Wire(WireError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Wire(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Wire(err) => Some(err),
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<WireError> for SessionError {
    fn from(value: WireError) -> Self {
        Self::Wire(value)
    }
}

/// Single-user editing session over an injected note store.
pub struct NotesSession<R: NoteStore> {
    store: R,
    selection: SelectionController,
    notes: Vec<Note>,
}

impl<R: NoteStore> NotesSession<R> {
    /// Opens a session and performs the initial list refresh.
    pub fn open(store: R) -> Result<Self, SessionError> {
        let mut session = Self {
            store,
            selection: SelectionController::new(),
            notes: Vec::new(),
        };
        session.refresh()?;
        Ok(session)
    }

    /// Reloads the list from the store and recomputes the active note.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        self.notes = self.store.list_all()?;
        self.selection.refresh(&self.notes);
        debug!(
            "event=session_refreshed module=session total={} active={:?}",
            self.notes.len(),
            self.selection.active_id()
        );
        Ok(())
    }

    /// Cached list, most recently updated first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Currently active note, if any.
    pub fn active(&self) -> Option<&Note> {
        let id = self.selection.active_id()?;
        self.notes.iter().find(|note| note.id == id)
    }

    /// Creates a note from an editor draft. This is the editing path, so the
    /// empty-field check runs before the store is touched.
    pub fn create(&mut self, title: &str, body: &str) -> Result<Note, SessionError> {
        validate_draft(title, body)?;
        let saved = self.store.save(SaveRequest::Create {
            title: title.to_string(),
            body: body.to_string(),
        })?;
        self.refresh()?;
        Ok(saved)
    }

    /// Updates a note from an editor draft, validating first.
    pub fn update(&mut self, id: NoteId, title: &str, body: &str) -> Result<Note, SessionError> {
        validate_draft(title, body)?;
        let saved = self.store.save(SaveRequest::Update {
            id,
            title: title.to_string(),
            body: body.to_string(),
        })?;
        self.refresh()?;
        Ok(saved)
    }

    /// Deletes a note (idempotent) and lets the selection fall back.
    pub fn remove(&mut self, id: NoteId) -> Result<(), SessionError> {
        self.store.delete(id)?;
        self.refresh()
    }

    /// Marks a note active. Misses are no-ops, matching the store-less
    /// selection rule.
    pub fn select(&mut self, id: NoteId) {
        self.selection.select(id);
    }

    /// Parses an exchange document and merges it into the store.
    pub fn import_xml(&mut self, document: &str) -> Result<usize, SessionError> {
        let incoming = wire::parse_notes(document)?;
        let count = incoming.len();
        self.store.import_batch(&incoming)?;
        self.refresh()?;
        Ok(count)
    }

    /// Serialized exchange document of everything stored.
    ///
    /// `StoreError::EmptyCollection` stays distinct so the caller can show a
    /// "nothing to export" notice instead of a failure.
    pub fn export_xml(&self) -> StoreResult<String> {
        self.store.export_xml()
    }
}
