//! Core domain logic for Jotter, a single-user note store.
//! This crate is the single source of truth for persistence and
//! reconciliation invariants; UI layers stay behind the session facade.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod wire;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{validate_draft, Note, NoteId, SaveRequest, ValidationError};
pub use repo::note_store::{JsonNoteStore, NoteStore, StoreError, StoreResult};
pub use service::selection::SelectionController;
pub use service::session::{NotesSession, SessionError};
pub use storage::{FileSlot, MemorySlot, StorageError, StorageResult, StorageSlot};
pub use wire::{parse_notes, serialize_notes, WireError, WireResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
