//! Domain model for the note store.
//!
//! # Responsibility
//! - Define the canonical persisted record and the save-request shapes.
//!
//! # Invariants
//! - Every stored note is identified by a unique `NoteId`.
//! - `updated` is stamped by the store (or taken verbatim on import), never
//!   by UI-layer code.

pub mod note;
