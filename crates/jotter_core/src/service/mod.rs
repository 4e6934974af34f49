//! Use-case services on top of the note store.
//!
//! # Responsibility
//! - Track the active note across list refreshes.
//! - Orchestrate store calls into the editing/import/export flows the UI
//!   layer drives.

pub mod selection;
pub mod session;
