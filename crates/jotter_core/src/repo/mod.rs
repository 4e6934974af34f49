//! Store layer: the sole writer to the persistence medium.
//!
//! # Responsibility
//! - Define the note-store contract and its slot-backed implementation.
//! - Keep slot/serialization details out of service orchestration.
//!
//! # Invariants
//! - Every mutation is one read-modify-write cycle over the whole collection.
//! - Store APIs return semantic errors (`EmptyCollection`) in addition to
//!   transport errors.

pub mod note_store;
