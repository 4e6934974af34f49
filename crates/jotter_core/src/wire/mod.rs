//! Import/export wire format.
//!
//! # Responsibility
//! - Serialize the stored collection to the exchange document and parse such
//!   documents back into note records.
//!
//! # Invariants
//! - `parse_notes(serialize_notes(x))` yields a collection equivalent to `x`.

pub mod xml;

pub use xml::{parse_notes, serialize_notes, WireError, WireResult};
