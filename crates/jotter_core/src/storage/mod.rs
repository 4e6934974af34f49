//! Persistence medium: one named slot holding one serialized document.
//!
//! # Responsibility
//! - Abstract the storage slot behind a trait so the store can be backed by
//!   a file in production and by memory in tests.
//! - Keep writes atomic from the caller's perspective.
//!
//! # Invariants
//! - `read` never fabricates content: an absent slot is `None`, not an error.
//! - `write` replaces the whole slot in one step; partial content is never
//!   observable by a subsequent `read`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence medium failure.
///
/// Surfaced to the caller as fatal for the operation; the store never
/// retries.
#[derive(Debug)]
pub enum StorageError {
    Unavailable { reason: String },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Unavailable {
            reason: value.to_string(),
        }
    }
}

/// A single named storage slot.
///
/// The note store serializes the full collection into this slot and reads it
/// back wholesale; there is no finer-grained access.
pub trait StorageSlot {
    /// Returns the slot content, or `None` when nothing was ever written.
    fn read(&self) -> StorageResult<Option<String>>;
    /// Replaces the slot content atomically.
    fn write(&self, content: &str) -> StorageResult<()>;
}

impl<S: StorageSlot + ?Sized> StorageSlot for &S {
    fn read(&self) -> StorageResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, content: &str) -> StorageResult<()> {
        (**self).write(content)
    }
}
