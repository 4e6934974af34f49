//! In-memory storage slot for tests and ephemeral sessions.

use crate::storage::{StorageResult, StorageSlot};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Storage slot held entirely in memory.
///
/// Tracks its write count so tests can assert which operations persist.
#[derive(Debug, Default)]
pub struct MemorySlot {
    content: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-seeded with raw content, bypassing `write`.
    pub fn seeded(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `write` calls observed so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> StorageResult<Option<String>> {
        let guard = self
            .content
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn write(&self, content: &str) -> StorageResult<()> {
        let mut guard = self
            .content
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
