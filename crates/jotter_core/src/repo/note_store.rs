//! Note store contract and storage-slot implementation.
//!
//! # Responsibility
//! - Own all persisted note state: list, save, delete, bulk import, export.
//! - Apply the import reconciliation rule: overwrite on id match, append
//!   otherwise, timestamps taken verbatim.
//!
//! # Invariants
//! - Exactly one note per id in the stored collection.
//! - Every mutation performs a full read-modify-write under one lock, so
//!   mutations from this process never interleave mid-cycle.
//! - A corrupt or absent slot reads as an empty collection, never an error.

use crate::model::note::{Note, NoteId, SaveRequest};
use crate::storage::{StorageError, StorageSlot};
use crate::wire::{self, WireError};
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for note persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// Persistence medium inaccessible; surfaced, not retried.
    Storage(StorageError),
    /// Export requested with zero notes stored. Callers surface this as a
    /// "nothing to export" notice, not as a fault.
    EmptyCollection,
    /// Exchange-document serialization failed.
    Wire(WireError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::EmptyCollection => write!(f, "no notes stored, nothing to export"),
            Self::Wire(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::EmptyCollection => None,
            Self::Wire(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<WireError> for StoreError {
    fn from(value: WireError) -> Self {
        Self::Wire(value)
    }
}

/// Store interface the UI layer talks to.
pub trait NoteStore {
    /// Full stored collection, most recently updated first. Ties keep their
    /// stored order within a single call. Read-only.
    fn list_all(&self) -> StoreResult<Vec<Note>>;
    /// Creates or updates one note and persists the collection. Returns the
    /// note as persisted (id assigned, `updated` stamped).
    fn save(&self, request: SaveRequest) -> StoreResult<Note>;
    /// Removes the note with the given id if present. Idempotent.
    fn delete(&self, id: NoteId) -> StoreResult<()>;
    /// Merges an already-parsed batch: overwrite on id match, append
    /// otherwise, all fields verbatim. An empty batch is a no-op and does
    /// not touch storage.
    fn import_batch(&self, incoming: &[Note]) -> StoreResult<()>;
    /// Serialized exchange document of the full collection, or
    /// `EmptyCollection` when nothing is stored.
    fn export_xml(&self) -> StoreResult<String>;
}

/// Note store backed by one JSON storage slot.
///
/// Constructed explicitly and handed to its consumer; there is no ambient
/// global instance. The slot sits behind a mutex so each mutation's
/// read-modify-write cycle is atomic relative to other mutations through
/// this store.
pub struct JsonNoteStore<S: StorageSlot> {
    slot: Mutex<S>,
}

impl<S: StorageSlot> JsonNoteStore<S> {
    pub fn new(slot: S) -> Self {
        Self {
            slot: Mutex::new(slot),
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, S> {
        // A poisoned lock only means a prior caller panicked between read
        // and write; the slot itself still holds the last committed state.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Absent or unparseable slot content degrades to an empty collection
    /// instead of failing the operation.
    fn load(&self, slot: &S) -> StoreResult<Vec<Note>> {
        let Some(raw) = slot.read()? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                warn!("event=slot_unparseable module=store action=treat_as_empty error={err}");
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, slot: &S, notes: &[Note]) -> StoreResult<()> {
        let raw = serde_json::to_string(notes).map_err(|err| {
            // Only reachable if a timestamp fails to render, which RFC 3339
            // formatting of valid DateTime values does not do.
            StoreError::Storage(StorageError::Unavailable {
                reason: format!("encode collection: {err}"),
            })
        })?;
        slot.write(&raw)?;
        Ok(())
    }
}

impl<S: StorageSlot> NoteStore for JsonNoteStore<S> {
    fn list_all(&self) -> StoreResult<Vec<Note>> {
        let slot = self.lock_slot();
        let mut notes = self.load(&slot)?;
        // Stable sort: equal timestamps keep stored order.
        notes.sort_by(|a, b| b.updated.cmp(&a.updated));
        Ok(notes)
    }

    fn save(&self, request: SaveRequest) -> StoreResult<Note> {
        let slot = self.lock_slot();
        let mut notes = self.load(&slot)?;
        let now = Utc::now();

        let matched = match &request {
            SaveRequest::Update { id, .. } => notes.iter().position(|note| note.id == *id),
            SaveRequest::Create { .. } => None,
        };

        let saved = match matched {
            Some(index) => {
                let existing = &mut notes[index];
                existing.title = request.title().to_string();
                existing.body = request.body().to_string();
                existing.updated = now;
                existing.clone()
            }
            // Create, or update whose id matches nothing: append with a
            // fresh id that cannot collide with anything already stored,
            // verbatim-imported ids included.
            None => {
                let note = Note {
                    id: next_id(&notes),
                    title: request.title().to_string(),
                    body: request.body().to_string(),
                    updated: now,
                };
                notes.push(note.clone());
                note
            }
        };

        self.persist(&slot, &notes)?;
        info!(
            "event=note_saved module=store id={} total={}",
            saved.id,
            notes.len()
        );
        Ok(saved)
    }

    fn delete(&self, id: NoteId) -> StoreResult<()> {
        let slot = self.lock_slot();
        let mut notes = self.load(&slot)?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        self.persist(&slot, &notes)?;
        debug!(
            "event=note_deleted module=store id={id} removed={}",
            before - notes.len()
        );
        Ok(())
    }

    fn import_batch(&self, incoming: &[Note]) -> StoreResult<()> {
        if incoming.is_empty() {
            return Ok(());
        }

        let slot = self.lock_slot();
        let mut notes = self.load(&slot)?;
        let mut overwritten = 0usize;
        for record in incoming {
            if let Some(existing) = notes.iter_mut().find(|note| note.id == record.id) {
                existing.title = record.title.clone();
                existing.body = record.body.clone();
                // Deliberate asymmetry with save: the payload timestamp is
                // kept verbatim, not regenerated.
                existing.updated = record.updated;
                overwritten += 1;
            } else {
                notes.push(record.clone());
            }
        }
        self.persist(&slot, &notes)?;
        info!(
            "event=batch_imported module=store incoming={} overwritten={} total={}",
            incoming.len(),
            overwritten,
            notes.len()
        );
        Ok(())
    }

    fn export_xml(&self) -> StoreResult<String> {
        let notes = self.list_all()?;
        if notes.is_empty() {
            return Err(StoreError::EmptyCollection);
        }
        let document = wire::serialize_notes(&notes)?;
        info!("event=collection_exported module=store total={}", notes.len());
        Ok(document)
    }
}

/// Next free id: one past the highest id in the collection.
///
/// Imported records keep caller-supplied ids, which may sit at the very top
/// of the id space; when `max + 1` would overflow, fall back to the smallest
/// unused id instead.
fn next_id(notes: &[Note]) -> NoteId {
    match notes.iter().map(|note| note.id).max() {
        None => 1,
        Some(max) => max.checked_add(1).unwrap_or_else(|| {
            let taken: BTreeSet<NoteId> = notes.iter().map(|note| note.id).collect();
            (1..NoteId::MAX)
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or(NoteId::MAX)
        }),
    }
}
