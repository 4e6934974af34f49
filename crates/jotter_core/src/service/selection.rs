//! Active-note tracking.
//!
//! # Responsibility
//! - Recompute which note is active after every list refresh.
//!
//! # Invariants
//! - The active id always names a note in the most recently seen list, or is
//!   `None` when that list is empty.
//! - An explicit selection survives refreshes while the note exists; once it
//!   disappears the controller falls back to the most recently updated note
//!   and drops the stale request.

use crate::model::note::{Note, NoteId};

/// Transient, derived selection state. Not persisted.
#[derive(Debug, Default)]
pub struct SelectionController {
    current: Vec<NoteId>,
    requested: Option<NoteId>,
    active: Option<NoteId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the active note from a freshly loaded, sorted list.
    ///
    /// An explicitly requested note wins while it still exists; otherwise
    /// the first element (most recently updated) becomes active, or nothing
    /// when the list is empty.
    pub fn refresh(&mut self, notes: &[Note]) {
        self.current = notes.iter().map(|note| note.id).collect();
        match self.requested {
            Some(id) if self.current.contains(&id) => self.active = Some(id),
            _ => {
                self.requested = None;
                self.active = self.current.first().copied();
            }
        }
    }

    /// Makes the note with the given id active, iff it is in the current
    /// list. A miss is a no-op and the prior active note remains.
    pub fn select(&mut self, id: NoteId) {
        if self.current.contains(&id) {
            self.requested = Some(id);
            self.active = Some(id);
        }
    }

    /// Id of the currently active note, if any.
    pub fn active_id(&self) -> Option<NoteId> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionController;
    use crate::model::note::Note;
    use chrono::{TimeZone, Utc};

    fn notes(ids: &[u64]) -> Vec<Note> {
        // Listed order stands in for updated-descending order; the
        // controller only looks at positions and ids.
        ids.iter()
            .enumerate()
            .map(|(index, id)| Note {
                id: *id,
                title: format!("note {id}"),
                body: "body".to_string(),
                updated: Utc
                    .with_ymd_and_hms(2024, 1, 1, 0, 0, 59 - index as u32)
                    .unwrap(),
            })
            .collect()
    }

    #[test]
    fn refresh_activates_the_first_note_by_default() {
        let mut selection = SelectionController::new();
        selection.refresh(&notes(&[5, 3, 9]));
        assert_eq!(selection.active_id(), Some(5));
    }

    #[test]
    fn refresh_of_empty_list_clears_the_active_note() {
        let mut selection = SelectionController::new();
        selection.refresh(&notes(&[5]));
        selection.refresh(&[]);
        assert_eq!(selection.active_id(), None);
    }

    #[test]
    fn select_miss_keeps_the_prior_active_note() {
        let mut selection = SelectionController::new();
        selection.refresh(&notes(&[5, 3]));
        selection.select(777);
        assert_eq!(selection.active_id(), Some(5));
    }

    #[test]
    fn explicit_selection_survives_refresh_while_present() {
        let mut selection = SelectionController::new();
        selection.refresh(&notes(&[5, 3, 9]));
        selection.select(9);
        selection.refresh(&notes(&[5, 3, 9]));
        assert_eq!(selection.active_id(), Some(9));
    }

    #[test]
    fn selection_falls_back_to_first_once_the_note_disappears() {
        let mut selection = SelectionController::new();
        selection.refresh(&notes(&[5, 2]));
        selection.select(5);
        selection.refresh(&notes(&[2]));
        assert_eq!(selection.active_id(), Some(2));

        // The stale request must not resurrect if id 5 comes back later.
        selection.refresh(&notes(&[2, 5]));
        assert_eq!(selection.active_id(), Some(2));
    }
}
