//! List-mutation rules for active and trashed notes.
//!
//! Everything here is pure: callers supply ids and timestamps, and nothing
//! touches storage. Both lists are newest-first, and an id lives in at most
//! one of them.

use thiserror::Error;

use crate::models::{Note, TrashedNote};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("Please enter a note.")]
    EmptyText,
}

/// User input for a note that has not been saved yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Check that the trimmed text is non-empty
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.text.trim().is_empty() {
            return Err(NoteError::EmptyText);
        }
        Ok(())
    }

    /// Turn the draft into a note with trimmed title and text
    pub fn into_note(self, id: String, created_at: i64) -> Result<Note, NoteError> {
        self.validate()?;
        Ok(Note::new(
            id,
            self.title.trim().to_string(),
            self.text.trim().to_string(),
            created_at,
        ))
    }
}

/// The two ordered note lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteLists {
    pub notes: Vec<Note>,
    pub trash: Vec<TrashedNote>,
}

impl NoteLists {
    pub fn new(notes: Vec<Note>, trash: Vec<TrashedNote>) -> Self {
        Self { notes, trash }
    }

    /// True if `id` is used by an active or a trashed note
    pub fn contains_id(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id) || self.trash.iter().any(|t| t.id() == id)
    }

    /// Put a new note at the front of the active list
    pub fn add(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Move an active note to the front of the trash.
    ///
    /// Returns false (and changes nothing) if `id` is not active.
    pub fn move_to_trash(&mut self, id: &str, now: i64) -> bool {
        let Some(pos) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        let note = self.notes.remove(pos);
        self.trash.insert(0, note.into_trashed(now));
        true
    }

    /// Move a trashed note back to the front of the active list.
    ///
    /// Returns false (and changes nothing) if `id` is not in the trash.
    pub fn restore(&mut self, id: &str) -> bool {
        let Some(pos) = self.trash.iter().position(|t| t.id() == id) else {
            return false;
        };
        let trashed = self.trash.remove(pos);
        self.notes.insert(0, trashed.restore());
        true
    }

    /// Drop `id` from the trash for good. Returns whether anything was removed.
    pub fn delete_forever(&mut self, id: &str) -> bool {
        let before = self.trash.len();
        self.trash.retain(|t| t.id() != id);
        self.trash.len() != before
    }

    /// Clear the trash, returning how many notes were dropped
    pub fn empty_trash(&mut self) -> usize {
        let count = self.trash.len();
        self.trash.clear();
        count
    }
}
