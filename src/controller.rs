//! The note store controller.
//!
//! Owns an injected [`KeyValueStore`] and runs the five note transitions
//! against it. Every operation reloads both lists from the store, so the
//! store stays the canonical copy and callers only ever hold read copies.

use thiserror::Error;

use crate::models::{Note, TrashedNote};
use crate::notes::{NoteDraft, NoteError, NoteLists};
use crate::storage::{
    DEFAULT_NOTES_KEY, DEFAULT_TRASH_KEY, KeyValueStore, StorageError, load_list, save_list,
};
use crate::utils::{self, IdStrategy};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    InvalidNote(#[from] NoteError),
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ControllerError {
    /// True for the "empty note" condition the user should be alerted about
    pub fn is_empty_text(&self) -> bool {
        matches!(self, ControllerError::InvalidNote(NoteError::EmptyText))
    }
}

/// Source of "now" for creation and deletion timestamps
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        utils::now_millis()
    }
}

/// Which rendered views are stale after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    pub active: bool,
    pub trash: bool,
}

impl Refresh {
    pub const NONE: Refresh = Refresh { active: false, trash: false };
    pub const ACTIVE: Refresh = Refresh { active: true, trash: false };
    pub const TRASH: Refresh = Refresh { active: false, trash: true };
    pub const BOTH: Refresh = Refresh { active: true, trash: true };

    pub fn is_none(&self) -> bool {
        !self.active && !self.trash
    }
}

/// Storage keys for the two lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub notes: String,
    pub trash: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            notes: DEFAULT_NOTES_KEY.to_string(),
            trash: DEFAULT_TRASH_KEY.to_string(),
        }
    }
}

pub struct NoteController<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    keys: StoreKeys,
    id_strategy: IdStrategy,
}

impl<S: KeyValueStore> NoteController<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> NoteController<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            keys: StoreKeys::default(),
            id_strategy: IdStrategy::default(),
        }
    }

    pub fn keys(mut self, keys: StoreKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active notes, newest first
    pub fn notes(&self) -> Vec<Note> {
        load_list(&self.store, &self.keys.notes)
    }

    /// Trashed notes, newest first
    pub fn trash(&self) -> Vec<TrashedNote> {
        load_list(&self.store, &self.keys.trash)
    }

    fn load_lists(&self) -> NoteLists {
        NoteLists::new(self.notes(), self.trash())
    }

    fn save_notes(&mut self, lists: &NoteLists) -> Result<(), StorageError> {
        save_list(&mut self.store, &self.keys.notes, &lists.notes)
    }

    fn save_trash(&mut self, lists: &NoteLists) -> Result<(), StorageError> {
        save_list(&mut self.store, &self.keys.trash, &lists.trash)
    }

    /// Pick an id not used by any note in either list
    fn fresh_id(&self, lists: &NoteLists, now: i64) -> String {
        let base = utils::generate_id(self.id_strategy, now);
        if !lists.contains_id(&base) {
            return base;
        }
        let mut suffix = 1u32;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if !lists.contains_id(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Create a note from the draft and put it first in the active list.
    ///
    /// Whitespace-only text is rejected with [`NoteError::EmptyText`] and
    /// nothing is written.
    pub fn add(&mut self, draft: NoteDraft) -> Result<Note, ControllerError> {
        draft.validate()?;

        let mut lists = self.load_lists();
        let now = self.clock.now_millis();
        let id = self.fresh_id(&lists, now);
        let note = draft.into_note(id, now)?;

        lists.add(note.clone());
        self.save_notes(&lists)?;

        log::info!("event=note_added id={}", note.id);
        Ok(note)
    }

    /// Move an active note to the trash. Unknown ids change nothing.
    pub fn move_to_trash(&mut self, id: &str) -> Result<Refresh, ControllerError> {
        let mut lists = self.load_lists();
        let now = self.clock.now_millis();
        if !lists.move_to_trash(id, now) {
            log::debug!("event=move_to_trash_miss id={}", id);
            return Ok(Refresh::NONE);
        }

        self.save_notes(&lists)?;
        self.save_trash(&lists)?;

        log::info!("event=note_trashed id={}", id);
        Ok(Refresh::BOTH)
    }

    /// Bring a trashed note back to the active list. Unknown ids change nothing.
    pub fn restore_from_trash(&mut self, id: &str) -> Result<Refresh, ControllerError> {
        let mut lists = self.load_lists();
        if !lists.restore(id) {
            log::debug!("event=restore_miss id={}", id);
            return Ok(Refresh::NONE);
        }

        self.save_trash(&lists)?;
        self.save_notes(&lists)?;

        log::info!("event=note_restored id={}", id);
        Ok(Refresh::BOTH)
    }

    /// Remove a note from the trash permanently. The trash is rewritten even
    /// when `id` is absent.
    pub fn delete_forever(&mut self, id: &str) -> Result<Refresh, ControllerError> {
        let mut lists = self.load_lists();
        let removed = lists.delete_forever(id);
        self.save_trash(&lists)?;

        log::info!("event=note_deleted id={} removed={}", id, removed);
        Ok(Refresh::TRASH)
    }

    /// Drop every trashed note
    pub fn empty_trash(&mut self) -> Result<Refresh, ControllerError> {
        let mut lists = self.load_lists();
        let count = lists.empty_trash();
        self.save_trash(&lists)?;

        log::info!("event=trash_emptied count={}", count);
        Ok(Refresh::TRASH)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::cell::Cell;

    /// Clock that moves forward by one second on every read
    #[derive(Debug, Default)]
    pub(crate) struct SteppingClock {
        now: Cell<i64>,
    }

    impl SteppingClock {
        pub(crate) fn starting_at(millis: i64) -> Self {
            Self { now: Cell::new(millis) }
        }
    }

    impl Clock for SteppingClock {
        fn now_millis(&self) -> i64 {
            let now = self.now.get();
            self.now.set(now + 1_000);
            now
        }
    }

    fn controller() -> NoteController<MemoryStore, SteppingClock> {
        NoteController::with_clock(MemoryStore::new(), SteppingClock::starting_at(1_700_000_000_000))
    }

    #[test]
    fn add_puts_new_note_first() {
        let mut c = controller();
        c.add(NoteDraft::new("first", "one")).unwrap();
        let second = c.add(NoteDraft::new("second", "two")).unwrap();

        let notes = c.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], second);
    }

    #[test]
    fn add_whitespace_text_is_rejected_without_writing() {
        let mut c = controller();
        c.add(NoteDraft::new("kept", "body")).unwrap();

        let err = c.add(NoteDraft::new("title", "   \n")).unwrap_err();
        assert!(err.is_empty_text());
        assert_eq!(c.notes().len(), 1);
    }

    #[test]
    fn trash_then_restore_keeps_note_intact() {
        let mut c = controller();
        let note = c.add(NoteDraft::new("A", "hello")).unwrap();

        assert_eq!(c.move_to_trash(&note.id).unwrap(), Refresh::BOTH);
        assert!(c.notes().is_empty());
        let trash = c.trash();
        assert_eq!(trash.len(), 1);
        assert!(trash[0].deleted_at > trash[0].note.created_at);

        assert_eq!(c.restore_from_trash(&note.id).unwrap(), Refresh::BOTH);
        assert_eq!(c.notes(), vec![note]);
        assert!(c.trash().is_empty());
    }

    #[test]
    fn misses_are_silent_noops() {
        let mut c = controller();
        c.add(NoteDraft::new("", "x")).unwrap();
        let before = (c.notes(), c.trash());

        assert!(c.move_to_trash("nope").unwrap().is_none());
        assert!(c.restore_from_trash("nope").unwrap().is_none());
        assert_eq!((c.notes(), c.trash()), before);
    }

    #[test]
    fn delete_forever_always_refreshes_trash() {
        let mut c = controller();
        let keep = c.add(NoteDraft::new("", "keep")).unwrap();
        let gone = c.add(NoteDraft::new("", "gone")).unwrap();
        c.move_to_trash(&gone.id).unwrap();

        assert_eq!(c.delete_forever("absent").unwrap(), Refresh::TRASH);
        assert_eq!(c.trash().len(), 1);
        assert_eq!(c.delete_forever(&gone.id).unwrap(), Refresh::TRASH);
        assert!(c.trash().is_empty());
        assert_eq!(c.notes(), vec![keep]);
    }

    #[test]
    fn empty_trash_clears_only_trash() {
        let mut c = controller();
        for text in ["a", "b", "c"] {
            c.add(NoteDraft::new("", text)).unwrap();
        }
        let ids: Vec<_> = c.notes().into_iter().map(|n| n.id).collect();
        c.move_to_trash(&ids[0]).unwrap();
        c.move_to_trash(&ids[1]).unwrap();

        c.empty_trash().unwrap();
        assert!(c.trash().is_empty());
        assert_eq!(c.notes().len(), 1);
    }

    #[test]
    fn timestamp_ids_stay_unique_within_one_millisecond() {
        struct FrozenClock;
        impl Clock for FrozenClock {
            fn now_millis(&self) -> i64 {
                42
            }
        }

        let mut c = NoteController::with_clock(MemoryStore::new(), FrozenClock)
            .id_strategy(IdStrategy::Timestamp);
        let a = c.add(NoteDraft::new("", "a")).unwrap();
        let b = c.add(NoteDraft::new("", "b")).unwrap();
        c.move_to_trash(&a.id).unwrap();
        let d = c.add(NoteDraft::new("", "c")).unwrap();

        assert_eq!(a.id, "42");
        assert_eq!(b.id, "42-1");
        assert_eq!(d.id, "42-2");
    }

    #[test]
    fn custom_keys_are_used_for_storage() {
        let keys = StoreKeys { notes: "n".into(), trash: "t".into() };
        let mut c = controller().keys(keys);
        let note = c.add(NoteDraft::new("", "x")).unwrap();
        c.move_to_trash(&note.id).unwrap();

        assert_eq!(c.store().get_item("n").unwrap().as_deref(), Some("[]"));
        assert!(c.store().get_item("t").unwrap().unwrap().contains(&note.id));
        assert!(c.store().get_item(DEFAULT_NOTES_KEY).unwrap().is_none());
    }
}
