//! In-memory note collection, selection set and stacking counter.
//!
//! # Responsibility
//! - Own the ordered note collection and mediate all reads/writes.
//! - Implement click/shift-click selection semantics.
//! - Hand out monotonically increasing z-indexes.
//!
//! # Invariants
//! - The selection set is always a subset of existing note ids.
//! - `max_z` never decreases; every bring-to-front bumps it.
//! - Note order is insertion order and stays stable across interactions,
//!   which keeps drag snap-target iteration deterministic.

use crate::geometry::BASE_Z_INDEX;
use crate::model::note::{Note, NoteId};
use std::collections::BTreeSet;

/// Single-writer store for all board state.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    selection: BTreeSet<NoteId>,
    max_z: i64,
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            selection: BTreeSet::new(),
            max_z: BASE_Z_INDEX,
        }
    }

    /// Builds a store from loaded notes, seeding the stacking counter from
    /// the highest persisted z-index.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let max_z = notes
            .iter()
            .map(|note| note.z_index)
            .fold(BASE_Z_INDEX, i64::max);
        Self {
            notes,
            selection: BTreeSet::new(),
            max_z,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == id)
    }

    pub fn insert(&mut self, note: Note) {
        self.max_z = self.max_z.max(note.z_index);
        self.notes.push(note);
    }

    /// Removes a note and its selection entry. Stale ids are a no-op.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        self.selection.remove(&id);
        let index = self.notes.iter().position(|note| note.id == id)?;
        Some(self.notes.remove(index))
    }

    /// Allocates the next stacking-order value.
    pub fn next_z(&mut self) -> i64 {
        self.max_z += 1;
        self.max_z
    }

    /// Bumps a note to the top of the stack. Returns the new z-index, or
    /// `None` for stale ids.
    pub fn bring_to_front(&mut self, id: NoteId) -> Option<i64> {
        self.notes.iter().position(|note| note.id == id)?;
        let z = self.next_z();
        if let Some(note) = self.get_mut(id) {
            note.z_index = z;
        }
        Some(z)
    }

    pub fn selection(&self) -> &BTreeSet<NoteId> {
        &self.selection
    }

    pub fn is_selected(&self, id: NoteId) -> bool {
        self.selection.contains(&id)
    }

    /// Group styling applies only when more than one note is selected.
    pub fn is_group_selected(&self) -> bool {
        self.selection.len() > 1
    }

    /// Plain-click semantics: an already-selected note keeps the whole
    /// current selection (that is what makes a group drag possible);
    /// anything else becomes the sole selection.
    pub fn click_select(&mut self, id: NoteId) {
        if self.get(id).is_none() {
            return;
        }
        if !self.selection.contains(&id) {
            self.selection.clear();
            self.selection.insert(id);
        }
    }

    /// Shift-click semantics: toggle membership, leave the rest alone.
    pub fn shift_toggle(&mut self, id: NoteId) {
        if self.get(id).is_none() {
            return;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Makes a note the sole selection regardless of prior state.
    pub fn select_only(&mut self, id: NoteId) {
        if self.get(id).is_none() {
            return;
        }
        self.selection.clear();
        self.selection.insert(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drops everything; used by clear-all.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.selection.clear();
        self.max_z = BASE_Z_INDEX;
    }
}
