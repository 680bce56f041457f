//! Live window registry.
//!
//! # Responsibility
//! - Map note ids to their live window handles.
//! - Be the single source of truth for "which notes have an open window".
//!
//! # Invariants
//! - At most one entry per note id.
//! - An entry exists iff a window for that note is currently open.
//! - Owned by the lifecycle controller and passed by reference where needed;
//!   never ambient global state.

use std::collections::HashMap;

use super::backend::NoteWindow;
use crate::model::note::NoteId;

/// Mapping from note id to live window handle.
///
/// Pure in-memory bookkeeping; no I/O. Accessed only from the single
/// event-processing context, so no internal locking.
#[derive(Default)]
pub struct WindowRegistry {
    windows: HashMap<NoteId, Box<dyn NoteWindow>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: NoteId) -> Option<&dyn NoteWindow> {
        self.windows.get(&id).map(Box::as_ref)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Box<dyn NoteWindow>> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Registers a newly created window.
    ///
    /// Overwrites any stale prior handle for the same id; stale handles
    /// should not exist under correct use, but overwrite is the defined
    /// recovery.
    pub fn insert(&mut self, id: NoteId, window: Box<dyn NoteWindow>) {
        if self.windows.insert(id, window).is_some() {
            log::warn!("event=window_register module=window status=ok note_id={id} stale=replaced");
        }
    }

    /// Deregisters a window; removing an absent id is a no-op.
    pub fn remove(&mut self, id: NoteId) -> Option<Box<dyn NoteWindow>> {
        self.windows.remove(&id)
    }

    /// Iterates all live windows in unspecified order.
    ///
    /// Used only for bulk close-all.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&NoteId, &mut Box<dyn NoteWindow>)> {
        self.windows.iter_mut()
    }

    pub fn ids(&self) -> Vec<NoteId> {
        self.windows.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.windows.clear();
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
