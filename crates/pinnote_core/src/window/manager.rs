//! Floating note window lifecycle controller and restore sequencer.
//!
//! # Responsibility
//! - Create windows (new or focus-existing), tear them down, and persist
//!   geometry/visibility changes back to the note store.
//! - Recreate the persisted floating window set on startup.
//! - Route drag gestures and context menu traffic to the right window.
//!
//! # Invariants
//! - Opening an already-open note never creates a second window.
//! - Every store write triggered by a window event is best-effort: failures
//!   are logged and swallowed; the in-memory window stays authoritative.
//! - The set of floating windows after restore equals the set of notes
//!   persisted as floating at last clean shutdown, modulo notes that
//!   individually fail to restore.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use super::backend::{centered_position, WindowSpec, WindowSystem, DEFAULT_NOTE_SIZE};
use super::drag::DragCoordinator;
use super::menu::{build_context_menu, ContextMenuRequest, MenuAction};
use super::registry::WindowRegistry;
use super::WindowError;
use crate::model::note::{NoteId, NoteRecord, Position, Size};
use crate::repo::note_store::{NoteStore, NoteUpdate, StoreResult};

/// Placement hints for `open_floating_note`; absent fields fall back to the
/// default size (280x320) centered on the primary work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenNoteOptions {
    pub id: NoteId,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub z_index: Option<i64>,
}

impl OpenNoteOptions {
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            x: None,
            y: None,
            width: None,
            height: None,
            z_index: None,
        }
    }

    /// Placement taken from a persisted note record, as used by restore.
    pub fn from_record(note: &NoteRecord) -> Self {
        Self {
            id: note.id,
            x: note.position.map(|p| p.x),
            y: note.position.map(|p| p.y),
            width: note.width,
            height: note.height,
            z_index: Some(note.z_index),
        }
    }
}

/// What `open_floating_note` did for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new window was constructed and registered.
    Created,
    /// A live window already existed; it was un-minimized and focused.
    FocusedExisting,
}

/// Controller for the floating note window set.
///
/// Owns the window registry and drag coordinator; generic over the note
/// store and the window system so tests can run against an in-memory store
/// and a fake backend.
pub struct FloatingNoteManager<S: NoteStore, B: WindowSystem> {
    store: S,
    backend: B,
    registry: WindowRegistry,
    drags: DragCoordinator,
}

impl<S: NoteStore, B: WindowSystem> FloatingNoteManager<S, B> {
    pub fn new(store: S, backend: B) -> Self {
        Self {
            store,
            backend,
            registry: WindowRegistry::new(),
            drags: DragCoordinator::new(),
        }
    }

    /// Live window bookkeeping, for callers that need to inspect the set.
    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    /// Opens a floating window for the note, or focuses the existing one.
    ///
    /// Also persists `is_floating=true` with the effective geometry
    /// (best-effort), so a note opened programmatically survives restart
    /// via [`restore_floating_notes`](Self::restore_floating_notes).
    ///
    /// # Errors
    /// - [`WindowError::Creation`] when the backend fails to construct the
    ///   window; nothing is registered in that case.
    pub fn open_floating_note(
        &mut self,
        options: OpenNoteOptions,
    ) -> Result<OpenOutcome, WindowError> {
        let id = options.id;
        if let Some(window) = self.registry.get_mut(id) {
            if window.is_minimized() {
                window.restore();
            }
            window.focus();
            debug!("event=window_open module=window status=ok note_id={id} outcome=focus_existing");
            return Ok(OpenOutcome::FocusedExisting);
        }

        let size = Size {
            width: options.width.unwrap_or(DEFAULT_NOTE_SIZE.width),
            height: options.height.unwrap_or(DEFAULT_NOTE_SIZE.height),
        };
        let default_position = centered_position(self.backend.work_area(), size);
        let position = Position {
            x: options.x.unwrap_or(default_position.x),
            y: options.y.unwrap_or(default_position.y),
        };
        let z_index = options.z_index.unwrap_or(0);

        let spec = WindowSpec::floating_note(id, position, size, z_index);
        let window = match self.backend.create_window(&spec) {
            Ok(window) => window,
            Err(err) => {
                error!("event=window_open module=window status=error note_id={id} error={err}");
                return Err(err);
            }
        };

        self.registry.insert(id, window);
        info!(
            "event=window_open module=window status=ok note_id={id} x={} y={} width={} height={}",
            position.x, position.y, size.width, size.height
        );
        self.persist(
            "window_open_persist",
            NoteUpdate::new(id)
                .position(position)
                .size(size.width, size.height)
                .z_index(z_index)
                .floating(true),
        );

        Ok(OpenOutcome::Created)
    }

    /// Requests close of the note's window; no-op when none is open.
    ///
    /// Registry removal and the `is_floating=false` write happen when the
    /// closed notification arrives via
    /// [`note_window_closed`](Self::note_window_closed).
    pub fn close_floating_note(&mut self, id: NoteId) {
        if let Some(window) = self.registry.get_mut(id) {
            window.close();
        }
    }

    /// Closes every registered window, then clears the registry
    /// unconditionally.
    ///
    /// The registry must not retain stale entries past this call even if
    /// individual closes do not synchronously complete; and because the
    /// entries are drained here, late closed notifications no longer demote
    /// the notes to non-floating, which keeps them restorable after a
    /// shutdown-time teardown.
    pub fn close_all_floating_notes(&mut self) {
        let count = self.registry.len();
        for (_, window) in self.registry.iter_mut() {
            window.close();
        }
        self.registry.clear();
        self.drags.clear();
        info!("event=window_close_all module=window status=ok count={count}");
    }

    /// Recreates windows for every note persisted as floating.
    ///
    /// A failure restoring one note is logged and does not abort the rest.
    /// Returns the number of windows restored.
    ///
    /// # Errors
    /// - Store errors from the initial read; per-note open failures are
    ///   swallowed.
    pub fn restore_floating_notes(&mut self) -> StoreResult<usize> {
        let notes = self.store.all_notes()?;
        let mut restored = 0usize;

        for note in notes.into_iter().filter(|note| note.is_floating) {
            let id = note.id;
            match self.open_floating_note(OpenNoteOptions::from_record(&note)) {
                Ok(_) => restored += 1,
                Err(err) => {
                    warn!("event=window_restore module=window status=error note_id={id} error={err}");
                }
            }
        }

        info!("event=window_restore module=window status=ok restored={restored}");
        Ok(restored)
    }

    /// Directly applies a content size requested by the UI layer.
    ///
    /// Persistence happens on the resize-settle notification, not here.
    pub fn resize_note(&mut self, id: NoteId, width: u32, height: u32) {
        if let Some(window) = self.registry.get_mut(id) {
            window.set_content_size(Size { width, height });
        }
    }

    /// Begins a drag gesture; benign no-op for a note with no open window.
    pub fn drag_start(&mut self, id: NoteId) {
        let Some(window) = self.registry.get_mut(id) else {
            debug!("event=drag_start module=window status=ok note_id={id} outcome=stale");
            return;
        };
        self.drags.drag_start(window.as_mut());
    }

    /// Applies one drag move; silently ignored without an active drag.
    pub fn drag_move(&mut self, id: NoteId, offset_x: f64, offset_y: f64) {
        let Some(window) = self.registry.get_mut(id) else {
            return;
        };
        self.drags.drag_move(window.as_mut(), offset_x, offset_y);
    }

    /// Ends a drag gesture and persists the settled position (best-effort),
    /// so a note that is only ever moved keeps its place across restarts.
    pub fn drag_end(&mut self, id: NoteId) {
        let Some(window) = self.registry.get_mut(id) else {
            return;
        };
        if let Some(position) = self.drags.drag_end(window.as_mut()) {
            self.persist(
                "drag_end_persist",
                NoteUpdate::new(id).position(position),
            );
        }
    }

    /// Pops up the context menu for the requesting window.
    pub fn show_context_menu(&mut self, request: &ContextMenuRequest) {
        let Some(window) = self.registry.get_mut(request.id) else {
            return;
        };
        let menu = build_context_menu(request);
        window.popup_menu(&menu);
    }

    /// Forwards an activated menu entry back to the originating window.
    pub fn menu_action_selected(&mut self, id: NoteId, action: &MenuAction) {
        if let Some(window) = self.registry.get_mut(id) {
            window.emit_menu_action(action);
        }
    }

    /// Content-ready notification: make the deferred window visible.
    pub fn note_window_ready(&mut self, id: NoteId) {
        if let Some(window) = self.registry.get_mut(id) {
            window.show();
        }
    }

    /// Resize-settle notification: read the current size off the handle and
    /// persist it (best-effort). Fires once per completed gesture, not on
    /// every intermediate frame.
    pub fn note_window_resized(&mut self, id: NoteId) {
        let Some(window) = self.registry.get(id) else {
            return;
        };
        let size = window.content_size();
        self.persist(
            "window_resize_persist",
            NoteUpdate::new(id).size(size.width, size.height),
        );
    }

    /// Closed notification, from either an explicit close or an OS-level
    /// close.
    ///
    /// Persists `is_floating=false` only when an entry was actually removed:
    /// after a bulk teardown the registry is already drained, and those
    /// notes must stay floating in the store to be restored next startup.
    pub fn note_window_closed(&mut self, id: NoteId) {
        self.drags.discard(id);
        if self.registry.remove(id).is_some() {
            info!("event=window_close module=window status=ok note_id={id}");
            self.persist("window_close_persist", NoteUpdate::new(id).floating(false));
        }
    }

    /// Fire-and-forget store write: failures are routed to the log sink and
    /// never reach the caller that triggered them.
    fn persist(&self, event: &'static str, update: NoteUpdate) {
        match self.store.update_note(&update) {
            Ok(()) => {
                debug!("event={event} module=window status=ok note_id={}", update.id);
            }
            Err(err) => {
                warn!(
                    "event={event} module=window status=error note_id={} error={err}",
                    update.id
                );
            }
        }
    }
}
