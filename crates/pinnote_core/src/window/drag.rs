//! Drag gesture coordinator for floating note windows.
//!
//! # Responsibility
//! - Track the per-window transient state of an in-progress move gesture.
//! - Translate relative pointer offsets from the UI layer into absolute
//!   window placement.
//!
//! # Invariants
//! - At most one `DragState` per note id; a new drag-start overwrites any
//!   stale prior state (implicit cancel-and-restart).
//! - A `DragState` never outlives the owning window's registry entry; the
//!   manager discards it on window close.
//! - Moves are always computed relative to the gesture-start position, never
//!   cumulatively from the previous move.

use std::collections::HashMap;

use super::backend::NoteWindow;
use crate::model::note::{NoteId, Position, Size};

/// Transient per-window record captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// Window position when the gesture began.
    start: Position,
    /// Content-area size captured at gesture start.
    content_size: Size,
}

impl DragState {
    /// Absolute placement for the given offsets from the gesture start.
    fn target(&self, offset_x: f64, offset_y: f64) -> Position {
        Position {
            x: (f64::from(self.start.x) + offset_x).round() as i32,
            y: (f64::from(self.start.y) + offset_y).round() as i32,
        }
    }
}

/// Per-identifier `idle -> dragging -> idle` state machine.
///
/// Tolerates out-of-order events: a drag-move or drag-end without a
/// preceding drag-start is a benign no-op. No timeouts anywhere; a
/// permanently absent drag-end only leaks one transient record.
#[derive(Default)]
pub struct DragCoordinator {
    states: HashMap<NoteId, DragState>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a drag: captures current geometry and disables live resizing
    /// so the window manager's own resize handling cannot fight the
    /// programmatic repositioning while the move is in progress.
    pub fn drag_start(&mut self, window: &mut dyn NoteWindow) {
        let state = DragState {
            start: window.outer_position(),
            content_size: window.content_size(),
        };
        window.set_resizable(false);
        self.states.insert(window.id(), state);
    }

    /// Applies one move event.
    ///
    /// Re-asserts the captured content size on the same call: repositioning
    /// a frameless/transparent window can perturb the OS-reported content
    /// box, so pinning the size every move keeps the note body stable.
    pub fn drag_move(&mut self, window: &mut dyn NoteWindow, offset_x: f64, offset_y: f64) {
        let Some(state) = self.states.get(&window.id()) else {
            // Event arrived after a cancelled/ended drag.
            return;
        };
        window.set_outer_position(state.target(offset_x, offset_y));
        window.set_content_size(state.content_size);
    }

    /// Ends a drag and returns the settled window position, if a drag was
    /// actually in progress.
    ///
    /// Resizing is re-enabled unconditionally, even without an active
    /// `DragState`, as recovery against a stuck disabled state.
    pub fn drag_end(&mut self, window: &mut dyn NoteWindow) -> Option<Position> {
        let state = self.states.remove(&window.id());
        if let Some(state) = state {
            window.set_content_size(state.content_size);
        }
        window.set_resizable(true);
        state.map(|_| window.outer_position())
    }

    /// Drops any transient state for a window that is going away.
    pub fn discard(&mut self, id: NoteId) {
        self.states.remove(&id);
    }

    /// Drops all transient state; used by bulk teardown.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::DragState;
    use crate::model::note::{Position, Size};

    fn state_at(x: i32, y: i32) -> DragState {
        DragState {
            start: Position { x, y },
            content_size: Size {
                width: 280,
                height: 320,
            },
        }
    }

    #[test]
    fn target_is_relative_to_gesture_start() {
        let state = state_at(100, 100);
        assert_eq!(state.target(15.0, -4.0), Position { x: 115, y: 96 });
        // A later move is still computed from the start, not the last move.
        assert_eq!(state.target(20.0, 0.0), Position { x: 120, y: 100 });
    }

    #[test]
    fn target_rounds_fractional_offsets() {
        let state = state_at(0, 0);
        assert_eq!(state.target(10.5, -10.5), Position { x: 11, y: -11 });
        assert_eq!(state.target(0.49, 0.51), Position { x: 0, y: 1 });
    }
}
