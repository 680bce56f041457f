//! Window system seam between the controller and the privileged process.
//!
//! # Responsibility
//! - Describe the fixed chrome of a floating note window (`WindowSpec`).
//! - Define the narrow traits the lifecycle controller drives: one for
//!   window construction, one per live window handle.
//!
//! # Invariants
//! - Handles are owned exclusively by the window registry; collaborators
//!   look them up by note id each time and never cache them.
//! - Window-system events (content ready, resize settle, closed) flow back
//!   into the manager as notifications; nothing here blocks the event loop.

use serde::{Deserialize, Serialize};

use super::menu::{ContextMenu, MenuAction};
use super::WindowError;
use crate::model::note::{NoteId, Position, Size};

/// Default content size for a floating note window.
pub const DEFAULT_NOTE_SIZE: Size = Size {
    width: 280,
    height: 320,
};

/// Construction-time description of one floating note window.
///
/// The chrome flags are fixed for every floating note: frameless,
/// transparent background, always on top, excluded from the task switcher,
/// no minimize/maximize controls, resizable via drag handles, and hidden
/// until the content signals ready (avoids a visible blank flash).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSpec {
    pub id: NoteId,
    /// Note UI entry point, parameterized by the note id.
    pub url: String,
    pub position: Position,
    pub size: Size,
    pub z_index: i64,
    pub frameless: bool,
    pub transparent: bool,
    pub always_on_top: bool,
    pub skip_taskbar: bool,
    pub minimizable: bool,
    pub maximizable: bool,
    pub resizable: bool,
    pub visible: bool,
}

impl WindowSpec {
    /// Builds the fixed-chrome spec for a floating note.
    pub fn floating_note(id: NoteId, position: Position, size: Size, z_index: i64) -> Self {
        Self {
            id,
            url: format!("pinnote://note/{id}"),
            position,
            size,
            z_index,
            frameless: true,
            transparent: true,
            always_on_top: true,
            skip_taskbar: true,
            minimizable: false,
            maximizable: false,
            resizable: true,
            visible: false,
        }
    }
}

/// One live floating note window.
///
/// Geometry setters are infallible from the controller's point of view; the
/// backend owns any OS-level error reporting.
pub trait NoteWindow {
    fn id(&self) -> NoteId;

    /// Current top-left position of the window frame.
    fn outer_position(&self) -> Position;
    /// Current content-area size.
    fn content_size(&self) -> Size;

    fn set_outer_position(&mut self, position: Position);
    fn set_content_size(&mut self, size: Size);
    /// Enables or disables interactive resizing by the window manager.
    fn set_resizable(&mut self, resizable: bool);

    fn is_minimized(&self) -> bool;
    /// Restores a minimized window.
    fn restore(&mut self);
    fn show(&mut self);
    /// Raises the window and gives it input focus.
    fn focus(&mut self);
    /// Requests window close; the closed notification arrives asynchronously
    /// via [`FloatingNoteManager::note_window_closed`].
    ///
    /// [`FloatingNoteManager::note_window_closed`]: super::manager::FloatingNoteManager::note_window_closed
    fn close(&mut self);

    /// Pops up a context menu anchored to this window.
    fn popup_menu(&mut self, menu: &ContextMenu);
    /// Sends a `menu-action` command to the UI layer of this window.
    fn emit_menu_action(&mut self, action: &MenuAction);
}

/// Privileged-process window system: constructs windows and reports the
/// display geometry used for default placement.
pub trait WindowSystem {
    /// Usable work area of the primary display.
    fn work_area(&self) -> Size;

    /// Constructs a window from the given spec.
    ///
    /// # Errors
    /// - [`WindowError::Creation`] when window or UI construction fails;
    ///   the caller surfaces this on the `create` request and registers
    ///   nothing.
    fn create_window(&mut self, spec: &WindowSpec) -> Result<Box<dyn NoteWindow>, WindowError>;
}

/// Centers a window of `size` on the given work area.
pub fn centered_position(work_area: Size, size: Size) -> Position {
    Position {
        x: (work_area.width / 2) as i32 - (size.width / 2) as i32,
        y: (work_area.height / 2) as i32 - (size.height / 2) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::{centered_position, WindowSpec, DEFAULT_NOTE_SIZE};
    use crate::model::note::{Position, Size};
    use uuid::Uuid;

    #[test]
    fn centered_position_halves_work_area_minus_window() {
        let work = Size {
            width: 1920,
            height: 1080,
        };
        let pos = centered_position(work, DEFAULT_NOTE_SIZE);
        assert_eq!(pos, Position { x: 820, y: 380 });
    }

    #[test]
    fn centered_position_on_tiny_work_area_goes_negative() {
        let work = Size {
            width: 200,
            height: 200,
        };
        let pos = centered_position(work, DEFAULT_NOTE_SIZE);
        assert_eq!(pos, Position { x: -40, y: -60 });
    }

    #[test]
    fn floating_note_spec_has_fixed_chrome() {
        let id = Uuid::new_v4();
        let spec = WindowSpec::floating_note(
            id,
            Position { x: 10, y: 20 },
            DEFAULT_NOTE_SIZE,
            3,
        );
        assert!(spec.frameless);
        assert!(spec.transparent);
        assert!(spec.always_on_top);
        assert!(spec.skip_taskbar);
        assert!(!spec.minimizable);
        assert!(!spec.maximizable);
        assert!(spec.resizable);
        assert!(!spec.visible);
        assert_eq!(spec.url, format!("pinnote://note/{id}"));
    }
}
