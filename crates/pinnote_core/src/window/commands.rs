//! Wire command surface for the floating note window subsystem.
//!
//! # Responsibility
//! - Define the tagged command set an embedding UI layer sends over its
//!   bridge, and map each command onto a controller operation.
//!
//! # Invariants
//! - Only `create` is fallible from the sender's point of view; every other
//!   command degrades to a no-op when it races a closing window.

use serde::{Deserialize, Serialize};

use super::manager::{FloatingNoteManager, OpenNoteOptions};
use super::menu::ContextMenuRequest;
use super::WindowError;
use crate::model::note::NoteId;
use crate::repo::note_store::NoteStore;
use crate::window::backend::WindowSystem;

/// One command from the UI layer, tagged by `cmd`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum NoteWindowRequest {
    Create(OpenNoteOptions),
    Close {
        id: NoteId,
    },
    DragStart {
        id: NoteId,
    },
    #[serde(rename_all = "camelCase")]
    DragMove {
        id: NoteId,
        offset_x: f64,
        offset_y: f64,
    },
    DragEnd {
        id: NoteId,
    },
    Resize {
        id: NoteId,
        width: u32,
        height: u32,
    },
    ContextMenu(ContextMenuRequest),
}

impl<S: NoteStore, B: WindowSystem> FloatingNoteManager<S, B> {
    /// Dispatches one wire command onto the matching controller operation.
    ///
    /// # Errors
    /// - [`WindowError::Creation`] from a failed `create`; all other
    ///   commands always succeed.
    pub fn handle_request(&mut self, request: NoteWindowRequest) -> Result<(), WindowError> {
        match request {
            NoteWindowRequest::Create(options) => {
                self.open_floating_note(options)?;
                Ok(())
            }
            NoteWindowRequest::Close { id } => {
                self.close_floating_note(id);
                Ok(())
            }
            NoteWindowRequest::DragStart { id } => {
                self.drag_start(id);
                Ok(())
            }
            NoteWindowRequest::DragMove {
                id,
                offset_x,
                offset_y,
            } => {
                self.drag_move(id, offset_x, offset_y);
                Ok(())
            }
            NoteWindowRequest::DragEnd { id } => {
                self.drag_end(id);
                Ok(())
            }
            NoteWindowRequest::Resize { id, width, height } => {
                self.resize_note(id, width, height);
                Ok(())
            }
            NoteWindowRequest::ContextMenu(request) => {
                self.show_context_menu(&request);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteWindowRequest;
    use uuid::Uuid;

    #[test]
    fn drag_move_wire_shape_uses_camel_case_offsets() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"cmd":"drag-move","id":"{id}","offsetX":15.0,"offsetY":-4.0}}"#
        );
        let parsed: NoteWindowRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            NoteWindowRequest::DragMove {
                id,
                offset_x: 15.0,
                offset_y: -4.0,
            }
        );
    }

    #[test]
    fn create_accepts_sparse_placement() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"cmd":"create","id":"{id}","x":40}}"#);
        let parsed: NoteWindowRequest = serde_json::from_str(&json).unwrap();
        match parsed {
            NoteWindowRequest::Create(options) => {
                assert_eq!(options.id, id);
                assert_eq!(options.x, Some(40));
                assert_eq!(options.y, None);
                assert_eq!(options.width, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
