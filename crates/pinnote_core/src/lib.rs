//! Core logic for Pinnote's floating note windows.
//! This crate is the single source of truth for window lifecycle invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod window;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{NoteId, NoteRecord, NoteValidationError, Position, Size};
pub use repo::note_store::{NoteStore, NoteUpdate, SqliteNoteStore, StoreError, StoreResult};
pub use window::backend::{NoteWindow, WindowSpec, WindowSystem, DEFAULT_NOTE_SIZE};
pub use window::commands::NoteWindowRequest;
pub use window::manager::{FloatingNoteManager, OpenNoteOptions, OpenOutcome};
pub use window::menu::{
    build_context_menu, ContextMenu, ContextMenuRequest, MenuAction, MenuItem, NoteViewMode,
};
pub use window::WindowError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
