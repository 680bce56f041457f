//! Floating note window subsystem.
//!
//! # Responsibility
//! - Create, track, reposition, resize, and tear down floating note windows.
//! - Keep window geometry synchronized with the durable note store.
//! - Recreate the persisted window set on startup.
//!
//! # Invariants
//! - At most one live window per note id (dedup open contract).
//! - Registry entries exist iff a window for that note is currently open.
//! - Store writes triggered by window events are fire-and-forget: failures
//!   are logged, never propagated, and never block the window set.
//!
//! All operations run on the single event-processing context of the
//! privileged process; no internal locking.

pub mod backend;
pub mod commands;
pub mod drag;
pub mod manager;
pub mod menu;
pub mod registry;

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::note::NoteId;

/// Window subsystem failure surfaced to the `create` request.
///
/// Everything else in this subsystem degrades to a logged diagnostic; only
/// window construction reports an error to its caller.
#[derive(Debug)]
pub enum WindowError {
    /// Window or UI construction failed in the backend.
    Creation { id: NoteId, reason: String },
}

impl Display for WindowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creation { id, reason } => {
                write!(f, "failed to create floating window for note {id}: {reason}")
            }
        }
    }
}

impl Error for WindowError {}
