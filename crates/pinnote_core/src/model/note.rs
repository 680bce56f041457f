//! Note record and window geometry types.
//!
//! # Responsibility
//! - Define the persisted note shape consumed by the window subsystem.
//! - Validate geometry before it reaches storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `width`/`height` are non-zero whenever present.
//! - `is_floating == false` is the terminal state recorded when a floating
//!   window is closed; only floating notes are recreated on startup.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures; the
/// wire form is the UUID string and equals the durable store id.
pub type NoteId = Uuid;

/// Absolute on-screen position of a window's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Content-area size of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// Canonical persisted note record.
///
/// Content rendering lives entirely in the UI layer; the core only carries
/// the fields the floating window manager needs to recreate and persist the
/// window set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Stable global ID, equal to the window identifier when floating.
    pub id: NoteId,
    /// Display title shown in the board view and window header.
    pub title: String,
    /// Last known window position; absent until the note first floats.
    pub position: Option<Position>,
    /// Last known content width in pixels.
    pub width: Option<u32>,
    /// Last known content height in pixels.
    pub height: Option<u32>,
    /// Stacking hint used when the window set is recreated.
    pub z_index: i64,
    /// Whether a floating window should exist for this note.
    pub is_floating: bool,
}

impl NoteRecord {
    /// Creates a non-floating note with a generated stable ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            position: None,
            width: None,
            height: None,
            z_index: 0,
            is_floating: false,
        }
    }

    /// Validates geometry fields before persistence.
    ///
    /// # Errors
    /// - `ZeroDimension` when a present width/height is zero.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_dimensions(self.width, self.height)
    }
}

/// Geometry validation failure; blocks store writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// A present `width` or `height` was zero.
    ZeroDimension { field: &'static str },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension { field } => {
                write!(f, "note geometry field `{field}` must be non-zero")
            }
        }
    }
}

impl Error for NoteValidationError {}

pub(crate) fn validate_dimensions(
    width: Option<u32>,
    height: Option<u32>,
) -> Result<(), NoteValidationError> {
    if width == Some(0) {
        return Err(NoteValidationError::ZeroDimension { field: "width" });
    }
    if height == Some(0) {
        return Err(NoteValidationError::ZeroDimension { field: "height" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NoteRecord, NoteValidationError};

    #[test]
    fn new_note_starts_non_floating_without_geometry() {
        let note = NoteRecord::new("groceries");
        assert!(!note.is_floating);
        assert!(note.position.is_none());
        assert!(note.width.is_none());
        assert_eq!(note.z_index, 0);
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let mut note = NoteRecord::new("bad");
        note.width = Some(0);
        assert_eq!(
            note.validate(),
            Err(NoteValidationError::ZeroDimension { field: "width" })
        );

        note.width = Some(280);
        note.height = Some(0);
        assert_eq!(
            note.validate(),
            Err(NoteValidationError::ZeroDimension { field: "height" })
        );

        note.height = Some(320);
        assert!(note.validate().is_ok());
    }
}
