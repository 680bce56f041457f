//! Domain model for notes and their floating-window geometry.
//!
//! # Responsibility
//! - Define the canonical note record shared by board and floating views.
//! - Keep geometry types small and copyable for the window subsystem.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - `is_floating` is the single source of truth for restore-on-startup.

pub mod note;
