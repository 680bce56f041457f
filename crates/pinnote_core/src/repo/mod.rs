//! Persistence contracts for the pinnote core.
//!
//! # Responsibility
//! - Define the Note Store seam consumed by the window subsystem.
//! - Keep SQL details inside the core persistence boundary.

pub mod note_store;
