//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pinnote_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pinnote_core::{NoteRecord, NoteStore, SqliteNoteStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("pinnote_core version={}", pinnote_core::core_version());

    // In-memory store round trip as a wiring probe.
    let conn = pinnote_core::db::open_db_in_memory()?;
    let store = SqliteNoteStore::try_new(&conn)?;
    store.create_note(&NoteRecord::new("smoke"))?;
    println!("pinnote_core notes={}", store.all_notes()?.len());

    Ok(())
}
