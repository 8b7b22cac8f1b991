//! Storage module for cramnotes
//!
//! Persists generated note documents in SQLite, keyed by video URL.

mod database;
mod models;

pub use database::NotesStore;
pub use models::SavedNotes;
