//! SQLite-backed keyed store for generated note documents
//!
//! One row per video URL, last write wins. The record sequence is stored as
//! JSON; it is opaque to SQL and only ever read back whole.

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::config::Settings;
use crate::notes::GeneratedNotes;
use crate::storage::models::SavedNotes;

/// Notes database wrapper
pub struct NotesStore {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

impl NotesStore {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(&format!("PRAGMA user_version = {}", version), [])?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS saved_notes (
                url TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                notes_json TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_saved_notes_updated_at
                ON saved_notes(updated_at DESC);
            "#,
        )?;

        Ok(())
    }

    /// Save a generated note document, replacing any previous one for the
    /// same URL.
    pub fn save(&self, generated: &GeneratedNotes) -> Result<SavedNotes> {
        let saved = SavedNotes {
            url: generated.url.clone(),
            title: generated.title.clone(),
            notes: generated.notes.clone(),
            updated_at: Utc::now(),
        };

        let notes_json = serde_json::to_string(&saved.notes)?;

        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO saved_notes (url, title, notes_json, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                saved.url,
                saved.title,
                notes_json,
                saved.updated_at.timestamp()
            ],
        )?;

        tracing::debug!(url = %saved.url, records = saved.notes.len(), "notes saved");

        Ok(saved)
    }

    /// Fetch the stored note document for a URL
    pub fn get(&self, url: &str) -> Result<Option<SavedNotes>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT url, title, notes_json, updated_at
                FROM saved_notes WHERE url = ?1
                "#,
                params![url],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(url, title, notes_json, updated_at)| {
            Ok(SavedNotes {
                url,
                title,
                notes: serde_json::from_str(&notes_json)
                    .context("Stored notes JSON is corrupt")?,
                updated_at: Utc
                    .timestamp_opt(updated_at, 0)
                    .single()
                    .context("Stored timestamp out of range")?,
            })
        })
        .transpose()
    }

    /// List the most recently updated documents
    pub fn list_recent(&self, limit: usize) -> Result<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT url, title FROM saved_notes
            ORDER BY updated_at DESC LIMIT ?1
            "#,
        )?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Delete the stored document for a URL
    pub fn delete(&self, url: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM saved_notes WHERE url = ?1", params![url])?;
        Ok(changed > 0)
    }
}
