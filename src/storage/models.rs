//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notes::NoteRecord;

/// A stored note document, keyed by video URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedNotes {
    /// Video URL (primary key)
    pub url: String,

    /// Title of the originating video
    pub title: String,

    /// The validated note records, in anchor order
    pub notes: Vec<NoteRecord>,

    /// When this document was last written
    pub updated_at: DateTime<Utc>,
}
