//! cramnotes - structured, timestamped study notes for video lectures
//!
//! Takes raw video metadata (title, description, duration, URL), asks an
//! external chat-completion service for study notes at planned timestamps,
//! and validates the service's loosely-structured reply into typed note
//! records. Generated documents are persisted per URL and can be rendered
//! as flattened text or paginated pages.

pub mod config;
pub mod llm;
pub mod notes;
pub mod pipeline;
pub mod service;
pub mod storage;

pub use notes::{GeneratedNotes, NoteRecord, TimestampAnchor, VideoMetadata};
pub use pipeline::{NotesPipeline, PipelineError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "cramnotes";
