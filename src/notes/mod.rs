//! Note-generation domain: models, segment planning, reply parsing, export

pub mod export;
mod models;
mod parser;
pub mod planner;

pub use models::{GeneratedNotes, NoteRecord, TimestampAnchor, VideoMetadata};
pub use parser::{parse_notes, ParseFailure};
pub use planner::plan_anchors;
