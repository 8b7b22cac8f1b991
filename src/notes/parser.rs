//! Two-tier parsing of model replies into validated note records
//!
//! Tier 1 treats the whole reply as JSON. Tier 2 recovers from replies that
//! wrap the array in prose or markdown fencing by reparsing the greedy
//! bracket span (first `[` to last `]`). Validation is all-or-nothing per
//! tier: one bad record fails the tier, never a silent drop or reorder.

use serde_json::Value;
use thiserror::Error;

use crate::notes::models::{NoteRecord, TimestampAnchor};

/// Reply received but not reducible to a valid note sequence by either tier.
///
/// The raw completion text is kept verbatim for the diagnostics path.
#[derive(Debug, Clone, Error)]
#[error("could not extract valid notes from the model reply")]
pub struct ParseFailure {
    /// The unmodified reply text
    pub raw: String,
}

/// Parse a raw model reply into one record per requested anchor.
///
/// The result has exactly `anchors.len()` records whose timestamps equal the
/// anchor offsets in request order; any shortfall, surplus, or reordering is
/// a [`ParseFailure`].
pub fn parse_notes(
    raw: &str,
    anchors: &[TimestampAnchor],
) -> Result<Vec<NoteRecord>, ParseFailure> {
    for candidate in candidates(raw) {
        if let Some(notes) = try_parse_array(candidate) {
            if aligned_with_anchors(&notes, anchors) {
                return Ok(notes);
            }
            tracing::debug!(
                expected = anchors.len(),
                got = notes.len(),
                "parsed array does not line up with requested anchors"
            );
        }
    }

    Err(ParseFailure {
        raw: raw.to_string(),
    })
}

/// Ordered candidate texts: the whole reply, then the greedy bracket span.
fn candidates(raw: &str) -> impl Iterator<Item = &str> {
    let span = raw.find('[').and_then(|start| {
        let end = raw.rfind(']')?;
        (end > start).then(|| &raw[start..=end])
    });

    std::iter::once(raw).chain(span)
}

/// Parse one candidate text as a non-empty JSON array of valid records.
fn try_parse_array(text: &str) -> Option<Vec<NoteRecord>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }

    items
        .iter()
        .map(|item| {
            let record: NoteRecord = serde_json::from_value(item.clone()).ok()?;
            (!record.main_topic.trim().is_empty()).then_some(record)
        })
        .collect()
}

/// Count and timestamp order must match the anchors that built the prompt.
fn aligned_with_anchors(notes: &[NoteRecord], anchors: &[TimestampAnchor]) -> bool {
    notes.len() == anchors.len()
        && notes
            .iter()
            .zip(anchors)
            .all(|(note, anchor)| note.timestamp == anchor.offset_secs)
}
