//! In-process message contract for note generation
//!
//! Mirrors the wire shape the pipeline is invoked with: an action-tagged
//! request carrying the video metadata, answered by a `{success, notes?,
//! error?, rawResponse?}` envelope. Successful generations are persisted
//! to the store before the response is built.

use serde::{Deserialize, Serialize};

use crate::notes::{NoteRecord, VideoMetadata};
use crate::pipeline::{NotesPipeline, PipelineError};
use crate::storage::NotesStore;

/// Request sent to the note-generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum NotesRequest {
    /// Generate a note document for one video
    #[serde(rename = "generateNotes", rename_all = "camelCase")]
    GenerateNotes { video_info: VideoMetadata },
}

/// Response envelope for a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesResponse {
    /// Whether the invocation produced a validated note sequence
    pub success: bool,

    /// The validated records, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NoteRecord>>,

    /// Human-readable failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Raw diagnostic payload (service body or unparsed completion),
    /// surfaced on demand by the debug view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl NotesResponse {
    fn ok(notes: Vec<NoteRecord>) -> Self {
        Self {
            success: true,
            notes: Some(notes),
            error: None,
            raw_response: None,
        }
    }

    fn failed(err: &PipelineError) -> Self {
        Self {
            success: false,
            notes: None,
            error: Some(err.to_string()),
            raw_response: err.raw_diagnostic().map(str::to_string),
        }
    }
}

/// Handle one generation request end to end.
///
/// Storage failures after a successful generation are logged but do not
/// turn the response into a failure; the caller still gets its notes.
pub async fn handle_request(
    pipeline: &NotesPipeline,
    store: &NotesStore,
    request: NotesRequest,
) -> NotesResponse {
    let NotesRequest::GenerateNotes { video_info } = request;

    match pipeline.run(&video_info).await {
        Ok(generated) => {
            if let Err(err) = store.save(&generated) {
                tracing::warn!(url = %generated.url, error = %err, "failed to persist notes");
            }
            NotesResponse::ok(generated.notes)
        }
        Err(err) => {
            tracing::warn!(error = %err, "note generation failed");
            NotesResponse::failed(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_from_wire_shape() {
        let json = r#"{
            "action": "generateNotes",
            "videoInfo": {
                "title": "Intro to X",
                "duration": 540,
                "url": "https://example.com/watch?v=abc"
            }
        }"#;

        let NotesRequest::GenerateNotes { video_info } = serde_json::from_str(json).unwrap();
        assert_eq!(video_info.title, "Intro to X");
        assert_eq!(video_info.duration_secs, Some(540.0));
    }

    #[test]
    fn parse_failure_response_carries_raw_text() {
        let err = PipelineError::Parse {
            raw: "nope".to_string(),
        };
        let response = NotesResponse::failed(&err);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["rawResponse"], "nope");
        assert!(json.get("notes").is_none());
        assert!(json["error"].is_string());
    }

    #[test]
    fn success_response_carries_notes_only() {
        let response = NotesResponse::ok(vec![]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
        assert!(json.get("rawResponse").is_none());
    }
}
