//! Data models for note generation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata describing the video a note document is generated for.
///
/// Supplied once per pipeline invocation by an external extractor and never
/// mutated by the pipeline. Field names on the wire match the extractor's
/// message shape (`title`, `description`, `duration`, `transcript`, `url`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title (may be empty; the prompt builder substitutes a fallback)
    pub title: String,

    /// Video description, if the extractor found one
    #[serde(default)]
    pub description: Option<String>,

    /// Duration in seconds, if the extractor could read it
    #[serde(default, rename = "duration")]
    pub duration_secs: Option<f64>,

    /// Caption-derived transcript text. Unused by the current prompt,
    /// reserved for future enrichment.
    #[serde(default)]
    pub transcript: Option<String>,

    /// Page URL. Opaque to the pipeline; used as the storage key.
    pub url: String,
}

/// A single timestamp offset (seconds) at which one note record is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampAnchor {
    /// Offset from the start of the video, in whole seconds
    pub offset_secs: u32,
}

/// The structured study-note unit for one timestamp anchor.
///
/// Field names mirror the JSON schema the prompt instructs the model to
/// produce. Array fields absent from the reply deserialize to empty; any
/// type mismatch rejects the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Offset in seconds; must equal one of the requested anchors
    pub timestamp: u32,

    /// Central theme of the segment
    pub main_topic: String,

    /// 2-3 secondary concepts elaborating on the main topic
    #[serde(default)]
    pub subtopics: Vec<String>,

    /// 3-5 critical ideas or arguments from the segment
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Real-world examples or applications
    #[serde(default)]
    pub examples: Vec<String>,

    /// Key term -> definition
    #[serde(default)]
    pub definitions: BTreeMap<String, String>,

    /// Elaborations, analogies, deeper dives
    #[serde(default)]
    pub detailed_explanations: Vec<String>,

    /// 5-6 practice questions for the segment
    #[serde(default)]
    pub quiz_questions: Vec<String>,

    /// Optional further reading
    #[serde(default)]
    pub additional_resources: Vec<String>,
}

/// Successful pipeline output: the validated records plus the identifying
/// metadata the storage collaborator keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedNotes {
    /// Title of the originating video
    pub title: String,

    /// URL of the originating video (storage key)
    pub url: String,

    /// One record per requested anchor, in anchor order
    pub notes: Vec<NoteRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_accepts_wire_shape() {
        let json = r#"{
            "title": "Intro to X",
            "description": "A lecture",
            "duration": 540.2,
            "transcript": null,
            "url": "https://example.com/watch?v=abc"
        }"#;

        let meta: VideoMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.title, "Intro to X");
        assert_eq!(meta.duration_secs, Some(540.2));
        assert!(meta.transcript.is_none());
    }

    #[test]
    fn metadata_tolerates_missing_optional_fields() {
        let meta: VideoMetadata =
            serde_json::from_str(r#"{"title": "T", "url": "u"}"#).unwrap();
        assert!(meta.description.is_none());
        assert!(meta.duration_secs.is_none());
    }

    #[test]
    fn note_record_defaults_absent_arrays_to_empty() {
        let json = r#"{"timestamp": 75, "mainTopic": "A"}"#;
        let record: NoteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp, 75);
        assert_eq!(record.main_topic, "A");
        assert!(record.subtopics.is_empty());
        assert!(record.additional_resources.is_empty());
        assert!(record.definitions.is_empty());
    }

    #[test]
    fn note_record_uses_camel_case_on_the_wire() {
        let record = NoteRecord {
            timestamp: 75,
            main_topic: "A".to_string(),
            subtopics: vec!["s".to_string()],
            key_points: vec![],
            examples: vec![],
            definitions: BTreeMap::new(),
            detailed_explanations: vec![],
            quiz_questions: vec!["q".to_string()],
            additional_resources: vec![],
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"mainTopic\""));
        assert!(json.contains("\"quizQuestions\""));
        assert!(!json.contains("main_topic"));
    }
}
