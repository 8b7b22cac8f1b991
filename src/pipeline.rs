//! Note-generation pipeline orchestration
//!
//! A straight-line transform with a single external I/O boundary:
//! metadata -> anchors -> prompt -> raw completion -> validated records.
//! One attempt per invocation, no shared state across invocations.

use anyhow::Result;
use thiserror::Error;

use crate::config::Settings;
use crate::llm::{build_notes_prompt, build_provider, CompletionProvider, GenerationError};
use crate::notes::{parse_notes, plan_anchors, GeneratedNotes, ParseFailure, VideoMetadata};

/// Terminal failure of one pipeline invocation.
///
/// Every variant keeps the raw diagnostic material (HTTP body, completion
/// text) so the caller can surface a debug view.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No response from the completion service
    #[error("no response from the completion service: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success status from the completion service
    #[error("completion service returned status {status}")]
    Service { status: u16, body: String },

    /// Reply received but not reducible to valid notes by either parsing tier
    #[error("could not parse notes from the model reply")]
    Parse { raw: String },
}

impl PipelineError {
    /// Raw diagnostic payload for a human-facing debug view, when one exists.
    pub fn raw_diagnostic(&self) -> Option<&str> {
        match self {
            Self::Transport(_) => None,
            Self::Service { body, .. } => Some(body),
            Self::Parse { raw } => Some(raw),
        }
    }
}

impl From<GenerationError> for PipelineError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Transport { source } => Self::Transport(source),
            GenerationError::Service { status, body } => Self::Service { status, body },
        }
    }
}

impl From<ParseFailure> for PipelineError {
    fn from(err: ParseFailure) -> Self {
        Self::Parse { raw: err.raw }
    }
}

/// End-to-end note-generation pipeline.
pub struct NotesPipeline {
    provider: Box<dyn CompletionProvider>,
}

impl NotesPipeline {
    /// Build the pipeline from runtime settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            provider: build_provider(settings)?,
        })
    }

    /// Build the pipeline around an explicit provider (useful for testing).
    pub fn with_provider(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Run one invocation: metadata in, validated note document out.
    pub async fn run(&self, metadata: &VideoMetadata) -> Result<GeneratedNotes, PipelineError> {
        let anchors = plan_anchors(metadata.duration_secs);
        tracing::info!(
            url = %metadata.url,
            anchors = anchors.len(),
            "generating study notes"
        );

        let prompt = build_notes_prompt(metadata, &anchors);
        let reply = self.provider.complete(&prompt).await?;

        tracing::debug!(reply_len = reply.len(), "received completion");

        let notes = parse_notes(&reply, &anchors)?;
        tracing::info!(records = notes.len(), "notes validated");

        Ok(GeneratedNotes {
            title: metadata.title.clone(),
            url: metadata.url.clone(),
            notes,
        })
    }
}
