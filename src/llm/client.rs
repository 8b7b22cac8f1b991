use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::Settings;
use crate::llm::groq::GroqClient;

/// Failure of one completion attempt, classified by where it broke.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No response received (DNS, connection, timeout)
    #[error("completion request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status; its body is kept
    /// for the diagnostics path
    #[error("completion service returned status {status}")]
    Service { status: u16, body: String },
}

/// One-shot adapter to an external chat-completion service.
///
/// Implementations deliver the completion text verbatim or a classified
/// failure; interpreting the text is the parser's job. No retries: a
/// single attempt per invocation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Build a completion provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn CompletionProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "groq" => Ok(Box::new(GroqClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: groq",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn unsupported_provider_returns_error() {
        let mut settings = Settings::default();
        settings.llm.provider = "unknown".to_string();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn groq_provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_provider(&settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Groq API key is missing"));
    }
}
