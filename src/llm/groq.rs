use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{CompletionProvider, GenerationError};

const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-70b-versatile";

/// Sampling temperature for note generation.
const TEMPERATURE: f64 = 0.7;

/// Output-token ceiling, sized for long structured responses.
const MAX_TOKENS: u32 = 8000;

/// Request deadline. Large completions are slow, but a hung request should
/// not pin an invocation forever.
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct GroqClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GroqClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!(
                "Groq API key is missing. Set llm.api_key in config or CRAMNOTES_GROQ_API_KEY."
            );
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_GROQ_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GROQ_ENDPOINT.to_string()
        } else {
            settings.llm.endpoint.trim().trim_end_matches('/').to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .context("Failed to build Groq HTTP client")?,
            api_key,
            model,
            endpoint,
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %self.model, "sending completion request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| GenerationError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "completion service rejected request");
            return Err(GenerationError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|source| GenerationError::Transport { source })?;

        let completion = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(completion)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn client_with_endpoint(endpoint: &str) -> GroqClient {
        let mut settings = Settings::default();
        settings.llm.api_key = "test-key".to_string();
        settings.llm.endpoint = endpoint.to_string();
        GroqClient::from_settings(&settings).unwrap()
    }

    #[test]
    fn request_body_matches_service_contract() {
        let body = ChatCompletionRequest {
            model: DEFAULT_GROQ_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama-3.1-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 8000);
    }

    #[test]
    fn completion_is_read_from_first_choice() {
        let payload: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"the notes"}}]}"#,
        )
        .unwrap();
        assert_eq!(payload.choices[0].message.content, "the notes");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_endpoint() {
        let client = client_with_endpoint("http://localhost:1234/v1/chat/completions/");
        assert_eq!(client.endpoint, "http://localhost:1234/v1/chat/completions");
    }

    #[tokio::test]
    async fn connection_refused_classifies_as_transport() {
        // port 9 (discard) is not listening in the test environment
        let client = client_with_endpoint("http://127.0.0.1:9/v1/chat/completions");

        match client.complete("prompt").await {
            Err(GenerationError::Transport { source }) => {
                assert!(source.is_connect() || source.is_timeout() || source.is_request());
            }
            other => panic!("expected transport error, got {:?}", other.map(|_| ())),
        }
    }
}
