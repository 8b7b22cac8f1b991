//! LLM adapter: provider trait, Groq chat-completion client, prompt assembly

mod client;
mod groq;
mod prompts;

pub use client::{build_provider, CompletionProvider, GenerationError};
pub use groq::GroqClient;
pub use prompts::build_notes_prompt;
