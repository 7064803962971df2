//! Chat-completion providers.
//!
//! The agent only needs one capability from a provider: given a prompt
//! string, return a response string or fail. [`ChatProvider`] is that seam;
//! concrete clients talk to Ollama or OpenAI over HTTP, and tests script
//! the trait directly.

pub mod ollama;
pub mod openai;
pub mod registry;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use registry::ProviderRegistry;

use crate::error::Result;
use async_trait::async_trait;

/// Tuning hints for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// One chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Registry key for this provider (e.g. "ollama").
    fn name(&self) -> &str;

    /// Model identifier reported in telemetry.
    fn model(&self) -> &str;

    /// One prompt/response round trip. Errors map to
    /// [`Error::Provider`](crate::error::Error::Provider).
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;
}
