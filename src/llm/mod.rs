//! Outbound completion calls to the language-model provider.

mod chat_completions;

pub use chat_completions::ChatCompletionsClient;

use async_trait::async_trait;

/// Prompt in, completion text out. Implementations make exactly one attempt.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("completion blocked by the provider's content filter")]
    ContentFiltered,
    #[error("provider returned no completion text")]
    Empty,
}
