use async_trait::async_trait;

use crate::error::LLMError;

/// Trait for providers that turn text into dense vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds every input string; the output keeps the input order.
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError>;
}
