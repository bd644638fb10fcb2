use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// Trait for providers that support chat-style interactions.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError>;

    /// Sends the messages and returns the reply text, failing when the
    /// provider answered without any.
    async fn chat_text(&self, messages: &[ChatMessage]) -> Result<String, LLMError> {
        let response = self.chat(messages).await?;
        if let Some(usage) = response.usage() {
            log::debug!(
                "chat usage: prompt={} completion={} total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        response
            .text()
            .ok_or_else(|| LLMError::Generic("no text in chat response".into()))
    }
}
