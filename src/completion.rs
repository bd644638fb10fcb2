//! Single-prompt text completion.

use async_trait::async_trait;

use crate::error::LLMError;

/// A request for a text completion from an LLM provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionRequest {
    /// The input prompt text to complete
    pub prompt: String,
    /// Optional system prompt overriding the provider default
    pub system: Option<String>,
    /// Optional maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Optional temperature parameter to control randomness (0.0-1.0)
    pub temperature: Option<f32>,
}

/// A response containing generated text from a completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// The generated completion text
    pub text: String,
}

impl CompletionRequest {
    /// Creates a new completion request with just a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Creates a builder for constructing a completion request.
    pub fn builder(prompt: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder {
            request: Self::new(prompt),
        }
    }
}

/// Builder for constructing completion requests with optional parameters.
#[derive(Debug)]
pub struct CompletionRequestBuilder {
    request: CompletionRequest,
}

impl CompletionRequestBuilder {
    /// Sets the system prompt for this request only.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.request.system = Some(system.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, val: u32) -> Self {
        self.request.max_tokens = Some(val);
        self
    }

    /// Sets the temperature parameter for controlling randomness.
    pub fn temperature(mut self, val: f32) -> Self {
        self.request.temperature = Some(val);
        self
    }

    /// Builds the completion request with the configured parameters.
    pub fn build(self) -> CompletionRequest {
        self.request
    }
}

/// Trait for providers that support text completion requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a completion request to generate text.
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, LLMError>;
}

impl std::fmt::Display for CompletionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let req = CompletionRequest::builder("Query: x")
            .system("judge")
            .max_tokens(64)
            .temperature(0.0)
            .build();
        assert_eq!(req.prompt, "Query: x");
        assert_eq!(req.system.as_deref(), Some("judge"));
        assert_eq!(req.max_tokens, Some(64));
        assert_eq!(req.temperature, Some(0.0));
    }

    #[test]
    fn new_leaves_options_unset() {
        let req = CompletionRequest::new("hello");
        assert_eq!(req.system, None);
        assert_eq!(req.max_tokens, None);
    }
}
