//! OpenAI API client implementation
//!
//! This module provides integration with OpenAI's GPT and embedding models
//! through the `chat/completions` and `embeddings` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Usage},
    completion::{CompletionProvider, CompletionRequest, CompletionResponse},
    embedding::EmbeddingProvider,
    error::LLMError,
    LLMProvider,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Client for OpenAI API
pub struct OpenAI {
    api_key: String,
    base_url: Url,
    pub model: String,
    pub embedding_model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub system: Option<String>,
    pub timeout_seconds: Option<u64>,
    client: Client,
}

#[derive(Serialize, Debug)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request payload for OpenAI's chat API endpoint.
#[derive(Serialize, Debug)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatChoiceMessage,
}

/// Response payload of the chat completions endpoint.
#[derive(Deserialize, Debug)]
pub struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    usage: Option<Usage>,
}

#[derive(Serialize)]
struct OpenAIEmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct OpenAIEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize, Debug)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl OpenAI {
    /// Creates a new OpenAI client with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key, must not be empty
    /// * `base_url` - API root, defaults to the public endpoint
    /// * `model` - Chat model (defaults to "gpt-3.5-turbo")
    /// * `embedding_model` - Embedding model (defaults to "text-embedding-3-small")
    /// * `max_tokens` - Maximum tokens to generate
    /// * `temperature` - Sampling temperature
    /// * `timeout_seconds` - Request timeout in seconds
    /// * `system` - System prompt
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        embedding_model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Result<Self, LLMError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LLMError::AuthError("Missing OpenAI API key".to_string()));
        }
        let mut base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| LLMError::InvalidRequest(format!("Invalid base URL {base}: {e}")))?;

        Ok(Self {
            api_key,
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            embedding_model: embedding_model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            max_tokens,
            temperature,
            system,
            timeout_seconds,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout_seconds {
            Some(timeout) => request.timeout(Duration::from_secs(timeout)),
            None => request,
        }
    }

    fn log_request_payload<T: Serialize>(&self, label: &str, body: &T) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        if let Ok(json) = serde_json::to_string(body) {
            log::trace!("{label}: {json}");
        }
    }

    async fn ensure_success_response(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response, LLMError> {
        log::debug!("{context} HTTP status: {}", response.status());
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_text = response.text().await?;
        if status.as_u16() == 401 {
            return Err(LLMError::AuthError(format!(
                "{context} rejected the API key: {error_text}"
            )));
        }
        Err(LLMError::ResponseFormatError {
            message: format!("{context} returned error status: {status}"),
            raw_response: error_text,
        })
    }

    async fn send_and_parse<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, LLMError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| LLMError::HttpError(e.to_string()))?;
        self.log_request_payload(context, body);
        let request = self
            .apply_timeout(self.client.post(url).bearer_auth(&self.api_key).json(body));
        let response = request.send().await?;
        let response = self.ensure_success_response(response, context).await?;
        let resp_text = response.text().await?;
        serde_json::from_str(&resp_text).map_err(|e| LLMError::ResponseFormatError {
            message: format!("Failed to decode {context} response: {e}"),
            raw_response: resp_text,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &self.system {
            openai_messages.push(OpenAIChatMessage {
                role: "system",
                content: system,
            });
        }
        openai_messages.extend(messages.iter().map(|m| OpenAIChatMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));

        let body = OpenAIChatRequest {
            model: &self.model,
            messages: openai_messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        };
        let response: OpenAIChatResponse = self
            .send_and_parse("chat/completions", &body, "OpenAI chat API")
            .await?;
        Ok(Box::new(response))
    }
}

#[async_trait]
impl CompletionProvider for OpenAI {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, LLMError> {
        let system = req.system.as_deref().or(self.system.as_deref());
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(OpenAIChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(OpenAIChatMessage {
            role: "user",
            content: &req.prompt,
        });

        let body = OpenAIChatRequest {
            model: &self.model,
            messages,
            max_tokens: req.max_tokens.or(self.max_tokens),
            temperature: req.temperature.or(self.temperature),
            stream: false,
        };
        let response: OpenAIChatResponse = self
            .send_and_parse("chat/completions", &body, "OpenAI completion")
            .await?;
        let text = response.text().ok_or_else(|| LLMError::ResponseFormatError {
            message: "OpenAI completion returned no choices".into(),
            raw_response: String::new(),
        })?;
        Ok(CompletionResponse { text })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAI {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        let body = OpenAIEmbeddingRequest {
            model: &self.embedding_model,
            input,
        };
        let mut json_resp: OpenAIEmbeddingResponse = self
            .send_and_parse("embeddings", &body, "OpenAI embeddings")
            .await?;
        json_resp.data.sort_by_key(|d| d.index);
        Ok(json_resp.data.into_iter().map(|d| d.embedding).collect())
    }
}

impl LLMProvider for OpenAI {}
