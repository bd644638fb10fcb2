//! Ollama API client implementation for chat, completion and embeddings.
//!
//! Talks to a local (or remote) Ollama server through its native
//! `/api/chat`, `/api/generate` and `/api/embed` endpoints with streaming
//! disabled.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Usage},
    completion::{CompletionProvider, CompletionRequest, CompletionResponse},
    embedding::EmbeddingProvider,
    error::LLMError,
    LLMProvider,
};

pub const DEFAULT_MODEL: &str = "llama3.1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Client for interacting with Ollama's API.
pub struct Ollama {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub embedding_model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub system: Option<String>,
    pub timeout_seconds: Option<u64>,
    client: Client,
}

#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Default)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct OllamaResponseMessage {
    content: String,
}

/// Response payload of `/api/chat`.
#[derive(Deserialize, Debug)]
pub struct OllamaChatResponse {
    message: Option<OllamaResponseMessage>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Deserialize, Debug)]
struct OllamaEmbeddingResponse {
    embeddings: Vec<Vec<f32>>,
}

impl std::fmt::Display for OllamaChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text().unwrap_or_default())
    }
}

impl ChatResponse for OllamaChatResponse {
    fn text(&self) -> Option<String> {
        self.message.as_ref().map(|m| m.content.clone())
    }

    fn usage(&self) -> Option<Usage> {
        match (self.prompt_eval_count, self.eval_count) {
            (None, None) => None,
            (prompt, completion) => Some(Usage::from_counts(
                prompt.unwrap_or(0),
                completion.unwrap_or(0),
            )),
        }
    }
}

impl Ollama {
    /// Creates a new Ollama client with the specified configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: Option<String>,
        embedding_model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            embedding_model: embedding_model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            max_tokens,
            temperature,
            system,
            timeout_seconds,
            client: Client::new(),
        }
    }

    fn options(&self, max_tokens: Option<u32>, temperature: Option<f32>) -> OllamaOptions {
        OllamaOptions {
            temperature: temperature.or(self.temperature),
            num_predict: max_tokens.or(self.max_tokens),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, LLMError> {
        let url = self.endpoint(path);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(Duration::from_secs(timeout));
        }
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(body) {
                log::trace!("Ollama request to {url}: {json}");
            }
        }

        let response = request.send().await?;
        log::debug!("Ollama {path} HTTP status: {}", response.status());
        let status = response.status();
        let text = response.text().await?;
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(LLMError::AuthError(format!(
                "Ollama {path} rejected credentials: {status}"
            )));
        }
        if !status.is_success() {
            return Err(LLMError::ResponseFormatError {
                message: format!("Ollama {path} returned error status: {status}"),
                raw_response: text,
            });
        }
        serde_json::from_str(&text).map_err(|e| LLMError::ResponseFormatError {
            message: format!("Failed to decode Ollama {path} response: {e}"),
            raw_response: text,
        })
    }
}

#[async_trait]
impl ChatProvider for Ollama {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let mut chat_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &self.system {
            chat_messages.push(OllamaChatMessage {
                role: "system",
                content: system,
            });
        }
        chat_messages.extend(messages.iter().map(|m| OllamaChatMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));

        let body = OllamaChatRequest {
            model: &self.model,
            messages: chat_messages,
            stream: false,
            options: self.options(None, None),
        };
        let response: OllamaChatResponse = self.post_json("api/chat", &body).await?;
        Ok(Box::new(response))
    }
}

#[async_trait]
impl CompletionProvider for Ollama {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, LLMError> {
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &req.prompt,
            system: req.system.as_deref().or(self.system.as_deref()),
            stream: false,
            options: self.options(req.max_tokens, req.temperature),
        };
        let response: OllamaGenerateResponse = self.post_json("api/generate", &body).await?;
        Ok(CompletionResponse {
            text: response.response,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for Ollama {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        let expected = input.len();
        let body = OllamaEmbeddingRequest {
            model: &self.embedding_model,
            input,
        };
        let response: OllamaEmbeddingResponse = self.post_json("api/embed", &body).await?;
        if response.embeddings.len() != expected {
            return Err(LLMError::ProviderError(format!(
                "Ollama returned {} embeddings for {expected} inputs",
                response.embeddings.len()
            )));
        }
        Ok(response.embeddings)
    }
}

impl LLMProvider for Ollama {}
