use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse},
    completion::{CompletionProvider, CompletionRequest, CompletionResponse},
    embedding::EmbeddingProvider,
    error::LLMError,
    LLMProvider,
};

const VOCABULARY: [&str; 8] = [
    "france", "paris", "capital", "air", "breathe", "tourist", "rust", "faithful",
];

/// Provider that answers from a queue of canned replies and embeds text as
/// keyword counts over a tiny fixed vocabulary.
#[derive(Default)]
pub(crate) struct ScriptedLLM {
    replies: Mutex<VecDeque<Result<String, LLMError>>>,
    prompts: Mutex<Vec<String>>,
    embed_calls: Mutex<usize>,
}

#[derive(Debug)]
struct ScriptedResponse(String);

impl std::fmt::Display for ScriptedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ChatResponse for ScriptedResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl ScriptedLLM {
    pub(crate) fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let llm = Self::default();
        for reply in replies {
            llm.push_reply(reply);
        }
        llm
    }

    pub(crate) fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub(crate) fn push_error(&self, err: LLMError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    /// Every prompt seen so far, chat messages joined by newlines.
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn embed_calls(&self) -> usize {
        *self.embed_calls.lock().unwrap()
    }

    fn next_reply(&self, prompt: String) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::Generic("no scripted reply left".into())))
    }
}

pub(crate) fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    let mut vector: Vec<f32> = VOCABULARY
        .iter()
        .map(|word| lower.matches(word).count() as f32)
        .collect();
    vector.push(0.01);
    vector
}

#[async_trait]
impl ChatProvider for ScriptedLLM {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let text = self.next_reply(prompt)?;
        Ok(Box::new(ScriptedResponse(text)))
    }
}

#[async_trait]
impl CompletionProvider for ScriptedLLM {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, LLMError> {
        let text = self.next_reply(req.prompt.clone())?;
        Ok(CompletionResponse { text })
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedLLM {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        *self.embed_calls.lock().unwrap() += 1;
        Ok(input.iter().map(|text| keyword_vector(text)).collect())
    }
}

impl LLMProvider for ScriptedLLM {}
