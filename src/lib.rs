//! Query LLM backends over local documents and grade the answers with LLM judges.
//!
//! The crate is split into a thin provider layer ([`chat`], [`completion`],
//! [`embedding`], [`backends`], [`builder`]), a small in-memory retrieval stack
//! ([`rag`]), LLM-judged [`evaluator`]s and the [`score`] helpers that turn judge
//! output into a displayable confidence value.
//!
//! ```no_run
//! use rag_eval::builder::{LLMBackend, LLMBuilder};
//! use rag_eval::completion::{CompletionProvider, CompletionRequest};
//!
//! # async fn run() -> Result<(), rag_eval::error::LLMError> {
//! let llm = LLMBuilder::new()
//!     .backend(LLMBackend::Ollama)
//!     .model("llama3.1")
//!     .timeout_seconds(120)
//!     .build()?;
//! let answer = llm
//!     .complete(&CompletionRequest::new("What is the capital of France?"))
//!     .await?;
//! println!("{}", answer.text);
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod builder;
pub mod chat;
pub mod completion;
pub mod embedding;
pub mod error;
pub mod evaluator;
pub mod rag;
pub mod resilient_llm;
pub mod score;
pub mod workflow;

#[cfg(test)]
mod test_support;

use chat::ChatProvider;
use completion::CompletionProvider;
use embedding::EmbeddingProvider;

/// Core trait that all LLM providers must implement, combining chat,
/// completion and embedding capabilities into a single interface.
pub trait LLMProvider: ChatProvider + CompletionProvider + EmbeddingProvider {}
