//! HTTP clients for the supported LLM services.

pub mod ollama;
pub mod openai;
