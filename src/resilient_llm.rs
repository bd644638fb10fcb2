#[path = "resilient_llm/config.rs"]
mod config;

#[path = "resilient_llm/wrapper.rs"]
mod wrapper;

#[path = "resilient_llm/chat.rs"]
mod chat;

#[path = "resilient_llm/other.rs"]
mod other;

#[cfg(test)]
#[path = "resilient_llm/tests.rs"]
mod tests;

pub use config::ResilienceConfig;
pub use wrapper::ResilientLLM;
