#[path = "builder/backend.rs"]
mod backend;

#[path = "builder/llm_builder.rs"]
mod llm_builder;

#[path = "builder/state.rs"]
mod state;

#[path = "builder/build/mod.rs"]
mod build;

#[path = "builder/resilience.rs"]
mod resilience;

#[path = "builder/embedding.rs"]
mod embedding;

pub use backend::LLMBackend;
pub use llm_builder::LLMBuilder;
