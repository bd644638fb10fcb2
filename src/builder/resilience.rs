use crate::resilient_llm::ResilienceConfig;

use super::llm_builder::LLMBuilder;

impl LLMBuilder {
    /// Wraps the built provider in a retrying layer using default backoff
    /// settings. Passing `false` removes any previously configured layer.
    pub fn resilient(mut self, enable: bool) -> Self {
        self.state.resilience = enable.then(ResilienceConfig::defaults);
        self
    }

    /// Wraps the built provider in a retrying layer with explicit settings.
    pub fn resilience(mut self, config: ResilienceConfig) -> Self {
        self.state.resilience = Some(config);
        self
    }
}
