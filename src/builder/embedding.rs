use super::llm_builder::LLMBuilder;

impl LLMBuilder {
    /// Sets the model used for embedding requests.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.state.embedding_model = Some(model.into());
        self
    }
}
