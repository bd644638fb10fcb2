use crate::{resilient_llm::ResilientLLM, LLMProvider};

use super::super::state::BuilderState;

pub(super) fn wrap_with_resilience(
    state: &mut BuilderState,
    provider: Box<dyn LLMProvider>,
) -> Box<dyn LLMProvider> {
    match state.resilience.take() {
        Some(cfg) if cfg.max_attempts > 1 => Box::new(ResilientLLM::new(provider, cfg)),
        _ => provider,
    }
}
