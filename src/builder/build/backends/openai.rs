use crate::{error::LLMError, LLMProvider};

#[cfg(feature = "openai")]
use super::super::helpers;
use crate::builder::state::BuilderState;

#[cfg(feature = "openai")]
pub(super) fn build_openai(state: &mut BuilderState) -> Result<Box<dyn LLMProvider>, LLMError> {
    let api_key = helpers::require_api_key(state, "OpenAI")?;
    let timeout = helpers::timeout_or_default(state);

    let provider = crate::backends::openai::OpenAI::new(
        api_key,
        state.base_url.take(),
        state.model.take(),
        state.embedding_model.take(),
        state.max_tokens,
        state.temperature,
        timeout,
        state.system.take(),
    )?;

    Ok(Box::new(provider))
}

#[cfg(not(feature = "openai"))]
pub(super) fn build_openai(_state: &mut BuilderState) -> Result<Box<dyn LLMProvider>, LLMError> {
    Err(LLMError::InvalidRequest(
        "OpenAI feature not enabled".to_string(),
    ))
}
