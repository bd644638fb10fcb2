//! YES/NO judging refined over contexts one at a time.

use super::prompts::render;
use crate::chat::{ChatMessage, ChatProvider};
use crate::error::LLMError;
use crate::LLMProvider;

/// Asks `eval_template` against the first context, then `refine_template`
/// against every following one, carrying the previous answer forward.
/// Returns the final raw answer.
pub(crate) async fn yes_no_over_contexts(
    llm: &dyn LLMProvider,
    eval_template: &str,
    refine_template: &str,
    query_str: &str,
    contexts: &[String],
) -> Result<String, LLMError> {
    let mut answer: Option<String> = None;

    for context in contexts {
        let prompt = match &answer {
            None => render(
                eval_template,
                &[("query_str", query_str), ("context_str", context.as_str())],
            ),
            Some(existing) => render(
                refine_template,
                &[
                    ("query_str", query_str),
                    ("existing_answer", existing.as_str()),
                    ("context_msg", context.as_str()),
                ],
            ),
        };
        let message = ChatMessage::user().content(prompt).build();
        let reply = llm.chat_text(&[message]).await?;
        answer = Some(reply.trim().to_string());
    }

    Ok(answer.unwrap_or_default())
}
