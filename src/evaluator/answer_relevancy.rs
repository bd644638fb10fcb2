use std::sync::Arc;

use async_trait::async_trait;

use super::error::EvalError;
use super::parse::result_score;
use super::prompts::{render, ANSWER_RELEVANCY_EVAL};
use super::types::{EvaluationResult, Evaluator};
use crate::chat::{ChatMessage, ChatProvider};
use crate::LLMProvider;

const MAX_SCORE: f64 = 2.0;

/// Scores how well the answer addresses the query, without looking at
/// contexts. Produces a score in `[0, 1]` and no pass/fail verdict.
pub struct AnswerRelevancyEvaluator {
    llm: Arc<dyn LLMProvider>,
}

impl AnswerRelevancyEvaluator {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Evaluator for AnswerRelevancyEvaluator {
    fn name(&self) -> &'static str {
        "answer_relevancy"
    }

    async fn evaluate(
        &self,
        query: &str,
        response: Option<&str>,
        contexts: &[String],
        _reference: Option<&str>,
    ) -> Result<EvaluationResult, EvalError> {
        if query.is_empty() {
            return Err(EvalError::MissingInput("query"));
        }
        let Some(answer) = response else {
            return Err(EvalError::MissingInput("response"));
        };

        let prompt = render(ANSWER_RELEVANCY_EVAL, &[("query", query), ("response", answer)]);
        let verdict = self
            .llm
            .chat_text(&[ChatMessage::user().content(prompt).build()])
            .await?;

        let result = EvaluationResult {
            feedback: Some(verdict.clone()),
            ..EvaluationResult::new(query, response, contexts)
        };
        Ok(match result_score(&verdict) {
            Some(points) => EvaluationResult {
                score: Some(f64::from(points) / MAX_SCORE),
                ..result
            },
            None => result.invalid("judge output has no [RESULT] tag"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLLM;

    #[tokio::test]
    async fn score_is_points_over_two() {
        let llm = Arc::new(ScriptedLLM::new([
            "1. The response matches the subject.\n2. It only partly addresses the focus.\n[RESULT] 1",
        ]));
        let result = AnswerRelevancyEvaluator::new(llm)
            .evaluate("Capital?", Some("Paris"), &[], None)
            .await
            .unwrap();

        assert_eq!(result.score, Some(0.5));
        assert_eq!(result.passing, None);
        assert!(result.feedback.unwrap().ends_with("[RESULT] 1"));
    }

    #[tokio::test]
    async fn missing_tag_is_invalid() {
        let llm = Arc::new(ScriptedLLM::new(["Looks relevant to me."]));
        let result = AnswerRelevancyEvaluator::new(llm)
            .evaluate("Capital?", Some("Paris"), &[], None)
            .await
            .unwrap();

        assert!(result.invalid_result);
        assert_eq!(result.score, None);
    }
}
