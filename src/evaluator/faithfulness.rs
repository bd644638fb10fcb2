use std::sync::Arc;

use async_trait::async_trait;

use super::error::EvalError;
use super::parse::is_yes;
use super::prompts::{FAITHFULNESS_EVAL, FAITHFULNESS_REFINE};
use super::refine::yes_no_over_contexts;
use super::types::{EvaluationResult, Evaluator};
use crate::LLMProvider;

/// Checks whether the answer is supported by the retrieved contexts.
pub struct FaithfulnessEvaluator {
    llm: Arc<dyn LLMProvider>,
    raise_on_fail: bool,
}

impl FaithfulnessEvaluator {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self {
            llm,
            raise_on_fail: false,
        }
    }

    /// Return [`EvalError::Rejected`] instead of a failing result.
    pub fn raise_on_fail(mut self, raise: bool) -> Self {
        self.raise_on_fail = raise;
        self
    }
}

#[async_trait]
impl Evaluator for FaithfulnessEvaluator {
    fn name(&self) -> &'static str {
        "faithfulness"
    }

    async fn evaluate(
        &self,
        query: &str,
        response: Option<&str>,
        contexts: &[String],
        _reference: Option<&str>,
    ) -> Result<EvaluationResult, EvalError> {
        let Some(answer) = response else {
            return Err(EvalError::MissingInput("response"));
        };
        if contexts.is_empty() {
            return Err(EvalError::MissingInput("contexts"));
        }

        let verdict = yes_no_over_contexts(
            self.llm.as_ref(),
            FAITHFULNESS_EVAL,
            FAITHFULNESS_REFINE,
            answer,
            contexts,
        )
        .await?;

        let passing = is_yes(&verdict);
        if !passing && self.raise_on_fail {
            return Err(EvalError::Rejected {
                evaluator: self.name(),
            });
        }

        Ok(EvaluationResult {
            passing: Some(passing),
            score: Some(if passing { 1.0 } else { 0.0 }),
            feedback: Some(verdict),
            ..EvaluationResult::new(query, response, contexts)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLLM;

    fn contexts() -> Vec<String> {
        vec![
            "Paris is the capital of France.".to_string(),
            "The Eiffel Tower is in Paris.".to_string(),
        ]
    }

    #[tokio::test]
    async fn refines_over_every_context() {
        let llm = Arc::new(ScriptedLLM::new(["NO", "YES"]));
        let result = FaithfulnessEvaluator::new(llm.clone())
            .evaluate("Capital?", Some("Paris is the capital."), &contexts(), None)
            .await
            .unwrap();

        assert_eq!(result.passing, Some(true));
        assert_eq!(result.score, Some(1.0));
        assert_eq!(result.feedback.as_deref(), Some("YES"));

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Information: Paris is the capital.\nContext: Paris is the capital of France."));
        assert!(prompts[1].contains("We have provided an existing YES/NO answer: NO"));
    }

    #[tokio::test]
    async fn unsupported_answer_scores_zero() {
        let llm = Arc::new(ScriptedLLM::new(["NO"]));
        let result = FaithfulnessEvaluator::new(llm)
            .evaluate("Capital?", Some("Lyon"), &contexts()[..1], None)
            .await
            .unwrap();
        assert_eq!(result.passing, Some(false));
        assert_eq!(result.score, Some(0.0));
    }

    #[tokio::test]
    async fn raise_on_fail_turns_rejection_into_error() {
        let llm = Arc::new(ScriptedLLM::new(["NO"]));
        let err = FaithfulnessEvaluator::new(llm)
            .raise_on_fail(true)
            .evaluate("Capital?", Some("Lyon"), &contexts()[..1], None)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::Rejected { evaluator: "faithfulness" }));
    }

    #[tokio::test]
    async fn contexts_are_required() {
        let llm = Arc::new(ScriptedLLM::default());
        let err = FaithfulnessEvaluator::new(llm)
            .evaluate("Capital?", Some("Paris"), &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::MissingInput("contexts")));
    }
}
