use std::sync::Arc;

use async_trait::async_trait;

use super::error::EvalError;
use super::parse::is_yes;
use super::prompts::{RELEVANCY_EVAL, RELEVANCY_REFINE};
use super::refine::yes_no_over_contexts;
use super::types::{EvaluationResult, Evaluator};
use crate::LLMProvider;

/// Checks whether the query and answer are in line with the contexts.
pub struct RelevancyEvaluator {
    llm: Arc<dyn LLMProvider>,
}

impl RelevancyEvaluator {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Evaluator for RelevancyEvaluator {
    fn name(&self) -> &'static str {
        "relevancy"
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
        if contexts.is_empty() {
            return Err(EvalError::MissingInput("contexts"));
        }

        let query_str = format!("Question: {query}\nResponse: {answer}");
        let verdict = yes_no_over_contexts(
            self.llm.as_ref(),
            RELEVANCY_EVAL,
            RELEVANCY_REFINE,
            &query_str,
            contexts,
        )
        .await?;

        let passing = is_yes(&verdict);
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

    #[tokio::test]
    async fn sends_question_and_response_together() {
        let llm = Arc::new(ScriptedLLM::new(["YES"]));
        let contexts = vec!["Paris is the capital of France.".to_string()];
        let result = RelevancyEvaluator::new(llm.clone())
            .evaluate("What is the capital of France?", Some("Paris"), &contexts, None)
            .await
            .unwrap();

        assert_eq!(result.passing, Some(true));
        assert_eq!(result.score, Some(1.0));
        assert!(llm.prompts()[0]
            .contains("Question: What is the capital of France?\nResponse: Paris"));
    }

    #[tokio::test]
    async fn judge_error_propagates() {
        let llm = Arc::new(ScriptedLLM::default());
        let contexts = vec!["ctx".to_string()];
        let err = RelevancyEvaluator::new(llm)
            .evaluate("q", Some("a"), &contexts, None)
            .await
            .unwrap_err();
        assert!(matches!(err, EvalError::Provider(_)));
    }
}
