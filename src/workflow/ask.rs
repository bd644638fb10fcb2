//! Answer one query and report normalized judge scores.

use std::sync::Arc;

use serde::Serialize;

use crate::completion::{CompletionProvider, CompletionRequest};
use crate::error::LLMError;
use crate::evaluator::{
    AnswerRelevancyEvaluator, CorrectnessEvaluator, EvalError, EvaluationResult, Evaluator,
    FaithfulnessEvaluator,
};
use crate::score::{normalize, scale_correctness};
use crate::LLMProvider;

pub const DEFAULT_QUERY: &str = "What is the capital of France?";
pub const DEFAULT_REFERENCE: &str = "Paris";
pub const NO_FEEDBACK: &str = "No feedback provided.";

/// A display score and the judge's explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMetric {
    pub score: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskMetrics {
    pub faithfulness: ScoredMetric,
    pub relevancy: ScoredMetric,
    pub correctness: ScoredMetric,
}

/// All three metrics, or the first evaluator error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MetricsBlock {
    Scored(AskMetrics),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskReport {
    pub query: String,
    pub response: String,
    pub metrics: MetricsBlock,
}

pub struct AskWorkflow {
    llm: Arc<dyn LLMProvider>,
    faithfulness: FaithfulnessEvaluator,
    relevancy: AnswerRelevancyEvaluator,
    correctness: CorrectnessEvaluator,
    reference: String,
}

fn feedback_or_default(result: &EvaluationResult) -> String {
    result
        .feedback
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or(NO_FEEDBACK)
        .to_string()
}

impl AskWorkflow {
    /// A faithfulness verdict of NO fails the whole metrics block.
    pub fn new(llm: Arc<dyn LLMProvider>, judge: Arc<dyn LLMProvider>) -> Self {
        Self {
            llm,
            faithfulness: FaithfulnessEvaluator::new(judge.clone()).raise_on_fail(true),
            relevancy: AnswerRelevancyEvaluator::new(judge.clone()),
            correctness: CorrectnessEvaluator::new(judge),
            reference: DEFAULT_REFERENCE.to_string(),
        }
    }

    /// Reference answer the response is checked against for faithfulness.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn correctness_threshold(mut self, threshold: f64) -> Self {
        self.correctness = self.correctness.threshold(threshold);
        self
    }

    async fn metrics(&self, query: &str, response: &str) -> Result<AskMetrics, EvalError> {
        let contexts = vec![self.reference.clone()];
        let faithfulness = self
            .faithfulness
            .evaluate(query, Some(response), &contexts, Some(self.reference.as_str()))
            .await?;
        let relevancy = self
            .relevancy
            .evaluate(query, Some(response), &contexts, Some(self.reference.as_str()))
            .await?;
        let correctness = self
            .correctness
            .evaluate(query, Some(response), &[], None)
            .await?;

        Ok(AskMetrics {
            faithfulness: ScoredMetric {
                score: normalize(faithfulness.score, faithfulness.feedback.as_deref()),
                feedback: feedback_or_default(&faithfulness),
            },
            relevancy: ScoredMetric {
                score: normalize(relevancy.score, relevancy.feedback.as_deref()),
                feedback: feedback_or_default(&relevancy),
            },
            correctness: ScoredMetric {
                score: scale_correctness(correctness.score),
                feedback: feedback_or_default(&correctness),
            },
        })
    }

    /// Fails only when the answer itself cannot be produced.
    pub async fn run(&self, query: &str) -> Result<AskReport, LLMError> {
        let completion = self.llm.complete(&CompletionRequest::new(query)).await?;
        let response = completion.text.trim().to_string();

        let metrics = match self.metrics(query, &response).await {
            Ok(metrics) => MetricsBlock::Scored(metrics),
            Err(err) => {
                log::warn!("evaluation failed: {err}");
                MetricsBlock::Failed(err.to_string())
            }
        };

        Ok(AskReport {
            query: query.to_string(),
            response,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLLM;
    use rstest::rstest;

    #[tokio::test]
    async fn reports_normalized_scores() {
        let answerer = Arc::new(ScriptedLLM::new(["  Paris is the capital of France.\n"]));
        let judge = Arc::new(ScriptedLLM::new([
            "YES",
            "Both criteria met.\n[RESULT] 2",
            "5\nFully correct.",
        ]));
        let report = AskWorkflow::new(answerer, judge.clone())
            .run(DEFAULT_QUERY)
            .await
            .unwrap();

        assert_eq!(report.response, "Paris is the capital of France.");
        let MetricsBlock::Scored(metrics) = report.metrics else {
            panic!("expected scores");
        };
        assert_eq!(metrics.faithfulness.score, 1.0);
        assert_eq!(metrics.faithfulness.feedback, "YES");
        assert_eq!(metrics.relevancy.score, 1.0);
        assert_eq!(metrics.correctness.score, 1.25);
        assert_eq!(metrics.correctness.feedback, "Fully correct.");
        assert!(judge.prompts()[0].contains("Context: Paris\nAnswer: "));
    }

    #[tokio::test]
    async fn zero_relevancy_falls_back_to_feedback_ratio() {
        let answerer = Arc::new(ScriptedLLM::new(["Paris"]));
        let judge = Arc::new(ScriptedLLM::new([
            "YES",
            "Scored 0/2 overall.\n[RESULT] 0",
            "1\n",
        ]));
        let report = AskWorkflow::new(answerer, judge).run("Capital?").await.unwrap();

        let MetricsBlock::Scored(metrics) = report.metrics else {
            panic!("expected scores");
        };
        assert_eq!(metrics.relevancy.score, 0.0);
        assert_eq!(metrics.correctness.score, 1.0);
        assert_eq!(metrics.correctness.feedback, NO_FEEDBACK);
    }

    #[rstest]
    #[case("Criteria met: 2/2.\n[RESULT] 0", 1.0)]
    #[case("Criteria met: 1/2.\n[RESULT] 0", 0.5)]
    #[tokio::test]
    async fn zero_relevancy_uses_ratio_from_feedback(#[case] verdict: &str, #[case] expected: f64) {
        let answerer = Arc::new(ScriptedLLM::new(["Paris"]));
        let judge = Arc::new(ScriptedLLM::new(["YES", verdict, "4\nGood."]));
        let report = AskWorkflow::new(answerer, judge).run("Capital?").await.unwrap();

        let MetricsBlock::Scored(metrics) = report.metrics else {
            panic!("expected scores");
        };
        assert_eq!(metrics.relevancy.score, expected);
        assert_eq!(metrics.relevancy.feedback, verdict);
    }

    #[tokio::test]
    async fn unfaithful_answer_fails_metrics_but_keeps_response() {
        let answerer = Arc::new(ScriptedLLM::new(["Lyon"]));
        let judge = Arc::new(ScriptedLLM::new(["NO"]));
        let report = AskWorkflow::new(answerer, judge).run("Capital?").await.unwrap();

        assert_eq!(report.response, "Lyon");
        assert_eq!(
            report.metrics,
            MetricsBlock::Failed("faithfulness: the response is invalid".into())
        );
    }

    #[tokio::test]
    async fn completion_failure_is_fatal() {
        let answerer = Arc::new(ScriptedLLM::default());
        let judge = Arc::new(ScriptedLLM::default());
        assert!(AskWorkflow::new(answerer, judge).run("Capital?").await.is_err());
    }
}
