//! End-to-end evaluation runs.
//!
//! Each workflow awaits one provider call at a time and returns a
//! serializable report; printing is left to the caller.

pub mod ask;
pub mod context_eval;
pub mod rag;

use serde::Serialize;

use crate::evaluator::{EvalError, EvaluationResult};

pub use ask::{AskMetrics, AskReport, AskWorkflow, MetricsBlock, ScoredMetric};
pub use context_eval::{
    BatchRow, ContextEvaluation, ContextProvider, NoContext, StaticContext,
};
pub use rag::{RagEvaluation, RagReport};

/// System prompt used for answering in the batch workflows.
pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the question to the best of your ability. If you don't know the answer, say 'I am not sure about that.'";

/// Passing flag and score of one evaluator, or why it is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub name: &'static str,
    pub passing: Option<bool>,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricSummary {
    pub(crate) fn from_result(name: &'static str, result: Result<EvaluationResult, EvalError>) -> Self {
        match result {
            Ok(result) => Self {
                name,
                passing: result.passing,
                score: result.score,
                error: None,
            },
            Err(err) => {
                log::warn!("{name} evaluation failed: {err}");
                Self {
                    name,
                    passing: None,
                    score: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
