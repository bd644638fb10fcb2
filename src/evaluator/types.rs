use async_trait::async_trait;
use serde::Serialize;

use super::error::EvalError;
use crate::rag::Response;

/// Verdict of a single evaluator on a single answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub query: Option<String>,
    pub response: Option<String>,
    pub contexts: Vec<String>,
    /// Binary verdict, absent for evaluators that only score
    pub passing: Option<bool>,
    pub score: Option<f64>,
    /// Judge reasoning or raw verdict text
    pub feedback: Option<String>,
    /// Set when the judge output could not be interpreted
    pub invalid_result: bool,
    pub invalid_reason: Option<String>,
}

impl EvaluationResult {
    pub(crate) fn new(query: &str, response: Option<&str>, contexts: &[String]) -> Self {
        Self {
            query: Some(query.to_string()),
            response: response.map(str::to_string),
            contexts: contexts.to_vec(),
            ..Self::default()
        }
    }

    pub(crate) fn invalid(mut self, reason: impl Into<String>) -> Self {
        self.invalid_result = true;
        self.invalid_reason = Some(reason.into());
        self
    }
}

/// An LLM judge.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Short metric name used in reports.
    fn name(&self) -> &'static str;

    async fn evaluate(
        &self,
        query: &str,
        response: Option<&str>,
        contexts: &[String],
        reference: Option<&str>,
    ) -> Result<EvaluationResult, EvalError>;

    /// Evaluates a query engine response, using its source nodes as contexts.
    async fn evaluate_response(
        &self,
        query: &str,
        response: &Response,
        reference: Option<&str>,
    ) -> Result<EvaluationResult, EvalError> {
        let contexts = response.contexts();
        self.evaluate(query, response.response.as_deref(), &contexts, reference)
            .await
    }
}
