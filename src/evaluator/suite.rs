use std::sync::Arc;

use serde::Serialize;

use super::types::{EvaluationResult, Evaluator};

/// Result of one evaluator inside a suite run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    Completed(EvaluationResult),
    /// The evaluator failed; carries the error text
    Unavailable(String),
}

impl EvaluationOutcome {
    pub fn result(&self) -> Option<&EvaluationResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Unavailable(_) => None,
        }
    }
}

/// Runs several evaluators on the same answer, one after another, without
/// letting a failing judge abort the others.
#[derive(Default, Clone)]
pub struct EvaluationSuite {
    evaluators: Vec<Arc<dyn Evaluator>>,
}

impl EvaluationSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluators.push(Arc::new(evaluator));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.evaluators.iter().map(|e| e.name()).collect()
    }

    pub async fn run(
        &self,
        query: &str,
        response: Option<&str>,
        contexts: &[String],
        reference: Option<&str>,
    ) -> Vec<(&'static str, EvaluationOutcome)> {
        let mut outcomes = Vec::with_capacity(self.evaluators.len());
        for evaluator in &self.evaluators {
            let outcome = match evaluator.evaluate(query, response, contexts, reference).await {
                Ok(result) => EvaluationOutcome::Completed(result),
                Err(err) => {
                    log::warn!("{} evaluation failed: {err}", evaluator.name());
                    EvaluationOutcome::Unavailable(err.to_string())
                }
            };
            outcomes.push((evaluator.name(), outcome));
        }
        outcomes
    }
}
