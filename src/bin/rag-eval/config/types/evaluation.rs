use rag_eval::evaluator::DEFAULT_CORRECTNESS_THRESHOLD;
use rag_eval::workflow::ask::DEFAULT_REFERENCE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Queries for `batch` when none are given on the command line
    pub queries: Vec<String>,
    /// Context text for `batch`; the bundled France text when unset
    pub context: Option<String>,
    pub reference_answer: String,
    pub correctness_threshold: f64,
    /// Files or directories indexed by `rag` when none are given
    pub documents: Vec<String>,
    pub rag_query: Option<String>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            context: None,
            reference_answer: DEFAULT_REFERENCE.to_string(),
            correctness_threshold: DEFAULT_CORRECTNESS_THRESHOLD,
            documents: Vec::new(),
            rag_query: None,
        }
    }
}
