//! Answer a list of queries with (or without) a fixed context and grade each
//! answer for correctness, faithfulness and relevancy.

use std::sync::Arc;

use serde::Serialize;

use super::MetricSummary;
use crate::completion::{CompletionProvider, CompletionRequest};
use crate::error::LLMError;
use crate::evaluator::{CorrectnessEvaluator, Evaluator, FaithfulnessEvaluator, RelevancyEvaluator};
use crate::LLMProvider;

/// Background text about France used by the sample context run.
pub const FRANCE_CONTEXT: &str = "France, located in Western Europe, is a country known for its rich history, world-renowned cuisine, and global cultural influence. Its capital, Paris, is famous for landmarks like the Eiffel Tower and the Louvre Museum. With a population of around 67 million and French as the official language, France operates as a semi-presidential republic. It has played a key role in global events such as the French Revolution and both World Wars. France is also a leader in fashion, art, and philosophy, and is one of the top tourist destinations in the world. The country boasts a strong economy, excelling in industries such as aerospace, luxury goods, agriculture, and tourism, and is a founding member of the European Union and other major international organizations.";

pub const SAMPLE_QUERIES: [&str; 3] = [
    "What is capital of France",
    "Do we need air to breathe?",
    "What are the top tourist attractions in France?",
];

/// Supplies the context passed alongside a query.
pub trait ContextProvider: Send + Sync {
    fn context_for(&self, query: &str) -> String;
}

/// The same text for every query.
#[derive(Debug, Clone)]
pub struct StaticContext(pub String);

impl ContextProvider for StaticContext {
    fn context_for(&self, _query: &str) -> String {
        self.0.clone()
    }
}

/// Always the empty string; the query is sent on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl ContextProvider for NoContext {
    fn context_for(&self, _query: &str) -> String {
        String::new()
    }
}

/// One graded answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRow {
    pub query: String,
    pub response: String,
    pub correctness: MetricSummary,
    pub faithfulness: MetricSummary,
    pub relevancy: MetricSummary,
}

pub struct ContextEvaluation {
    llm: Arc<dyn LLMProvider>,
    context: Box<dyn ContextProvider>,
    correctness: CorrectnessEvaluator,
    faithfulness: FaithfulnessEvaluator,
    relevancy: RelevancyEvaluator,
}

/// Prompt for `query`: bare when there is no context.
pub fn build_prompt(query: &str, context: &str) -> String {
    if context.is_empty() {
        query.to_string()
    } else {
        format!("Query: {query}\nContext: {context}\nResponse:")
    }
}

impl ContextEvaluation {
    /// `llm` answers the queries, `judge` grades the answers.
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        judge: Arc<dyn LLMProvider>,
        context: impl ContextProvider + 'static,
    ) -> Self {
        Self {
            llm,
            context: Box::new(context),
            correctness: CorrectnessEvaluator::new(judge.clone()),
            faithfulness: FaithfulnessEvaluator::new(judge.clone()),
            relevancy: RelevancyEvaluator::new(judge),
        }
    }

    /// Score at or above which a correctness verdict passes.
    pub fn correctness_threshold(mut self, threshold: f64) -> Self {
        self.correctness = self.correctness.threshold(threshold);
        self
    }

    pub async fn evaluate_query(&self, query: &str) -> Result<BatchRow, LLMError> {
        let context = self.context.context_for(query);
        let prompt = build_prompt(query, &context);
        let response = self.llm.complete(&CompletionRequest::new(prompt)).await?.text;
        log::debug!("Answered '{query}' with {} chars", response.len());

        let contexts = vec![context];
        let correctness = self
            .correctness
            .evaluate(query, Some(response.as_str()), &[], None)
            .await;
        let faithfulness = self
            .faithfulness
            .evaluate(query, Some(response.as_str()), &contexts, None)
            .await;
        let relevancy = self
            .relevancy
            .evaluate(query, Some(response.as_str()), &contexts, None)
            .await;

        Ok(BatchRow {
            query: query.to_string(),
            correctness: MetricSummary::from_result(self.correctness.name(), correctness),
            faithfulness: MetricSummary::from_result(self.faithfulness.name(), faithfulness),
            relevancy: MetricSummary::from_result(self.relevancy.name(), relevancy),
            response,
        })
    }

    /// Grades every query in order. A failed answer aborts the run.
    pub async fn run<S: AsRef<str>>(&self, queries: &[S]) -> Result<Vec<BatchRow>, LLMError> {
        let mut rows = Vec::with_capacity(queries.len());
        for (i, query) in queries.iter().enumerate() {
            log::info!("Evaluating query {}/{}", i + 1, queries.len());
            rows.push(self.evaluate_query(query.as_ref()).await?);
        }
        Ok(rows)
    }
}
