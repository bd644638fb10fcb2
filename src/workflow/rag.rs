//! Index local documents, answer a query from them and grade the answer.

use std::sync::Arc;

use serde::Serialize;

use crate::evaluator::{
    AnswerRelevancyEvaluator, EvaluationOutcome, EvaluationSuite, FaithfulnessEvaluator,
};
use crate::rag::{Document, QueryEngine, RagError, Response, ServiceContext, VectorIndex};
use crate::LLMProvider;

pub const DEFAULT_RAG_QUERY: &str = "What is the main topic discussed in the document?";
pub const DEFAULT_TOP_K: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagReport {
    pub query: String,
    pub response: Response,
    pub evaluations: Vec<(&'static str, EvaluationOutcome)>,
}

pub struct RagEvaluation {
    ctx: ServiceContext,
    suite: EvaluationSuite,
    top_k: usize,
}

impl RagEvaluation {
    /// Answers with `ctx.llm` and grades with `judge`.
    pub fn new(ctx: ServiceContext, judge: Arc<dyn LLMProvider>) -> Self {
        let suite = EvaluationSuite::new()
            .with(FaithfulnessEvaluator::new(judge.clone()))
            .with(AnswerRelevancyEvaluator::new(judge));
        Self {
            ctx,
            suite,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn evaluator_names(&self) -> Vec<&'static str> {
        self.suite.names()
    }

    pub async fn build_engine(&self, documents: &[Document]) -> Result<QueryEngine, RagError> {
        if documents.is_empty() {
            return Err(RagError::NoDocuments("the document list".into()));
        }
        let index = VectorIndex::from_documents(&self.ctx, documents).await?;
        log::info!("Vector index ready with {} nodes", index.len());
        Ok(QueryEngine::new(self.ctx.clone(), index).similarity_top_k(self.top_k))
    }

    /// Grades a response against its own source nodes. Each judge failure is
    /// kept as [`EvaluationOutcome::Unavailable`].
    pub async fn evaluate(&self, query: &str, response: &Response) -> Vec<(&'static str, EvaluationOutcome)> {
        let contexts = response.contexts();
        self.suite
            .run(query, response.response.as_deref(), &contexts, None)
            .await
    }

    pub async fn run(&self, documents: &[Document], query: &str) -> Result<RagReport, RagError> {
        let engine = self.build_engine(documents).await?;
        let response = engine.query(query).await?;
        let evaluations = self.evaluate(query, &response).await;
        Ok(RagReport {
            query: query.to_string(),
            response,
            evaluations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLLM;

    fn documents() -> Vec<Document> {
        vec![
            Document::new(
                "data/sample.txt",
                "Faithful answers are grounded in retrieved context.\n\nRust is a systems language.",
            ),
            Document::new("data/france.txt", "Paris is the capital of France."),
        ]
    }

    #[tokio::test]
    async fn answers_and_grades_from_documents() {
        let llm = Arc::new(ScriptedLLM::new(["Grounding answers in context."]));
        let judge = Arc::new(ScriptedLLM::new(["YES", "Relevant.\n[RESULT] 2"]));
        let ctx = ServiceContext::new(llm.clone(), llm.clone())
            .chunk_size(60)
            .chunk_overlap(0);
        let workflow = RagEvaluation::new(ctx, judge).top_k(1);

        let report = workflow
            .run(&documents(), "What does faithful mean?")
            .await
            .unwrap();

        assert_eq!(report.response.response.as_deref(), Some("Grounding answers in context."));
        assert_eq!(report.response.source_nodes.len(), 1);
        assert_eq!(report.response.source_nodes[0].node.document_id, "data/sample.txt");

        let (name, faithfulness) = &report.evaluations[0];
        assert_eq!(*name, "faithfulness");
        assert_eq!(faithfulness.result().and_then(|r| r.passing), Some(true));
        let (_, relevancy) = &report.evaluations[1];
        assert_eq!(relevancy.result().and_then(|r| r.score), Some(1.0));
    }

    #[tokio::test]
    async fn judge_failures_do_not_abort() {
        let llm = Arc::new(ScriptedLLM::new(["An answer."]));
        let judge = Arc::new(ScriptedLLM::default());
        let ctx = ServiceContext::new(llm.clone(), llm);
        let report = RagEvaluation::new(ctx, judge)
            .run(&documents(), "What does faithful mean?")
            .await
            .unwrap();

        assert!(report
            .evaluations
            .iter()
            .all(|(_, outcome)| matches!(outcome, EvaluationOutcome::Unavailable(_))));
    }

    #[tokio::test]
    async fn no_documents_is_an_error() {
        let llm = Arc::new(ScriptedLLM::default());
        let ctx = ServiceContext::new(llm.clone(), llm.clone());
        let err = RagEvaluation::new(ctx, llm).run(&[], "q").await.unwrap_err();
        assert!(matches!(err, RagError::NoDocuments(_)));
    }
}
