//! Retrieval-augmented question answering over a [`VectorIndex`].

use super::context::ServiceContext;
use super::document::{MetadataMode, NodeWithScore, Response};
use super::error::RagError;
use super::index::VectorIndex;
use crate::completion::{CompletionProvider, CompletionRequest};
use crate::embedding::EmbeddingProvider;
use crate::error::LLMError;

pub const DEFAULT_SIMILARITY_TOP_K: usize = 2;

pub const DEFAULT_QA_TEMPLATE: &str = "Context information is below.\n\
---------------------\n\
{context_str}\n\
---------------------\n\
Given the context information and not prior knowledge, answer the query.\n\
Query: {query_str}\n\
Answer: ";

/// Embeds the query, retrieves the closest nodes and asks the LLM to answer
/// from them.
pub struct QueryEngine {
    ctx: ServiceContext,
    index: VectorIndex,
    similarity_top_k: usize,
    qa_template: String,
}

impl QueryEngine {
    pub fn new(ctx: ServiceContext, index: VectorIndex) -> Self {
        Self {
            ctx,
            index,
            similarity_top_k: DEFAULT_SIMILARITY_TOP_K,
            qa_template: DEFAULT_QA_TEMPLATE.to_string(),
        }
    }

    pub fn similarity_top_k(mut self, top_k: usize) -> Self {
        self.similarity_top_k = top_k;
        self
    }

    /// Template with `{context_str}` and `{query_str}` placeholders.
    pub fn qa_template(mut self, template: impl Into<String>) -> Self {
        self.qa_template = template.into();
        self
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<NodeWithScore>, RagError> {
        let mut vectors = self.ctx.embed_model.embed(vec![query.to_string()]).await?;
        let Some(query_vector) = vectors.pop() else {
            return Err(RagError::Provider(LLMError::ProviderError(
                "embedding provider returned no vector for the query".into(),
            )));
        };
        self.index.retrieve(&query_vector, self.similarity_top_k)
    }

    pub fn build_prompt(&self, query: &str, nodes: &[NodeWithScore]) -> String {
        let context_str = nodes
            .iter()
            .map(|n| n.node.get_content(MetadataMode::All))
            .collect::<Vec<_>>()
            .join("\n\n");
        self.qa_template
            .replace("{context_str}", &context_str)
            .replace("{query_str}", query)
    }

    pub async fn query(&self, query: &str) -> Result<Response, RagError> {
        let source_nodes = self.retrieve(query).await?;
        log::debug!("Retrieved {} nodes for query", source_nodes.len());

        let prompt = self.build_prompt(query, &source_nodes);
        let completion = self.ctx.llm.complete(&CompletionRequest::new(prompt)).await?;
        let text = completion.text.trim();

        Ok(Response {
            response: (!text.is_empty()).then(|| text.to_string()),
            source_nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rag::document::Document;
    use crate::test_support::ScriptedLLM;

    async fn engine(llm: Arc<ScriptedLLM>) -> QueryEngine {
        let ctx = ServiceContext::new(llm.clone(), llm.clone()).chunk_size(64);
        let docs = vec![
            Document::new("a.txt", "Paris is the capital of France.").with_metadata("file_name", "a.txt"),
            Document::new("b.txt", "Rust has no garbage collector."),
            Document::new("c.txt", "Tourists visit Paris in spring."),
        ];
        let index = VectorIndex::from_documents(&ctx, &docs).await.unwrap();
        QueryEngine::new(ctx, index)
    }

    #[tokio::test]
    async fn query_answers_from_retrieved_context() {
        let llm = Arc::new(ScriptedLLM::new(["  Paris.\n"]));
        let engine = engine(llm.clone()).await;

        let response = engine.query("What is the capital of France?").await.unwrap();

        assert_eq!(response.response.as_deref(), Some("Paris."));
        assert_eq!(response.source_nodes.len(), 2);
        assert_eq!(response.source_nodes[0].node.document_id, "a.txt");

        let prompt = &llm.prompts()[0];
        assert!(prompt.starts_with("Context information is below."));
        assert!(prompt.contains("file_name: a.txt\n\nParis is the capital of France."));
        assert!(prompt.ends_with("Query: What is the capital of France?\nAnswer: "));
    }

    #[tokio::test]
    async fn blank_answer_becomes_none() {
        let llm = Arc::new(ScriptedLLM::new(["   "]));
        let engine = engine(llm).await;
        let response = engine.query("capital?").await.unwrap();
        assert_eq!(response.response, None);
        assert_eq!(response.to_string(), "None");
    }

    #[tokio::test]
    async fn completion_failure_propagates() {
        let llm = Arc::new(ScriptedLLM::default());
        let engine = engine(llm).await.similarity_top_k(1);
        let err = engine.query("capital?").await.unwrap_err();
        assert!(matches!(err, RagError::Provider(_)));
    }
}
