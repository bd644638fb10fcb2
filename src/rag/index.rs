//! In-memory vector index over document nodes.

use std::cmp::Ordering;

use super::context::ServiceContext;
use super::document::{Document, MetadataMode, Node, NodeWithScore};
use super::error::RagError;
use crate::embedding::EmbeddingProvider;
use crate::error::LLMError;

/// Cosine similarity of two vectors of equal length; zero-norm vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Flat index: every query is scored against every stored node.
#[derive(Debug, Default, Clone)]
pub struct VectorIndex {
    nodes: Vec<Node>,
    embeddings: Vec<Vec<f32>>,
    dimension: Option<usize>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits the documents, embeds the nodes in batches and stores them.
    pub async fn from_documents(
        ctx: &ServiceContext,
        documents: &[Document],
    ) -> Result<Self, RagError> {
        let splitter = ctx.splitter();
        let nodes: Vec<Node> = documents
            .iter()
            .flat_map(|doc| splitter.split_document(doc))
            .collect();
        log::info!(
            "Indexing {} nodes from {} documents",
            nodes.len(),
            documents.len()
        );

        let mut index = Self::new();
        let batch_size = ctx.embed_batch_size.max(1);
        for batch in nodes.chunks(batch_size) {
            let texts: Vec<String> = batch
                .iter()
                .map(|n| n.get_content(MetadataMode::All))
                .collect();
            let vectors = ctx.embed_model.embed(texts).await?;
            if vectors.len() != batch.len() {
                return Err(LLMError::ProviderError(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                ))
                .into());
            }
            for (node, vector) in batch.iter().zip(vectors) {
                index.insert(node.clone(), vector)?;
            }
        }
        Ok(index)
    }

    /// Adds a node; all embeddings must share the first one's dimension.
    pub fn insert(&mut self, node: Node, embedding: Vec<f32>) -> Result<(), RagError> {
        match self.dimension {
            Some(expected) if expected != embedding.len() => {
                return Err(RagError::DimensionMismatch {
                    expected,
                    actual: embedding.len(),
                })
            }
            None => self.dimension = Some(embedding.len()),
            _ => {}
        }
        self.nodes.push(node);
        self.embeddings.push(embedding);
        Ok(())
    }

    /// The `top_k` most similar nodes, best first.
    pub fn retrieve(&self, query: &[f32], top_k: usize) -> Result<Vec<NodeWithScore>, RagError> {
        let Some(expected) = self.dimension else {
            return Err(RagError::EmptyIndex);
        };
        if expected != query.len() {
            return Err(RagError::DimensionMismatch {
                expected,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_similarity(query, e)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, score)| NodeWithScore {
                node: self.nodes[i].clone(),
                score,
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
