//! Shared providers and chunking parameters for indexing and querying.

use std::fmt;
use std::sync::Arc;

use super::chunk::{SentenceSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use crate::LLMProvider;

pub const DEFAULT_EMBED_BATCH_SIZE: usize = 10;

/// Providers and parameters passed explicitly to every component that needs
/// them, instead of being read from process-wide state.
#[derive(Clone)]
pub struct ServiceContext {
    pub llm: Arc<dyn LLMProvider>,
    pub embed_model: Arc<dyn LLMProvider>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embed_batch_size: usize,
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .field("embed_batch_size", &self.embed_batch_size)
            .finish_non_exhaustive()
    }
}

impl ServiceContext {
    pub fn new(llm: Arc<dyn LLMProvider>, embed_model: Arc<dyn LLMProvider>) -> Self {
        Self {
            llm,
            embed_model,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            embed_batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    /// Number of texts sent per embedding request; zero is treated as one.
    pub fn embed_batch_size(mut self, batch: usize) -> Self {
        self.embed_batch_size = batch.max(1);
        self
    }

    pub fn splitter(&self) -> SentenceSplitter {
        SentenceSplitter::new(self.chunk_size, self.chunk_overlap)
    }
}
