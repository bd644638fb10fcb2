//! Loading, chunking, indexing and querying local documents.

pub mod chunk;
pub mod context;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod reader;

pub use chunk::SentenceSplitter;
pub use context::ServiceContext;
pub use document::{preview, Document, MetadataMode, Node, NodeWithScore, Response};
pub use error::RagError;
pub use index::{cosine_similarity, VectorIndex};
pub use query::QueryEngine;
pub use reader::DocumentReader;
