use std::path::PathBuf;

use thiserror::Error;

use crate::error::LLMError;

/// Errors raised while loading documents, building an index or querying it.
#[derive(Debug, Error)]
pub enum RagError {
    /// The input file or directory does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),
    /// The reader has no loader for this file extension
    #[error("unsupported file type '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
    /// The loader exists but was not compiled in
    #[error("reading {format} files requires building with the `{feature}` feature")]
    MissingParser {
        format: &'static str,
        feature: &'static str,
    },
    /// The file was found but its content could not be extracted
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    /// Loading finished without producing a single document
    #[error("no documents were loaded from {0}")]
    NoDocuments(String),
    /// Embedding dimension mismatch
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// A query was issued against an index without nodes
    #[error("the vector index is empty")]
    EmptyIndex,
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Embedding or completion call failed
    #[error(transparent)]
    Provider(#[from] LLMError),
}
