//! Documents, the nodes they are split into, and query responses.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A loaded source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, the source path for file-backed documents
    pub id: String,
    /// Extracted text content
    pub text: String,
    /// Source metadata (file path, name, type, size)
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// First `max_chars` characters of the text.
    pub fn snippet(&self, max_chars: usize) -> String {
        preview(&self.text, max_chars)
    }
}

/// Which metadata to render in front of a node's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataMode {
    /// Text only
    #[default]
    None,
    /// `key: value` lines, a blank line, then the text
    All,
}

/// A chunk of a document, the unit stored in the vector index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub document_id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Node {
    pub fn get_content(&self, mode: MetadataMode) -> String {
        match mode {
            MetadataMode::None => self.text.clone(),
            MetadataMode::All if self.metadata.is_empty() => self.text.clone(),
            MetadataMode::All => {
                let header = self
                    .metadata
                    .iter()
                    .map(|(key, value)| match value {
                        serde_json::Value::String(s) => format!("{key}: {s}"),
                        other => format!("{key}: {other}"),
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{header}\n\n{}", self.text)
            }
        }
    }
}

/// A retrieved node with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeWithScore {
    pub node: Node,
    pub score: f32,
}

/// Answer produced by a query engine with the nodes it was grounded on.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub response: Option<String>,
    pub source_nodes: Vec<NodeWithScore>,
}

impl Response {
    /// Wraps a bare answer that has no retrieved context.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            source_nodes: Vec::new(),
        }
    }

    /// Texts of the source nodes, in retrieval order.
    pub fn contexts(&self) -> Vec<String> {
        self.source_nodes
            .iter()
            .map(|n| n.node.get_content(MetadataMode::None))
            .collect()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response.as_deref().unwrap_or("None"))
    }
}

/// Char-safe prefix of `text`.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
