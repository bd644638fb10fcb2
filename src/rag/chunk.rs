//! Splitting documents into index nodes.

use super::document::{Document, Node};

pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_CHUNK_OVERLAP: usize = 128;

/// Recursive splitter that prefers paragraph, then line, then sentence, then
/// word boundaries, and only cuts mid-word as a last resort.
///
/// Sizes are measured in characters. Each chunk after the first is prefixed
/// with the last `chunk_overlap` characters of the previous one.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    separators: Vec<String>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn tail(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

impl SentenceSplitter {
    /// Overlap is clamped below the chunk size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            separators: vec![
                "\n\n".to_string(),
                "\n".to_string(),
                ". ".to_string(),
                " ".to_string(),
            ],
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits raw text into chunk strings.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let pieces = self.split_recursive(text, 0);
        let pieces: Vec<String> = pieces
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect();
        self.apply_overlap(pieces)
    }

    /// Splits a document into nodes that inherit its metadata.
    pub fn split_document(&self, document: &Document) -> Vec<Node> {
        self.split_text(&document.text)
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Node {
                id: format!("{}#{idx}", document.id),
                document_id: document.id.clone(),
                text,
                metadata: document.metadata.clone(),
            })
            .collect()
    }

    fn split_recursive(&self, text: &str, separator_idx: usize) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }
        let Some(separator) = self.separators.get(separator_idx) else {
            return self.split_by_chars(text);
        };

        let parts: Vec<&str> = text.split(separator.as_str()).collect();
        if parts.len() == 1 {
            return self.split_recursive(text, separator_idx + 1);
        }
        self.merge_splits(&parts, separator, separator_idx)
    }

    fn merge_splits(&self, parts: &[&str], separator: &str, separator_idx: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for part in parts {
            let candidate = if current.is_empty() {
                part.to_string()
            } else {
                format!("{current}{separator}{part}")
            };

            if char_len(&candidate) <= self.chunk_size {
                current = candidate;
            } else if current.is_empty() {
                chunks.extend(self.split_recursive(part, separator_idx + 1));
            } else {
                chunks.push(std::mem::take(&mut current));
                if char_len(part) <= self.chunk_size {
                    current = part.to_string();
                } else {
                    chunks.extend(self.split_recursive(part, separator_idx + 1));
                }
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    fn split_by_chars(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.chunk_size)
            .map(|c| c.iter().collect())
            .collect()
    }

    fn apply_overlap(&self, chunks: Vec<String>) -> Vec<String> {
        if self.chunk_overlap == 0 || chunks.len() <= 1 {
            return chunks;
        }

        let mut result = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                result.push(chunk.clone());
            } else {
                let overlap_text = tail(&chunks[i - 1], self.chunk_overlap);
                result.push(format!("{overlap_text}{chunk}"));
            }
        }
        result
    }
}
