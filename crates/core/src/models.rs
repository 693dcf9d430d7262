use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_WORDS_PER_CHUNK: usize = 400;
pub const DEFAULT_MIN_PAGE_CHARS: usize = 30;
pub const DEFAULT_TOP_K: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub source_path: String,
    pub checksum: String,
    pub pages: Vec<Page>,
}

/// A chunk as produced by the chunker, before the index assigns weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkDraft {
    pub id: String,
    pub text: String,
    pub source_name: String,
    pub page_number: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub source_name: String,
    pub page_number: u32,
    pub term_frequency: BTreeMap<String, usize>,
    pub token_count: usize,
    pub vector: BTreeMap<String, f64>,
    pub norm: f64,
}

#[derive(Debug, Clone)]
pub struct IngestionOptions {
    pub words_per_chunk: usize,
    pub min_page_chars: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            words_per_chunk: DEFAULT_WORDS_PER_CHUNK,
            min_page_chars: DEFAULT_MIN_PAGE_CHARS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub text: String,
    pub top_k: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub chunk_id: String,
    pub source_name: String,
    pub page_number: u32,
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnswerOrigin {
    Remote,
    Extractive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: String,
    pub text: String,
    pub origin: AnswerOrigin,
    /// Set when a configured answer service failed and the extractive answer
    /// was used instead.
    pub fallback_reason: Option<String>,
    pub hits: Vec<SearchHit>,
}
