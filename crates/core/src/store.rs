use crate::index::TfIdfIndex;
use crate::models::Document;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Documents of one processing run and the index built over their chunks.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub build_id: Uuid,
    pub built_at: DateTime<Utc>,
    pub documents: Vec<Document>,
    pub index: TfIdfIndex,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CorpusStats {
    pub documents: usize,
    pub pages: usize,
    pub chunks: usize,
    pub vocabulary: usize,
}

impl Corpus {
    pub fn new(documents: Vec<Document>, index: TfIdfIndex) -> Self {
        Self {
            build_id: Uuid::new_v4(),
            built_at: Utc::now(),
            documents,
            index,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), TfIdfIndex::default())
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents: self.documents.len(),
            pages: self.documents.iter().map(|doc| doc.pages.len()).sum(),
            chunks: self.index.chunks.len(),
            vocabulary: self.index.vocabulary.len(),
        }
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sole owner of the current corpus. Replacement swaps a whole new
/// [`Corpus`] in, so readers holding a snapshot never see a partial build.
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Arc<Corpus>>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_with(&self, corpus: Corpus) -> Arc<Corpus> {
        let corpus = Arc::new(corpus);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::clone(&corpus);
        corpus
    }

    pub fn clear(&self) {
        self.replace_with(Corpus::empty());
    }

    pub fn snapshot(&self) -> Arc<Corpus> {
        let guard = match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(&guard)
    }
}
