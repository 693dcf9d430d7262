use crate::error::SearchError;
use crate::index::{vector_norm, TfIdfIndex};
use crate::models::{Chunk, SearchHit, SearchQuery, SearchResult};
use crate::store::Corpus;
use crate::tokenizer::{term_counts, tokenize};
use std::collections::BTreeMap;

/// Query weights computed against an existing IDF table.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    pub weights: BTreeMap<String, f64>,
    pub norm: f64,
}

impl QueryVector {
    pub fn from_text(text: &str, index: &TfIdfIndex) -> Self {
        let terms = tokenize(text);
        let total = terms.len() as f64;
        let weights: BTreeMap<String, f64> = term_counts(&terms)
            .into_iter()
            .map(|(term, count)| {
                let weight = (count as f64 / total) * index.idf_for(&term);
                (term, weight)
            })
            .collect();
        let norm = vector_norm(weights.values());

        Self { weights, norm }
    }

    pub fn cosine(&self, chunk: &Chunk) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .filter_map(|(term, weight)| chunk.vector.get(term).map(|value| weight * value))
            .sum();
        dot / (self.norm * chunk.norm)
    }
}

/// Ranks every chunk of the corpus by cosine similarity and keeps the best
/// `query.top_k`. Chunks without overlap stay in the ranking at 0.0.
pub fn search(corpus: &Corpus, query: &SearchQuery) -> Result<SearchResult, SearchError> {
    if query.text.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    if corpus.is_empty() {
        return Err(SearchError::IndexNotBuilt);
    }

    let query_vector = QueryVector::from_text(&query.text, &corpus.index);

    let mut scored: Vec<(&Chunk, f64)> = corpus
        .index
        .chunks
        .iter()
        .map(|chunk| (chunk, query_vector.cosine(chunk)))
        .collect();
    scored.sort_by(|left, right| right.1.total_cmp(&left.1));

    Ok(SearchResult {
        query: query.text.clone(),
        hits: scored
            .into_iter()
            .take(query.top_k)
            .map(|(chunk, score)| SearchHit {
                chunk_id: chunk.id.clone(),
                source_name: chunk.source_name.clone(),
                page_number: chunk.page_number,
                text: chunk.text.clone(),
                score,
            })
            .collect(),
    })
}
