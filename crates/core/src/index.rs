use crate::models::{Chunk, ChunkDraft};
use crate::tokenizer::{term_counts, tokenize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Floor applied to vector norms so cosine similarity never divides by zero.
pub const EPSILON_NORM: f64 = 1e-9;

/// TF-IDF weights over a fixed chunk set. Always rebuilt from scratch.
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    pub chunks: Vec<Chunk>,
    pub vocabulary: BTreeSet<String>,
    pub idf: HashMap<String, f64>,
}

impl TfIdfIndex {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// IDF a term would get with a document frequency of zero.
    pub fn unseen_term_idf(&self) -> f64 {
        smoothed_idf(self.chunks.len(), 0)
    }

    pub fn idf_for(&self, term: &str) -> f64 {
        self.idf
            .get(term)
            .copied()
            .unwrap_or_else(|| self.unseen_term_idf())
    }
}

pub fn smoothed_idf(total_chunks: usize, document_frequency: usize) -> f64 {
    ((total_chunks as f64 + 1.0) / (document_frequency as f64 + 1.0)).ln() + 1.0
}

/// Euclidean length of the weights, floored to [`EPSILON_NORM`].
pub fn vector_norm<'a>(weights: impl IntoIterator<Item = &'a f64>) -> f64 {
    let norm = weights
        .into_iter()
        .map(|weight| weight * weight)
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        norm
    } else {
        EPSILON_NORM
    }
}

pub fn build_index(drafts: Vec<ChunkDraft>) -> TfIdfIndex {
    let mut vocabulary = BTreeSet::new();
    let mut counted = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let terms = tokenize(&draft.text);
        let token_count = terms.len();
        let term_frequency = term_counts(&terms);
        vocabulary.extend(term_frequency.keys().cloned());
        counted.push((draft, term_frequency, token_count));
    }

    let total = counted.len();
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for (_, term_frequency, _) in &counted {
        for term in term_frequency.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let idf: HashMap<String, f64> = vocabulary
        .iter()
        .map(|term| {
            let df = document_frequency.get(term.as_str()).copied().unwrap_or(0);
            (term.clone(), smoothed_idf(total, df))
        })
        .collect();

    let chunks = counted
        .into_iter()
        .map(|(draft, term_frequency, token_count)| {
            let vector: BTreeMap<String, f64> = term_frequency
                .iter()
                .map(|(term, count)| {
                    let term_idf = idf.get(term).copied().unwrap_or_default();
                    let weight = (*count as f64 / token_count as f64) * term_idf;
                    (term.clone(), weight)
                })
                .collect();
            let norm = vector_norm(vector.values());

            Chunk {
                id: draft.id,
                text: draft.text,
                source_name: draft.source_name,
                page_number: draft.page_number,
                term_frequency,
                token_count,
                vector,
                norm,
            }
        })
        .collect();

    TfIdfIndex {
        chunks,
        vocabulary,
        idf,
    }
}
