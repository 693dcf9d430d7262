use crate::answer::{extractive_answer, AnswerRequest};
use crate::extractor::{DocumentExtractor, PageExtractor};
use crate::ingest::{process_documents, SkippedDocument};
use crate::models::{Answer, AnswerOrigin, IngestionOptions, SearchQuery, DEFAULT_TOP_K};
use crate::query::search;
use crate::store::{Corpus, CorpusStats, CorpusStore};
use crate::traits::AnswerService;
use crate::{IngestError, SearchError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ProcessingSummary {
    pub stats: CorpusStats,
    pub skipped_files: Vec<SkippedDocument>,
}

/// Entry points for an interface layer: process documents, answer
/// questions, clear. Holds the only [`CorpusStore`].
pub struct StudyCoordinator<A, E = DocumentExtractor>
where
    A: AnswerService,
    E: PageExtractor,
{
    store: CorpusStore,
    options: IngestionOptions,
    extractor: E,
    answer_service: Option<A>,
    top_k: usize,
}

impl<A> StudyCoordinator<A, DocumentExtractor>
where
    A: AnswerService + Send + Sync,
{
    pub fn new(options: IngestionOptions, answer_service: Option<A>) -> Self {
        Self::with_extractor(options, DocumentExtractor::default(), answer_service)
    }
}

impl<A, E> StudyCoordinator<A, E>
where
    A: AnswerService + Send + Sync,
    E: PageExtractor,
{
    pub fn with_extractor(
        options: IngestionOptions,
        extractor: E,
        answer_service: Option<A>,
    ) -> Self {
        Self {
            store: CorpusStore::new(),
            options,
            extractor,
            answer_service,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Builds a new corpus off to the side and swaps it in once complete.
    pub fn process_documents(&self, paths: &[PathBuf]) -> Result<ProcessingSummary, IngestError> {
        let report = process_documents(paths, &self.options, &self.extractor)?;
        let corpus = self.store.replace_with(report.corpus);

        Ok(ProcessingSummary {
            stats: corpus.stats(),
            skipped_files: report.skipped_files,
        })
    }

    pub async fn answer_question(&self, question: &str) -> Result<Answer, SearchError> {
        let question = question.trim();
        let corpus = self.store.snapshot();
        let query = SearchQuery {
            text: question.to_string(),
            top_k: self.top_k,
        };
        let result = search(&corpus, &query)?;

        let Some(service) = &self.answer_service else {
            return Ok(Answer {
                question: question.to_string(),
                text: extractive_answer(&result.hits),
                origin: AnswerOrigin::Extractive,
                fallback_reason: None,
                hits: result.hits,
            });
        };

        let request = AnswerRequest::from_hits(question, &result.hits);
        match service.answer(&request).await {
            Ok(text) => {
                info!(
                    build_id = %corpus.build_id,
                    contexts = request.contexts.len(),
                    "answer service responded"
                );
                Ok(Answer {
                    question: question.to_string(),
                    text,
                    origin: AnswerOrigin::Remote,
                    fallback_reason: None,
                    hits: result.hits,
                })
            }
            Err(error) => {
                warn!(%error, "answer service failed, using extractive answer");
                Ok(Answer {
                    question: question.to_string(),
                    text: extractive_answer(&result.hits),
                    origin: AnswerOrigin::Extractive,
                    fallback_reason: Some(error.to_string()),
                    hits: result.hits,
                })
            }
        }
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn snapshot(&self) -> Arc<Corpus> {
        self.store.snapshot()
    }

    pub fn stats(&self) -> CorpusStats {
        self.store.snapshot().stats()
    }
}
