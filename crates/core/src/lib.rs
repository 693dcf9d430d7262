pub mod answer;
pub mod chunking;
pub mod error;
pub mod extractor;
pub mod index;
pub mod ingest;
pub mod models;
pub mod orchestrator;
pub mod query;
pub mod store;
pub mod tokenizer;
pub mod traits;

pub use answer::{
    extractive_answer, AnswerContext, AnswerEndpointConfig, AnswerRequest, RemoteAnswerClient,
};
pub use chunking::{
    build_page_chunks, normalize_whitespace, resolve_words_per_chunk, split_to_chunks,
};
pub use error::{AnswerError, IngestError, SearchError};
pub use extractor::{
    extract_pages, DocumentExtractor, LopdfExtractor, PageExtractor, PlainTextExtractor,
};
pub use index::{build_index, TfIdfIndex, EPSILON_NORM};
pub use ingest::{
    discover_documents, expand_inputs, process_documents, ProcessingReport, SkippedDocument,
};
pub use models::{
    Answer, AnswerOrigin, Chunk, ChunkDraft, Document, IngestionOptions, Page, SearchHit,
    SearchQuery, SearchResult, DEFAULT_MIN_PAGE_CHARS, DEFAULT_TOP_K, DEFAULT_WORDS_PER_CHUNK,
};
pub use orchestrator::{ProcessingSummary, StudyCoordinator};
pub use query::{search, QueryVector};
pub use store::{Corpus, CorpusStats, CorpusStore};
pub use tokenizer::tokenize;
pub use traits::AnswerService;
