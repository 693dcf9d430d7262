use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no documents selected")]
    NoInputSelected,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("index not built: process documents before asking questions")]
    IndexNotBuilt,
}

/// Failure talking to the remote answer service. Never surfaced as a hard
/// failure by the coordinator: it degrades to the extractive answer.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("answer service response has no non-empty `answer` field")]
    MissingAnswer,

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}
