use crate::chunking::build_page_chunks;
use crate::extractor::{is_supported, PageExtractor};
use crate::index::build_index;
use crate::models::{Document, IngestionOptions, Page};
use crate::store::Corpus;
use crate::IngestError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub fn discover_documents(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if entry.file_type().is_file() && is_supported(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

/// Expands folders into the supported documents they contain; files are
/// kept as given.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .flat_map(|input| {
            if input.is_dir() {
                discover_documents(input)
            } else {
                vec![input.clone()]
            }
        })
        .collect()
}

/// SHA-256 over the extracted page texts, so re-extracting the same
/// document yields the same fingerprint whatever the extractor.
pub fn content_checksum(pages: &[Page]) -> String {
    let mut hasher = Sha256::new();
    for page in pages {
        hasher.update(page.number.to_le_bytes());
        hasher.update(page.text.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

pub struct ProcessingReport {
    pub corpus: Corpus,
    pub skipped_files: Vec<SkippedDocument>,
}

/// Extracts, chunks and indexes `paths` into a brand new corpus. Files that
/// cannot be read are skipped and reported; they never abort the run.
pub fn process_documents<E: PageExtractor>(
    paths: &[PathBuf],
    options: &IngestionOptions,
    extractor: &E,
) -> Result<ProcessingReport, IngestError> {
    if paths.is_empty() {
        return Err(IngestError::NoInputSelected);
    }

    let mut documents = Vec::new();
    let mut drafts = Vec::new();
    let mut skipped_files = Vec::new();
    let mut cursor = 0u64;

    for path in paths {
        let document = match load_document(path, extractor) {
            Ok(document) => document,
            Err(error) => {
                warn!(path = %path.display(), reason = %error, "skipped document");
                skipped_files.push(SkippedDocument {
                    path: path.clone(),
                    reason: error.to_string(),
                });
                continue;
            }
        };

        for page in &document.pages {
            let (page_chunks, next_cursor) =
                build_page_chunks(&document.name, page, options, cursor);
            cursor = next_cursor;
            drafts.extend(page_chunks);
        }

        debug!(document = %document.name, pages = document.pages.len(), "document extracted");
        documents.push(document);
    }

    let index = build_index(drafts);
    let corpus = Corpus::new(documents, index);
    let stats = corpus.stats();
    info!(
        build_id = %corpus.build_id,
        documents = stats.documents,
        chunks = stats.chunks,
        vocabulary = stats.vocabulary,
        "index built"
    );

    Ok(ProcessingReport {
        corpus,
        skipped_files,
    })
}

fn load_document<E: PageExtractor>(path: &Path, extractor: &E) -> Result<Document, IngestError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            IngestError::MissingFileName(format!("path missing filename: {}", path.display()))
        })?
        .to_string();
    let pages = extractor.extract_pages(path)?;

    Ok(Document {
        name,
        source_path: path.to_string_lossy().to_string(),
        checksum: content_checksum(&pages),
        pages,
    })
}
