use crate::chunking::normalize_whitespace;
use crate::error::IngestError;
use crate::models::Page;
use lopdf::Document;
use std::path::Path;
use tracing::warn;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "md", "text"];

const FORM_FEED: char = '\u{000C}';

/// Turns one source document into its pages, in order and numbered from 1.
/// A page that fails to extract is returned with empty text.
pub trait PageExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, IngestError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PageExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, IngestError> {
        let document =
            Document::load(path).map_err(|error| IngestError::PdfParse(error.to_string()))?;

        let pages = document
            .get_pages()
            .into_keys()
            .map(|page_no| match document.extract_text(&[page_no]) {
                Ok(text) => Page {
                    number: page_no,
                    text: normalize_whitespace(&text),
                },
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        page = page_no,
                        %error,
                        "page text extraction failed"
                    );
                    Page {
                        number: page_no,
                        text: String::new(),
                    }
                }
            })
            .collect();

        Ok(pages)
    }
}

/// Plain text files; form feeds separate pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn pages_from_text(raw: &str) -> Vec<Page> {
        raw.split(FORM_FEED)
            .enumerate()
            .map(|(index, text)| Page {
                number: (index + 1) as u32,
                text: normalize_whitespace(text),
            })
            .collect()
    }
}

impl PageExtractor for PlainTextExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, IngestError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::pages_from_text(&String::from_utf8_lossy(&bytes)))
    }
}

/// Picks an extractor from the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor {
    pdf: LopdfExtractor,
    text: PlainTextExtractor,
}

impl PageExtractor for DocumentExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Page>, IngestError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => self.pdf.extract_pages(path),
            "txt" | "md" | "text" => self.text.extract_pages(path),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

pub fn extract_pages(path: &Path) -> Result<Vec<Page>, IngestError> {
    DocumentExtractor::default().extract_pages(path)
}
