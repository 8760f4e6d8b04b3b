// Document text extraction: plain text, PDF and DOCX uploads into one string.
// Failures never escape `extract_text`; they come back as an `Extraction::issue`.

pub mod docx;
pub mod handlers;
pub mod models;
pub mod pdf;

use tracing::warn;

use crate::extraction::docx::extract_docx_text;
use crate::extraction::models::{ExtractError, Extraction, MediaType, UploadedDocument};
use crate::extraction::pdf::extract_pdf_text;

/// Converts one uploaded document into plain text.
///
/// An absent document yields empty text with no issue. Every failure path
/// yields empty text plus the reported condition.
pub fn extract_text(doc: Option<&UploadedDocument>) -> Extraction {
    let Some(doc) = doc else {
        return Extraction::default();
    };

    let result = match &doc.media_type {
        MediaType::PlainText => {
            String::from_utf8(doc.bytes.to_vec()).map_err(|e| ExtractError::Decode(e.to_string()))
        }
        MediaType::Pdf => extract_pdf_text(&doc.bytes),
        MediaType::Docx => extract_docx_text(&doc.bytes),
        MediaType::Other(declared) => Err(ExtractError::UnsupportedType(declared.clone())),
    };

    match result {
        Ok(text) => Extraction::text(text),
        Err(issue) => {
            warn!(
                code = issue.code(),
                media_type = ?doc.media_type,
                "Extraction failed: {issue}"
            );
            Extraction::failed(issue)
        }
    }
}
