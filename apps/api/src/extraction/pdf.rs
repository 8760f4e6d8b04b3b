//! PDF text extraction.
//!
//! Wraps `pdf-extract`, which can panic on malformed streams. The panic is
//! caught here and reported as a parse error like any other failure.

use std::any::Any;
use std::panic;

use tracing::debug;

use crate::extraction::models::ExtractError;

/// Extracts the text of every page in document order.
/// Each page contributes its text followed by a newline.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|payload| ExtractError::pdf(panic_reason(payload.as_ref())))?
        .map_err(ExtractError::pdf)?;

    debug!(page_count = pages.len(), "PDF pages extracted");

    Ok(join_pages(&pages))
}

/// Concatenates page texts, terminating each with `\n`.
/// A page without extractable text becomes an empty line.
///
/// `pdf-extract` opens every page with the page-break newlines it emits
/// before the first text object; those are dropped so each page starts at
/// its first line of text.
fn join_pages(pages: &[String]) -> String {
    let capacity = pages.iter().map(|p| p.len() + 1).sum();
    pages
        .iter()
        .fold(String::with_capacity(capacity), |mut text, page| {
            text.push_str(page.trim_start_matches('\n'));
            text.push('\n');
            text
        })
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "PDF parser aborted".to_string()
    }
}
