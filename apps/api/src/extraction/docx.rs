//! DOCX text extraction.
//!
//! A DOCX file is a ZIP package; the body lives in `word/document.xml`.
//! Only paragraphs that are direct children of `w:body` are collected.
//! Table cells, content controls (`w:sdt`), text boxes and tab-stop
//! definitions contribute nothing.

use std::io::{BufReader, Cursor, Read};

use tracing::debug;
use xml::reader::{EventReader, XmlEvent};
use zip::ZipArchive;

use crate::extraction::models::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of the document part.
const MAX_DOCUMENT_PART_BYTES: u64 = 64 * 1024 * 1024;

/// Extracts paragraph text in document order, joined with `\n`.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    extract_with_limit(bytes, MAX_DOCUMENT_PART_BYTES)
}

fn extract_with_limit(bytes: &[u8], limit: u64) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(ExtractError::docx)?;
    let part = archive.by_name(DOCUMENT_PART).map_err(ExtractError::docx)?;

    if part.size() > limit {
        return Err(ExtractError::docx(format!(
            "{DOCUMENT_PART} expands to {} bytes, over the {limit} byte limit",
            part.size()
        )));
    }

    // The declared size comes from the archive header, so the stream is capped too.
    // An overrun truncates the XML and surfaces as a parse error.
    let paragraphs = collect_paragraphs(BufReader::new(part.take(limit)))?;
    debug!(paragraph_count = paragraphs.len(), "DOCX paragraphs extracted");

    Ok(paragraphs.join("\n"))
}

fn collect_paragraphs<R: Read>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut open: Vec<String> = Vec::new();
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    for event in EventReader::new(source) {
        match event.map_err(ExtractError::docx)? {
            XmlEvent::StartElement { name, .. } => {
                let own_run = run_depth > 0 && paragraph_depth == 1;
                match name.local_name.as_str() {
                    "p" => {
                        if open.last().is_some_and(|parent| parent == "body") {
                            current = Some(String::new());
                        }
                        paragraph_depth += 1;
                    }
                    "r" => run_depth += 1,
                    "t" => in_text = true,
                    "tab" if own_run => push_to(&mut current, "\t"),
                    "br" | "cr" if own_run => push_to(&mut current, "\n"),
                    _ => {}
                }
                open.push(name.local_name);
            }
            XmlEvent::EndElement { name } => {
                open.pop();
                match name.local_name.as_str() {
                    "p" => {
                        paragraph_depth = paragraph_depth.saturating_sub(1);
                        if paragraph_depth == 0 {
                            if let Some(paragraph) = current.take() {
                                paragraphs.push(paragraph);
                            }
                        }
                    }
                    "r" => run_depth = run_depth.saturating_sub(1),
                    "t" => in_text = false,
                    _ => {}
                }
            }
            // Text of a paragraph nested inside a body paragraph (text boxes) is dropped.
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text)
                if in_text && paragraph_depth == 1 =>
            {
                push_to(&mut current, &text)
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_to(paragraph: &mut Option<String>, text: &str) {
    if let Some(p) = paragraph.as_mut() {
        p.push_str(text);
    }
}
