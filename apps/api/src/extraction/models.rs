use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Declared content type of an upload. Selects the extraction path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Pdf,
    Docx,
    Other(String),
}

impl MediaType {
    /// Maps a declared MIME type to a `MediaType`.
    /// Parameters such as `; charset=utf-8` and letter case are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            MIME_PLAIN_TEXT => MediaType::PlainText,
            MIME_PDF => MediaType::Pdf,
            MIME_DOCX => MediaType::Docx,
            _ => MediaType::Other(mime.to_string()),
        }
    }
}

/// A single uploaded file, consumed once by `extract_text`.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub media_type: MediaType,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(media_type: MediaType, bytes: impl Into<Bytes>) -> Self {
        Self {
            media_type,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Recoverable extraction failure. Reported alongside an empty result,
/// never returned as `Err` from `extract_text`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Error reading TXT file: {0}")]
    Decode(String),

    #[error("Error reading {format}: {reason}")]
    Parse {
        format: &'static str,
        reason: String,
    },

    #[error("Unsupported file type. Please upload PDF, DOCX, or TXT.")]
    UnsupportedType(String),
}

impl ExtractError {
    pub fn severity(&self) -> Severity {
        match self {
            ExtractError::UnsupportedType(_) => Severity::Warning,
            ExtractError::Decode(_) | ExtractError::Parse { .. } => Severity::Error,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::Decode(_) => "DECODE_ERROR",
            ExtractError::Parse { .. } => "PARSE_ERROR",
            ExtractError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
        }
    }

    pub(crate) fn pdf(reason: impl ToString) -> Self {
        ExtractError::Parse {
            format: "PDF",
            reason: reason.to_string(),
        }
    }

    pub(crate) fn docx(reason: impl ToString) -> Self {
        ExtractError::Parse {
            format: "DOCX",
            reason: reason.to_string(),
        }
    }
}

/// Wire form of an `ExtractError`, shown to the user by the front end.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionNotice {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

impl From<&ExtractError> for ExtractionNotice {
    fn from(err: &ExtractError) -> Self {
        Self {
            severity: err.severity(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result of one extraction: always usable text, plus an optional report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub issue: Option<ExtractError>,
}

impl Extraction {
    pub fn text(text: String) -> Self {
        Self { text, issue: None }
    }

    pub fn failed(issue: ExtractError) -> Self {
        Self {
            text: String::new(),
            issue: Some(issue),
        }
    }
}
