use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::extraction::models::{ExtractionNotice, MediaType, UploadedDocument};

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub issue: Option<ExtractionNotice>,
}

/// POST /api/v1/extract
///
/// Returns 200 with the extracted text whenever the multipart body is readable.
/// Decode and parse failures are reported in `issue`, not as an HTTP error.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let document = read_upload(&mut multipart).await?;

    let extraction = tokio::task::spawn_blocking(move || extract_text(document.as_ref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;

    info!(
        chars = extraction.text.len(),
        has_issue = extraction.issue.is_some(),
        "Upload extracted"
    );

    Ok(Json(ExtractResponse {
        issue: extraction.issue.as_ref().map(ExtractionNotice::from),
        text: extraction.text,
    }))
}

/// Reads the first `file` field. A body without one is an absent document.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedDocument>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let media_type =
            MediaType::from_mime(field.content_type().unwrap_or("application/octet-stream"));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(Some(UploadedDocument::new(media_type, bytes)));
    }

    Ok(None)
}
