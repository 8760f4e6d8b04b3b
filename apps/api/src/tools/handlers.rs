//! Axum route handlers for the tool API.
//!
//! One binding serves every tool: validate the request, render its prompt,
//! and (for `/run`) hand the prompt to the completion service.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::tools::PromptRequest;

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub tool: &'static str,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ToolRunResponse {
    pub tool: &'static str,
    pub heading: &'static str,
    pub output: String,
}

/// POST /api/v1/tools/prompt
///
/// Returns the rendered prompt without calling the model.
pub async fn handle_preview_prompt(
    Json(request): Json<PromptRequest>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    request.validate()?;

    Ok(Json(PromptPreviewResponse {
        tool: request.tool(),
        prompt: request.render(),
    }))
}

/// POST /api/v1/tools/run
///
/// Renders the tool prompt and returns the completion service's raw text.
pub async fn handle_run_tool(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<ToolRunResponse>, AppError> {
    request.validate()?;

    let prompt = request.render();
    info!(tool = request.tool(), prompt_chars = prompt.len(), "Running tool");

    let output = state.llm.complete(&prompt).await?;

    Ok(Json(ToolRunResponse {
        tool: request.tool(),
        heading: request.heading(),
        output,
    }))
}
