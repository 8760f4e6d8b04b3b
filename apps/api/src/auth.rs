//! Shared-secret access gate.
//!
//! There are no accounts: a caller is "logged in" when it presents the single
//! configured secret. `/api/v1/login` lets a front end check a password
//! before storing it; every other API route expects it in `x-access-key`.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;

pub const ACCESS_KEY_HEADER: &str = "x-access-key";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// POST /api/v1/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<StatusCode, AppError> {
    if !secret_matches(Some(&req.password), &state.config.access_password) {
        warn!("Login rejected: wrong password");
        return Err(AppError::Unauthorized);
    }
    info!("Login accepted");
    Ok(StatusCode::NO_CONTENT)
}

/// Middleware rejecting requests without the shared secret.
pub async fn require_access_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get(ACCESS_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if !secret_matches(provided, &state.config.access_password) {
        warn!(path = %request.uri().path(), "Rejected request without valid access key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

fn secret_matches(provided: Option<&str>, secret: &str) -> bool {
    matches!(provided, Some(p) if !secret.is_empty() && ct_eq(p.as_bytes(), secret.as_bytes()))
}

/// Constant-time byte comparison; only the length is allowed to short-circuit.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}
