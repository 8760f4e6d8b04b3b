pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{handle_login, require_access_key};
use crate::extraction::handlers::handle_extract;
use crate::state::AppState;
use crate::tools::handlers::{handle_preview_prompt, handle_run_tool};

pub fn build_router(state: AppState) -> Router {
    // Everything here requires the shared secret in `x-access-key`.
    let protected = Router::new()
        .route("/api/v1/extract", post(handle_extract))
        .route("/api/v1/tools/prompt", post(handle_preview_prompt))
        .route("/api/v1/tools/run", post(handle_run_tool))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_key,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/login", post(handle_login))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::ACCESS_KEY_HEADER;
    use crate::config::Config;
    use crate::extraction::docx::tests::{build_docx, paragraph};
    use crate::extraction::models::{MIME_DOCX, MIME_PDF};
    use crate::extraction::pdf::tests::build_pdf;
    use crate::llm_client::{CompletionService, LlmError};

    const SECRET: &str = "letmein";
    const BOUNDARY: &str = "kirohub-test-boundary";

    struct EchoCompletion;

    #[async_trait]
    impl CompletionService for EchoCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionService for FailingCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            })
        }
    }

    fn app_with(llm: Arc<dyn CompletionService>) -> Router {
        build_router(AppState {
            llm,
            config: Config {
                google_api_key: "test-api-key".to_string(),
                access_password: SECRET.to_string(),
                port: 0,
                max_upload_bytes: 1024 * 1024,
                rust_log: "info".to_string(),
            },
        })
    }

    fn app() -> Router {
        app_with(Arc::new(EchoCompletion))
    }

    fn json_post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(ACCESS_KEY_HEADER, SECRET)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_post(content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"upload\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(ACCESS_KEY_HEADER, SECRET)
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "kirohub-api");
    }

    #[tokio::test]
    async fn test_login_accepts_shared_secret() {
        let response = app()
            .oneshot(json_post("/api/v1/login", json!({ "password": SECRET })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let response = app()
            .oneshot(json_post("/api/v1/login", json!({ "password": "guess" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tools_require_access_key() {
        let request = Request::post("/api/v1/tools/prompt")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "tool": "schedule_summary", "schedule_text": "Buy groceries" }).to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_preview_returns_rendered_prompt() {
        let response = app()
            .oneshot(json_post(
                "/api/v1/tools/prompt",
                json!({ "tool": "grammar_style_fix", "resume_text": "I is a developer." }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["tool"], "grammar_style_fix");
        assert_eq!(
            body["prompt"],
            "Check and fix grammar and style for this resume text:\n\nI is a developer."
        );
    }

    #[tokio::test]
    async fn test_run_returns_model_output_with_heading() {
        let response = app()
            .oneshot(json_post(
                "/api/v1/tools/run",
                json!({ "tool": "rewrite_content", "content": "thanks, John", "tone": "Friendly" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["heading"], "Rewritten Content");
        let output = body["output"].as_str().unwrap();
        assert!(output.starts_with("echo: Rewrite the following content in a Friendly tone:"));
        assert!(output.contains("thanks, John"));
    }

    #[tokio::test]
    async fn test_run_rejects_blank_fields_before_calling_model() {
        let response = app_with(Arc::new(FailingCompletion))
            .oneshot(json_post(
                "/api/v1/tools/run",
                json!({ "tool": "resume_suggestions", "resume_text": "Rust dev", "job_description": "  " }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Both fields are required.");
    }

    #[tokio::test]
    async fn test_run_masks_completion_failure() {
        let response = app_with(Arc::new(FailingCompletion))
            .oneshot(json_post(
                "/api/v1/tools/run",
                json!({ "tool": "commit_and_issue", "task_description": "Add CI" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(!body.to_string().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_extract_plain_text_upload() {
        let response = app()
            .oneshot(multipart_post("text/plain", "Rust engineer, 5 years".as_bytes()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "Rust engineer, 5 years");
        assert!(body["issue"].is_null());
    }

    #[tokio::test]
    async fn test_extract_docx_upload() {
        let docx = build_docx(&format!("{}{}", paragraph("Hello"), paragraph("World")));
        let response = app().oneshot(multipart_post(MIME_DOCX, &docx)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["text"], "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_extract_pdf_upload() {
        let pdf = build_pdf(&["Page One", "Page Two"]);
        let response = app().oneshot(multipart_post(MIME_PDF, &pdf)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "Page One\nPage Two\n");
        assert!(body["issue"].is_null());
    }

    #[tokio::test]
    async fn test_extract_corrupt_pdf_reports_parse_error() {
        let response = app()
            .oneshot(multipart_post(MIME_PDF, b"%PDF-1.4 truncated"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "");
        assert_eq!(body["issue"]["severity"], "error");
        assert_eq!(body["issue"]["code"], "PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_extract_unsupported_type_reports_warning() {
        let response = app()
            .oneshot(multipart_post("image/png", &[0x89, 0x50, 0x4e, 0x47]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "");
        assert_eq!(body["issue"]["severity"], "warning");
        assert_eq!(body["issue"]["code"], "UNSUPPORTED_TYPE");
    }

    #[tokio::test]
    async fn test_extract_invalid_utf8_reports_error() {
        let response = app()
            .oneshot(multipart_post("text/plain", &[0xff, 0xfe, 0xfd]))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["text"], "");
        assert_eq!(body["issue"]["severity"], "error");
        assert_eq!(body["issue"]["code"], "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_extract_without_file_field_is_empty() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhi\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::post("/api/v1/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(ACCESS_KEY_HEADER, SECRET)
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "");
        assert!(body["issue"].is_null());
    }
}
