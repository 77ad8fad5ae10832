use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::extract::ExtractError;
use crate::prompts::PromptError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt writes are disabled in this environment")]
    WriteDisabled,

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Model output rejected: {0}")]
    ModelOutput(#[from] AnalysisError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// `Json` extractor whose body rejections surface as `AppError::Validation`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Runs blocking file I/O or CPU-bound work off the async executor.
pub async fn run_blocking<T, F>(task: &'static str, f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {task}: {e}")))
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::WriteDisabled => AppError::WriteDisabled,
            PromptError::InvalidId(id) => {
                AppError::Validation(format!("Invalid prompt id '{id}'"))
            }
            PromptError::Storage(e) => AppError::Storage(e.to_string()),
            PromptError::Serialize(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedType(name) => AppError::UnsupportedMedia(name),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Internal(anyhow::anyhow!("Report rendering failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::WriteDisabled => (
                StatusCode::FORBIDDEN,
                "WRITE_DISABLED",
                "Prompt editing is disabled in production. Set the CUSTOM_PROMPT environment variable instead."
                    .to_string(),
            ),
            AppError::UnsupportedMedia(name) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                format!("Unsupported file: {name}. Upload a .txt, .csv or .docx file."),
            ),
            AppError::ModelOutput(e) => {
                tracing::error!("Model output rejected: {e}");
                let code = match e {
                    AnalysisError::Decode(_) => "DECODE_ERROR",
                    AnalysisError::CountMismatch { .. } => "COUNT_MISMATCH",
                };
                (StatusCode::BAD_GATEWAY, code, e.to_string())
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
