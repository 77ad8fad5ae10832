//! Axum route handler for review file uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract_text, ExtractError};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/extract
///
/// Reads the multipart field `file` and returns its plain-text content.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let text = extract_text(&filename, content_type.as_deref(), &data)?;
        info!(
            "File extracted: name={}, bytes={}, chars={}",
            filename,
            data.len(),
            text.chars().count()
        );
        return Ok(Json(ExtractResponse { text }));
    }

    Err(ExtractError::MissingFile.into())
}
