//! Axum route handler for report downloads.

use axum::{
    extract::Path,
    http::header,
    response::IntoResponse,
};
use bytes::Bytes;
use chrono::Local;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::errors::{run_blocking, AppError, AppJson};
use crate::render::{download_filename, render_report, ReportFormat};

/// POST /api/reports/:format
///
/// Renders the posted result as an `html` or `docx` attachment dated today.
pub async fn handle_render_report(
    Path(format): Path<String>,
    AppJson(result): AppJson<AnalysisResult>,
) -> Result<impl IntoResponse, AppError> {
    let format: ReportFormat = format.parse().map_err(AppError::Validation)?;
    let today = Local::now().date_naive();

    let filename = download_filename(&result.product, today, format);
    let product = result.product.clone();
    let body = run_blocking("report rendering", move || {
        render_report(&result, format, today)
    })
    .await??;

    info!(
        "Report rendered: format={}, product={}, bytes={}",
        format.extension(),
        product,
        body.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        Bytes::from(body),
    ))
}

/// `attachment` with an ASCII fallback name plus the RFC 5987 UTF-8 form.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .filter(|c| *c != '"' && *c != '\\')
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_carries_utf8_name() {
        let value = content_disposition("폰_리뷰분석_20261019.html");
        assert_eq!(
            value,
            "attachment; filename=\"_______20261019.html\"; filename*=UTF-8''%ED%8F%B0_%EB%A6%AC%EB%B7%B0%EB%B6%84%EC%84%9D_20261019.html"
        );
    }

    #[test]
    fn test_content_disposition_is_a_valid_header() {
        let value = content_disposition("갤럭시 \"S24\"_리뷰분석_20261019.docx");
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }
}
