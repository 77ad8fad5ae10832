pub mod docx;
pub mod handlers;
pub mod html;
pub mod outline;

use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::analysis::models::AnalysisResult;
use crate::render::outline::ReportOutline;

const FILE_LABEL: &str = "리뷰분석";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Document packaging failed: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("Document write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Output formats a report can be downloaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Docx,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Docx => "docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Html => "text/html; charset=utf-8",
            ReportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "docx" => Ok(ReportFormat::Docx),
            other => Err(format!(
                "Unsupported report format '{other}'. Use 'html' or 'docx'."
            )),
        }
    }
}

/// Self-contained HTML report for the result.
pub fn render_hypertext(result: &AnalysisResult, generated_on: NaiveDate) -> String {
    html::render_html(&ReportOutline::from_result(result, generated_on))
}

/// Word-processing (.docx) report for the result.
pub fn render_document(
    result: &AnalysisResult,
    generated_on: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    docx::render_docx(&ReportOutline::from_result(result, generated_on))
}

pub fn render_report(
    result: &AnalysisResult,
    format: ReportFormat,
    generated_on: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    match format {
        ReportFormat::Html => Ok(render_hypertext(result, generated_on).into_bytes()),
        ReportFormat::Docx => render_document(result, generated_on),
    }
}

/// `{product}_리뷰분석_{YYYYMMDD}.{ext}` with file-name-hostile characters replaced.
pub fn download_filename(product: &str, generated_on: NaiveDate, format: ReportFormat) -> String {
    let product: String = product
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!(
        "{product}_{FILE_LABEL}_{}.{}",
        generated_on.format("%Y%m%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::outline::tests::{generated_on, sample_result};

    #[test]
    fn test_format_parsing() {
        assert_eq!("html".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("DOCX".parse::<ReportFormat>(), Ok(ReportFormat::Docx));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_filename_uses_product_label_and_date() {
        assert_eq!(
            download_filename("갤럭시 S24", generated_on(), ReportFormat::Docx),
            "갤럭시 S24_리뷰분석_20261019.docx"
        );
    }

    #[test]
    fn test_filename_replaces_illegal_characters() {
        assert_eq!(
            download_filename("a/b:c*d?\"e<f>g|h\\i\n", generated_on(), ReportFormat::Html),
            "a_b_c_d__e_f_g_h_i_리뷰분석_20261019.html"
        );
    }

    #[test]
    fn test_render_report_dispatches_by_format() {
        let result = sample_result();
        let html = render_report(&result, ReportFormat::Html, generated_on()).unwrap();
        assert!(html.starts_with(b"<!DOCTYPE html>"));

        let docx = render_report(&result, ReportFormat::Docx, generated_on()).unwrap();
        assert!(docx.starts_with(b"PK"));
    }
}
