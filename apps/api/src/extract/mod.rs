//! Plain-text extraction from uploaded review files.
//!
//! Supported: `.txt` / `.csv` (or any `text/*` upload) decoded as lossy UTF-8, and `.docx`
//! whose `word/document.xml` paragraphs are joined with newlines.

pub mod handlers;

use std::io::{Cursor, Read};

use thiserror::Error;
use zip::ZipArchive;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Invalid .docx file: {0}")]
    InvalidDocx(String),

    #[error("Multipart field 'file' is required")]
    MissingFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    PlainText,
    Docx,
}

fn classify(filename: &str, content_type: Option<&str>) -> Option<UploadKind> {
    let name = filename.to_ascii_lowercase();
    if name.ends_with(".docx") {
        return Some(UploadKind::Docx);
    }
    if name.ends_with(".txt") || name.ends_with(".csv") {
        return Some(UploadKind::PlainText);
    }
    match content_type.map(|ct| ct.to_ascii_lowercase()) {
        Some(ct) if ct.starts_with(DOCX_MIME) => Some(UploadKind::Docx),
        Some(ct) if ct.starts_with("text/") => Some(UploadKind::PlainText),
        _ => None,
    }
}

/// Extracts the text content of one uploaded file.
pub fn extract_text(
    filename: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, ExtractError> {
    match classify(filename, content_type) {
        Some(UploadKind::PlainText) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Some(UploadKind::Docx) => Ok(docx_paragraphs(bytes)?.join("\n")),
        None => Err(ExtractError::UnsupportedType(filename.to_string())),
    }
}

/// Non-empty paragraph texts of a .docx package, in document order.
pub fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::InvalidDocx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::InvalidDocx(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::InvalidDocx(e.to_string()))?;

    Ok(xml
        .split("</w:p>")
        .map(paragraph_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

/// Concatenates the `<w:t>` runs of one paragraph fragment.
fn paragraph_text(fragment: &str) -> String {
    let mut text = String::new();
    let mut rest = fragment;

    while let Some(start) = rest.find("<w:t") {
        rest = &rest[start + "<w:t".len()..];
        // Skip <w:tab/>, <w:tbl>, <w:tc> and friends.
        if !rest.starts_with('>') && !rest.starts_with(' ') && !rest.starts_with('/') {
            continue;
        }
        let Some(tag_end) = rest.find('>') else { break };
        if rest[..tag_end].ends_with('/') {
            rest = &rest[tag_end + 1..];
            continue;
        }
        rest = &rest[tag_end + 1..];
        let Some(close) = rest.find("</w:t>") else { break };
        text.push_str(&html_escape::decode_html_entities(&rest[..close]));
        rest = &rest[close + "</w:t>".len()..];
    }

    text
}
