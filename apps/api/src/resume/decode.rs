//! Document decoding: turns an uploaded file into plain resume text.
//!
//! Pluggable via the `TextDecoder` trait; `AppState` carries an `Arc<dyn TextDecoder>`.
//! The default `ContainerDecoder` handles PDF (via `pdf-extract`), Word (via `docx-rs`)
//! and plain text.

use std::path::Path;

use async_trait::async_trait;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::debug;

/// Decoded document content: an ordered, immutable sequence of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeText {
    lines: Vec<String>,
}

impl ResumeText {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Unsupported file type '{0}' (expected .pdf, .docx, .txt or .md)")]
    UnsupportedFormat(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("Decoder task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

fn detect_format(file_name: &str) -> Result<DocumentFormat, DecodeError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => Ok(DocumentFormat::Pdf),
        "docx" => Ok(DocumentFormat::Docx),
        "txt" | "md" => Ok(DocumentFormat::PlainText),
        other => Err(DecodeError::UnsupportedFormat(other.to_string())),
    }
}

/// The decoder trait. Implement this to support more container formats.
#[async_trait]
pub trait TextDecoder: Send + Sync {
    async fn decode(&self, file_name: &str, bytes: Vec<u8>) -> Result<ResumeText, DecodeError>;
}

/// Decodes a PDF or UTF-8 text upload into lines.
pub async fn decode_document(file_name: &str, bytes: Vec<u8>) -> Result<ResumeText, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = detect_format(file_name)?;
    debug!(file_name, ?format, size = bytes.len(), "Decoding uploaded document");

    let text = match format {
        DocumentFormat::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        // pdf-extract is CPU-bound; keep it off the async workers
        DocumentFormat::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| DecodeError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| DecodeError::Task(e.to_string()))??,
        DocumentFormat::Docx => tokio::task::spawn_blocking(move || docx_paragraphs(&bytes))
            .await
            .map_err(|e| DecodeError::Task(e.to_string()))??,
    };

    Ok(ResumeText::from_text(&text))
}

/// Top-level paragraph text, one paragraph per line. Tables and headers are skipped.
fn docx_paragraphs(bytes: &[u8]) -> Result<String, DecodeError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DecodeError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        let ParagraphChild::Run(run) = child else { continue };
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                _ => {}
            }
        }
    }
    text
}

/// Default decoder: PDF, DOCX and UTF-8 text.
pub struct ContainerDecoder;

#[async_trait]
impl TextDecoder for ContainerDecoder {
    async fn decode(&self, file_name: &str, bytes: Vec<u8>) -> Result<ResumeText, DecodeError> {
        decode_document(file_name, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_by_extension() {
        assert_eq!(detect_format("cv.PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(detect_format("cv.txt").unwrap(), DocumentFormat::PlainText);
        assert_eq!(detect_format("notes.md").unwrap(), DocumentFormat::PlainText);
        assert_eq!(detect_format("cv.DOCX").unwrap(), DocumentFormat::Docx);
    }

    #[test]
    fn test_detect_format_rejects_unknown() {
        let err = detect_format("cv.xlsx").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(ref e) if e == "xlsx"));
        assert!(matches!(detect_format("resume"), Err(DecodeError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_plain_text_decodes_lines() {
        let text = ContainerDecoder
            .decode("cv.txt", b"Skills\nRust\r\nGo".to_vec())
            .await
            .unwrap();
        assert_eq!(text.lines(), &["Skills", "Rust", "Go"]);
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let err = ContainerDecoder.decode("cv.txt", Vec::new()).await.unwrap_err();
        assert!(matches!(err, DecodeError::Empty));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_reports_error() {
        let err = ContainerDecoder
            .decode("cv.pdf", b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::Pdf(_) | DecodeError::Task(_)));
    }

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        use docx_rs::{Docx, Run};

        let docx = paragraphs.iter().fold(Docx::new(), |doc, text| {
            doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
        });
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[tokio::test]
    async fn test_docx_paragraphs_become_lines() {
        let bytes = build_docx(&["Jane Doe", "Skills", "Rust, Go", "Experience", "Acme"]);
        let text = ContainerDecoder.decode("resume.docx", bytes).await.unwrap();
        assert_eq!(text.lines(), &["Jane Doe", "Skills", "Rust, Go", "Experience", "Acme"]);
    }

    #[tokio::test]
    async fn test_docx_feeds_section_extraction() {
        use crate::resume::sections::{extract_sections, SectionKind};

        let bytes = build_docx(&["Technical Skills", "Rust", "Projects", "Compiler"]);
        let text = decode_document("cv.docx", bytes).await.unwrap();
        let outcome = extract_sections(&text.joined());
        let map = outcome.sections().unwrap();
        assert_eq!(map.get(SectionKind::Skills), Some("Rust"));
        assert_eq!(map.get(SectionKind::Projects), Some("Compiler"));
    }

    #[tokio::test]
    async fn test_corrupt_docx_reports_error() {
        let err = ContainerDecoder
            .decode("cv.docx", b"PK not really a zip".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::Docx(_)));
    }
}
