//! Text extraction from uploaded resume containers.
//!
//! Kind detection prefers the declared content type, then the file
//! extension, then magic bytes. Extracted text is normalized before it
//! reaches the model: CRLF and NUL stripped, lines right-trimmed.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read DOCX: {0}")]
    Docx(String),

    #[error("document contains no extractable text")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
}

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl FileKind {
    /// Detects the container kind, or `None` for unsupported uploads.
    pub fn detect(filename: &str, content_type: Option<&str>, data: &[u8]) -> Option<FileKind> {
        match content_type {
            Some("application/pdf") => return Some(FileKind::Pdf),
            Some(DOCX_MIME) => return Some(FileKind::Docx),
            Some("text/plain") => return Some(FileKind::Text),
            _ => {}
        }

        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => return Some(FileKind::Pdf),
            Some("docx") => return Some(FileKind::Docx),
            Some("txt") => return Some(FileKind::Text),
            _ => {}
        }

        if looks_like_pdf(data) {
            Some(FileKind::Pdf)
        } else if looks_like_docx(data) {
            Some(FileKind::Docx)
        } else {
            None
        }
    }
}

/// Extracts and normalizes the plain text of one resume document.
/// An empty result is a failure; the pipeline treats it as "skip this file".
pub fn extract_resume_text(kind: FileKind, data: &[u8]) -> Result<String, ExtractError> {
    let raw = match kind {
        FileKind::Pdf => extract_pdf_text(data)?,
        FileKind::Docx => extract_docx_text(data)?,
        FileKind::Text => String::from_utf8_lossy(data).into_owned(),
    };

    let text = normalize_text(&raw);
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(data).map_err(|err| ExtractError::Pdf(err.to_string()))
}

/// Walks document paragraphs and their runs. Tables and headers are skipped;
/// resume bodies live in plain paragraphs.
fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let package = read_docx(data).map_err(|err| ExtractError::Docx(err.to_string()))?;

    let mut lines = Vec::new();
    for child in &package.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            lines.push(line);
        }
    }
    Ok(lines.join("\n"))
}

fn normalize_text(text: &str) -> String {
    let cleaned = text
        .replace('\u{0000}', "")
        .trim_start_matches('\u{FEFF}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let lines: Vec<&str> = cleaned.lines().map(|line| line.trim_end()).collect();
    lines.join("\n").trim().to_string()
}

fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

fn looks_like_docx(data: &[u8]) -> bool {
    // DOCX is a zip container.
    data.len() > 4 && data.starts_with(b"PK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(
            FileKind::detect("resume", Some("application/pdf"), b""),
            Some(FileKind::Pdf)
        );
        assert_eq!(
            FileKind::detect("resume", Some(DOCX_MIME), b""),
            Some(FileKind::Docx)
        );
        assert_eq!(
            FileKind::detect("resume", Some("text/plain"), b""),
            Some(FileKind::Text)
        );
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(FileKind::detect("cv.PDF", None, b""), Some(FileKind::Pdf));
        assert_eq!(FileKind::detect("cv.docx", None, b""), Some(FileKind::Docx));
        assert_eq!(FileKind::detect("cv.txt", None, b""), Some(FileKind::Text));
    }

    #[test]
    fn test_detect_by_magic_bytes() {
        assert_eq!(
            FileKind::detect("upload", None, b"%PDF-1.7 rest"),
            Some(FileKind::Pdf)
        );
        assert_eq!(
            FileKind::detect("upload", None, b"PK\x03\x04zipdata"),
            Some(FileKind::Docx)
        );
        assert_eq!(FileKind::detect("upload", None, b"hello"), None);
    }

    #[test]
    fn test_octet_stream_falls_through_to_extension() {
        assert_eq!(
            FileKind::detect("cv.pdf", Some("application/octet-stream"), b""),
            Some(FileKind::Pdf)
        );
    }

    #[test]
    fn test_text_extraction_normalizes_line_endings() {
        let text = extract_resume_text(FileKind::Text, b"Ada Lovelace\r\nAnalyst  \r\n").unwrap();
        assert_eq!(text, "Ada Lovelace\nAnalyst");
    }

    #[test]
    fn test_empty_text_is_extraction_failure() {
        assert!(matches!(
            extract_resume_text(FileKind::Text, b"  \n \n"),
            Err(ExtractError::Empty)
        ));
    }

    #[test]
    fn test_normalize_strips_nul_and_bom() {
        assert_eq!(normalize_text("\u{FEFF}Ada\u{0000} Lovelace "), "Ada Lovelace");
    }
}
