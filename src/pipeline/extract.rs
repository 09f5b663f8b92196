//! Text extraction: turn uploaded document bytes into plain text.
//!
//! Dispatch is by file-name suffix only, never by content sniffing, so an
//! unsupported name is rejected before a single byte is looked at. PDF
//! parsing is CPU-bound and can panic on hostile input, so it runs inside
//! `spawn_blocking` where a panic surfaces as a `JoinError` instead of
//! taking down a Tokio worker.
//!
//! The extracted text is returned as the extractor produced it. Cleanup is
//! opt-in through [`crate::TranslationConfig::normalize_text`], since
//! zero-width joiners and similar characters carry meaning in Indic and
//! emoji text.

use crate::error::DocError;
use crate::output::ExtractedText;
use crate::pipeline::{docx, normalize};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// The document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Detect the format from a file name's suffix, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else if lower.ends_with(".txt") {
            Some(DocumentFormat::Text)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Text => "text",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extract the text of an uploaded document.
///
/// # Errors
/// - [`DocError::UnsupportedFormat`] — suffix is not `.pdf`, `.docx` or `.txt`
/// - [`DocError::ExtractionFailed`] — the PDF or DOCX could not be parsed
/// - [`DocError::EmptyDocument`] — nothing visible was recovered
pub async fn extract(bytes: &[u8], file_name: &str) -> Result<ExtractedText, DocError> {
    let format = DocumentFormat::from_file_name(file_name).ok_or_else(|| {
        DocError::UnsupportedFormat {
            file_name: file_name.to_string(),
        }
    })?;
    info!("Extracting {} text from '{}' ({} bytes)", format, file_name, bytes.len());

    let raw = match format {
        DocumentFormat::Pdf => extract_pdf(bytes.to_vec(), file_name).await?,
        DocumentFormat::Docx => {
            docx::extract_docx_text(bytes).map_err(|e| DocError::ExtractionFailed {
                format: format.label(),
                file_name: file_name.to_string(),
                detail: e.to_string(),
            })?
        }
        DocumentFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    if !normalize::has_visible_text(&raw) {
        return Err(DocError::EmptyDocument {
            file_name: file_name.to_string(),
        });
    }
    debug!("Extracted {} chars from '{}'", raw.chars().count(), file_name);

    Ok(ExtractedText {
        text: raw,
        file_name: file_name.to_string(),
        format,
    })
}

/// Run `pdf-extract` on the blocking pool.
async fn extract_pdf(bytes: Vec<u8>, file_name: &str) -> Result<String, DocError> {
    let failed = |detail: String| DocError::ExtractionFailed {
        format: DocumentFormat::Pdf.label(),
        file_name: file_name.to_string(),
        detail,
    };

    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| failed(format!("PDF parser panicked: {e}")))?
        .map_err(|e| failed(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_suffix() {
        assert_eq!(DocumentFormat::from_file_name("a.pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_file_name("A.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_file_name("r.Docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), Some(DocumentFormat::Text));
        assert_eq!(DocumentFormat::from_file_name("old.doc"), None);
        assert_eq!(DocumentFormat::from_file_name("pdf"), None);
        assert_eq!(DocumentFormat::from_file_name("archive.txt.gz"), None);
        assert_eq!(DocumentFormat::from_file_name(""), None);
    }

    #[tokio::test]
    async fn plain_text_is_decoded() {
        let out = extract("Hola mundo".as_bytes(), "saludo.txt").await.unwrap();
        assert_eq!(out.text, "Hola mundo");
        assert_eq!(out.file_name, "saludo.txt");
        assert_eq!(out.format, DocumentFormat::Text);
    }

    #[tokio::test]
    async fn text_is_returned_unchanged() {
        let raw = "Line one   \r\n\r\n\r\n\r\n\r\nLine two\u{AD}x\n\n";
        let out = extract(raw.as_bytes(), "a.txt").await.unwrap();
        assert_eq!(out.text, raw);

        let joined = "క్\u{200C}ష \u{1F469}\u{200D}\u{1F4BB}";
        let out = extract(joined.as_bytes(), "zwj.txt").await.unwrap();
        assert_eq!(out.text, joined);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_rejected() {
        let out = extract(b"caf\xE9 ok", "latin1.txt").await.unwrap();
        assert!(out.text.contains('\u{FFFD}'));
        assert!(out.text.ends_with("ok"));
    }

    #[tokio::test]
    async fn whitespace_only_is_empty_document() {
        let err = extract(b"  \n\t \r\n", "blank.txt").await.unwrap_err();
        assert!(matches!(err, DocError::EmptyDocument { .. }), "got {err:?}");
        let err = extract(b"", "zero.txt").await.unwrap_err();
        assert!(matches!(err, DocError::EmptyDocument { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn bom_only_is_empty_document() {
        let err = extract("\u{FEFF}\n".as_bytes(), "bom.txt").await.unwrap_err();
        assert!(matches!(err, DocError::EmptyDocument { .. }));
    }

    #[tokio::test]
    async fn unsupported_suffix_is_rejected() {
        let err = extract(b"whatever", "slides.pptx").await.unwrap_err();
        assert!(matches!(err, DocError::UnsupportedFormat { .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn corrupt_pdf_fails_extraction() {
        let err = extract(b"definitely not a pdf", "broken.pdf").await.unwrap_err();
        assert!(matches!(err, DocError::ExtractionFailed { .. }), "got {err:?}");
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn corrupt_docx_fails_extraction() {
        let err = extract(b"PK not really", "broken.docx").await.unwrap_err();
        assert!(matches!(err, DocError::ExtractionFailed { format: "DOCX", .. }));
    }
}
