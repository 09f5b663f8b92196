//! Error types for the doctranslate library.
//!
//! Three error types reflect three failure scopes:
//!
//! * [`DocError`] — **Fatal**: the operation cannot proceed at all (missing
//!   field, unsupported file type, empty document, PDF that will not
//!   typeset). Returned as `Err(DocError)` from the [`crate::convert`]
//!   entry points and mapped to an HTTP status by the server.
//!
//! * [`ProviderError`] — a single call to the translation provider failed.
//!   Returned by [`crate::pipeline::provider::TranslationProvider`].
//!
//! * [`ChunkError`] — **Non-fatal**: the provider error as recorded against
//!   one chunk. Stored inside [`crate::output::ChunkResult`]; the chunk's
//!   original text is used instead and the translation carries on.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the doctranslate library.
#[derive(Debug, Error)]
pub enum DocError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A required field is missing or empty.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The file name does not end in `.pdf`, `.docx` or `.txt`.
    #[error("Unsupported file type '{file_name}'. Please upload PDF, DOCX, or TXT files.")]
    UnsupportedFormat { file_name: String },

    /// Extraction succeeded but produced no visible characters.
    #[error("No text found in the document '{file_name}'")]
    EmptyDocument { file_name: String },

    /// Could not read an input file from disk.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Format errors ─────────────────────────────────────────────────────
    /// The PDF or DOCX text extractor rejected the document.
    #[error("Failed to extract text from {format} document '{file_name}': {detail}")]
    ExtractionFailed {
        format: &'static str,
        file_name: String,
        detail: String,
    },

    /// Typesetting or serialising the output PDF failed.
    #[error("Failed to render PDF: {detail}")]
    RenderFailed { detail: String },

    // ── Provider errors ───────────────────────────────────────────────────
    /// The translation provider could not be constructed.
    #[error("Translation provider '{provider}' is not configured: {detail}")]
    ProviderNotConfigured { provider: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server could not bind or stopped with an error.
    #[error("Server error on {bind}: {detail}")]
    ServerFailed { bind: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocError {
    /// Shorthand for [`DocError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DocError::InvalidInput {
            message: message.into(),
        }
    }

    /// `true` when the caller sent something unusable (HTTP 400), `false`
    /// when the failure happened while doing the work (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DocError::InvalidInput { .. }
                | DocError::UnsupportedFormat { .. }
                | DocError::EmptyDocument { .. }
        )
    }
}

/// A failed call to the translation provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    /// The request never completed (DNS, TLS, timeout, connection reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ProviderError::Status {
                status: status.as_u16(),
            }
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// A non-fatal error for a single chunk.
///
/// Stored alongside [`crate::output::ChunkResult`] when the chunk fell back
/// to its original text. The translation as a whole still succeeds.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ChunkError {
    /// The provider call failed.
    #[error("Chunk {chunk}: provider call failed: {detail}")]
    ProviderFailed { chunk: usize, detail: String },

    /// The provider answered, but with an empty translation.
    #[error("Chunk {chunk}: provider returned an empty translation")]
    EmptyTranslation { chunk: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_display() {
        let e = DocError::UnsupportedFormat {
            file_name: "slides.pptx".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("slides.pptx"), "got: {msg}");
        assert!(msg.contains("PDF, DOCX, or TXT"), "got: {msg}");
    }

    #[test]
    fn invalid_input_display_is_message() {
        let e = DocError::invalid_input("Text is required");
        assert_eq!(e.to_string(), "Text is required");
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(DocError::invalid_input("x").is_client_error());
        assert!(DocError::EmptyDocument {
            file_name: "a.txt".into()
        }
        .is_client_error());
        assert!(!DocError::RenderFailed {
            detail: "boom".into()
        }
        .is_client_error());
        assert!(!DocError::Internal("x".into()).is_client_error());
    }

    #[test]
    fn chunk_error_display() {
        let e = ChunkError::ProviderFailed {
            chunk: 2,
            detail: "provider returned HTTP 429".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Chunk 2"));
        assert!(msg.contains("429"));
    }
}
