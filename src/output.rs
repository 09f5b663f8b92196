//! Result types produced by the pipeline stages.

use crate::config::OutputFormat;
use crate::error::ChunkError;
use crate::pipeline::extract::DocumentFormat;
use serde::{Deserialize, Serialize};

/// Text recovered from an uploaded document.
///
/// `text` is never empty or all-whitespace; extraction reports
/// [`crate::DocError::EmptyDocument`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    pub text: String,
    /// File name as uploaded, original case preserved.
    pub file_name: String,
    pub format: DocumentFormat,
}

/// Outcome of translating one chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkResult {
    /// 0-indexed position of the chunk in the source text.
    pub index: usize,
    /// Translated text, or the original chunk when `error` is set.
    pub text: String,
    pub duration_ms: u64,
    pub error: Option<ChunkError>,
}

impl ChunkResult {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Counters for one translation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationStats {
    pub total_chunks: usize,
    pub translated_chunks: usize,
    pub fallback_chunks: usize,
    pub source_chars: usize,
    pub translated_chars: usize,
    pub duration_ms: u64,
}

/// Full result of [`crate::convert::translate_text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationOutput {
    /// Chunk results joined in chunk order with no separator.
    pub translated_text: String,
    /// Per-chunk results, sorted by index.
    pub chunks: Vec<ChunkResult>,
    pub stats: TranslationStats,
}

/// A typeset PDF ready for download.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Suggested download name, always ending in `.pdf`.
    pub file_name: String,
    pub page_count: usize,
}

/// Result of running a whole document through the pipeline.
#[derive(Debug, Clone)]
pub struct DocumentTranslation {
    pub extracted: ExtractedText,
    pub translation: TranslationOutput,
    pub format: OutputFormat,
    /// Output document bytes in `format`.
    pub output: Vec<u8>,
    /// Suggested download name, `translated_<stem>.<ext>`.
    pub output_name: String,
}
