//! Configuration types for extraction, translation and typesetting.
//!
//! Translation behaviour is controlled through [`TranslationConfig`], built
//! via its [`TranslationConfigBuilder`]. Page layout is controlled through
//! [`PageGeometry`], whose default is the fixed A4 layout every generated PDF
//! uses.

use crate::error::DocError;
use crate::pipeline::provider::TranslationProvider;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Maximum number of characters sent to the provider in one call.
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Source language passed to the provider when the caller gives none.
pub const AUTO_DETECT: &str = "auto";

/// Configuration for a translation.
///
/// Built via [`TranslationConfig::builder()`] or using
/// [`TranslationConfig::default()`].
///
/// # Example
/// ```rust
/// use doctranslate::TranslationConfig;
///
/// let config = TranslationConfig::builder()
///     .chunk_size(2000)
///     .concurrency(4)
///     .request_timeout_secs(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.chunk_size, 2000);
/// ```
#[derive(Clone)]
pub struct TranslationConfig {
    /// Characters per chunk. Default: 5000.
    ///
    /// Counted in Unicode scalar values. Chunks are cut at exactly this
    /// length regardless of word boundaries; only the last one is shorter.
    pub chunk_size: usize,

    /// Upper bound on in-flight provider calls. Default: `None` (every chunk
    /// is dispatched at once).
    pub concurrency: Option<usize>,

    /// Source language used when a request carries none. Default: `"auto"`.
    pub default_source_lang: String,

    /// Pre-constructed provider. Takes precedence over `endpoint`.
    pub provider: Option<Arc<dyn TranslationProvider>>,

    /// Override for the Google endpoint URL. If None, the public endpoint.
    pub endpoint: Option<String>,

    /// Per-request HTTP timeout in seconds. Default: 30.
    pub request_timeout_secs: u64,

    /// Optional progress callback for per-chunk events.
    pub progress_callback: Option<ProgressCallback>,

    /// Clean up extracted text before it is translated. Default: `false`.
    ///
    /// When set, [`crate::translate_document`] runs the extracted text
    /// through [`crate::pipeline::normalize::normalize_text`]. Extraction on
    /// its own always returns the document's text unchanged.
    pub normalize_text: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            concurrency: None,
            default_source_lang: AUTO_DETECT.to_string(),
            provider: None,
            endpoint: None,
            request_timeout_secs: 30,
            progress_callback: None,
            normalize_text: false,
        }
    }
}

impl fmt::Debug for TranslationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationConfig")
            .field("chunk_size", &self.chunk_size)
            .field("concurrency", &self.concurrency)
            .field("default_source_lang", &self.default_source_lang)
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.name().to_string()),
            )
            .field("endpoint", &self.endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .field("normalize_text", &self.normalize_text)
            .finish()
    }
}

impl TranslationConfig {
    /// Create a new builder for `TranslationConfig`.
    pub fn builder() -> TranslationConfigBuilder {
        TranslationConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the constraints [`TranslationConfigBuilder::build`] enforces.
    ///
    /// The fields are public, so a struct literal can bypass the builder;
    /// the library entry points call this before doing any work.
    pub fn validate(&self) -> Result<(), DocError> {
        if self.chunk_size == 0 {
            return Err(DocError::InvalidConfig("Chunk size must be ≥ 1".into()));
        }
        if self.default_source_lang.trim().is_empty() {
            return Err(DocError::InvalidConfig(
                "Default source language must not be empty".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(DocError::InvalidConfig(
                "Request timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`TranslationConfig`].
pub struct TranslationConfigBuilder {
    config: TranslationConfig,
}

impl TranslationConfigBuilder {
    pub fn chunk_size(mut self, n: usize) -> Self {
        self.config.chunk_size = n;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = Some(n.max(1));
        self
    }

    pub fn default_source_lang(mut self, lang: impl Into<String>) -> Self {
        self.config.default_source_lang = lang.into();
        self
    }

    pub fn provider(mut self, provider: Arc<dyn TranslationProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = Some(url.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn normalize_text(mut self, enabled: bool) -> Self {
        self.config.normalize_text = enabled;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TranslationConfig, DocError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Page layout ──────────────────────────────────────────────────────────

/// Physical layout of a generated PDF page, in PostScript points.
///
/// The default is A4 (595 × 842) with 50 pt margins and 12 pt Helvetica at
/// 1.2 line spacing, which fits 51 lines per page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub font_size: f32,
    /// Line height as a multiple of `font_size`.
    pub line_spacing: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 50.0,
            font_size: 12.0,
            line_spacing: 1.2,
        }
    }
}

impl PageGeometry {
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }

    /// Horizontal space available to a line of text.
    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Baseline of the first line on a fresh page.
    pub fn top(&self) -> f32 {
        self.height - self.margin
    }

    /// A line may not start below this baseline.
    pub fn bottom(&self) -> f32 {
        self.margin + self.line_height()
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Format of the translated download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// UTF-8 plain text. (default)
    #[default]
    Text,
    /// Typeset PDF.
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain; charset=utf-8",
            OutputFormat::Pdf => "application/pdf",
        }
    }
}

// ── Per-document request ─────────────────────────────────────────────────

/// What to do with one document: where to translate it and what to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub target_lang: String,
    /// `None` means [`TranslationConfig::default_source_lang`].
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl TranslateRequest {
    pub fn new(target_lang: impl Into<String>) -> Self {
        Self {
            target_lang: target_lang.into(),
            source_lang: None,
            format: OutputFormat::default(),
        }
    }

    pub fn source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = Some(lang.into());
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_text_output() {
        let r = TranslateRequest::new("fr");
        assert_eq!(r.format, OutputFormat::Text);
        assert!(r.source_lang.is_none());
        let r = r.source_lang("en").format(OutputFormat::Pdf);
        assert_eq!(r.source_lang.as_deref(), Some("en"));
        assert_eq!(r.format, OutputFormat::Pdf);
    }

    #[test]
    fn defaults() {
        let c = TranslationConfig::default();
        assert_eq!(c.chunk_size, 5000);
        assert_eq!(c.concurrency, None);
        assert_eq!(c.default_source_lang, "auto");
        assert!(c.provider.is_none());
        assert!(!c.normalize_text);
    }

    #[test]
    fn struct_literal_is_validated() {
        let c = TranslationConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(DocError::InvalidConfig(_))));
        assert!(TranslationConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_rejects_zero_chunk_size() {
        let err = TranslationConfig::builder().chunk_size(0).build().unwrap_err();
        assert!(err.to_string().contains("Chunk size"));
    }

    #[test]
    fn builder_clamps_concurrency() {
        let c = TranslationConfig::builder().concurrency(0).build().unwrap();
        assert_eq!(c.concurrency, Some(1));
    }

    #[test]
    fn default_geometry() {
        let g = PageGeometry::default();
        assert_eq!(g.usable_width(), 495.0);
        assert_eq!(g.top(), 792.0);
        assert!((g.line_height() - 14.4).abs() < 1e-4);
        assert!((g.bottom() - 64.4).abs() < 1e-4);
    }

    #[test]
    fn output_format_extensions() {
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(OutputFormat::Pdf.content_type(), "application/pdf");
    }
}
