//! # doctranslate
//!
//! Extract the text of PDF, DOCX and plain-text documents, machine-translate
//! it, and typeset the result as a fresh PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! document bytes + file name
//!  │
//!  ├─ 1. Extract    dispatch on suffix: pdf-extract / DOCX XML / UTF-8
//!  ├─ 2. Normalise  opt-in: line endings, invisible characters, blank lines
//!  ├─ 3. Chunk      fixed 5000-character chunks, no regard for words
//!  ├─ 4. Translate  concurrent provider calls, per-chunk fallback to the
//!  │                original text, reassembled in chunk order
//!  ├─ 5. Layout     greedy word wrap with Helvetica metrics, 51 lines/page
//!  └─ 6. Typeset    A4 PDF via lopdf
//! ```
//!
//! The three backend operations ([`extract_document`], [`translate_text`],
//! [`generate_pdf`]) are independent and stateless. [`translate_document`]
//! and [`translate_file`] chain them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doctranslate::{translate_text, TranslationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TranslationConfig::default();
//!     let output = translate_text("Hello world", "fr", None, &config).await?;
//!     println!("{}", output.translated_text);
//!     eprintln!("{} of {} chunks translated",
//!         output.stats.translated_chunks,
//!         output.stats.total_chunks);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | on      | axum HTTP API in [`server`] |
//! | `cli`    | on      | The `doctranslate` binary (clap + anyhow + tracing-subscriber + indicatif); implies `server` |
//!
//! Disable both when using only the library:
//! ```toml
//! doctranslate = { version = "0.1", default-features = false }
//! ```
//!
//! ## Scripts
//!
//! Generated PDFs use the non-embedded standard Helvetica font with
//! WinAnsi encoding. Text outside Windows-1252 (Telugu, Hindi, Chinese, …)
//! translates fine but cannot be typeset; [`generate_pdf`] reports
//! [`DocError::RenderFailed`] for it.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod languages;
pub mod output;
pub mod pipeline;
pub mod progress;
#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    OutputFormat, PageGeometry, TranslateRequest, TranslationConfig, TranslationConfigBuilder,
};
pub use convert::{
    extract_document, generate_pdf, output_name, translate_document, translate_file,
    translate_text,
};
pub use error::{ChunkError, DocError, ProviderError};
pub use output::{
    ChunkResult, DocumentTranslation, ExtractedText, RenderedPdf, TranslationOutput,
    TranslationStats,
};
pub use pipeline::extract::DocumentFormat;
pub use pipeline::provider::{GoogleTranslate, TranslationProvider};
pub use progress::{NoopProgressCallback, ProgressCallback, TranslationProgressCallback};
