//! Library entry points.
//!
//! Each backend operation is one async function: [`extract_document`],
//! [`translate_text`] and [`generate_pdf`]. They are stateless and share
//! nothing, so the HTTP handlers call them directly. [`translate_document`]
//! and [`translate_file`] chain all three for library and CLI callers.

use crate::config::{OutputFormat, PageGeometry, TranslateRequest, TranslationConfig};
use crate::error::DocError;
use crate::output::{
    ChunkResult, DocumentTranslation, ExtractedText, RenderedPdf, TranslationOutput,
    TranslationStats,
};
use crate::pipeline::{chunk, extract, normalize, provider, typeset};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Download name used when the caller supplies none.
pub const DEFAULT_PDF_NAME: &str = "translated";

/// Extract the text of an uploaded document.
///
/// See [`crate::pipeline::extract::extract`] for the dispatch rules.
pub async fn extract_document(bytes: &[u8], file_name: &str) -> Result<ExtractedText, DocError> {
    extract::extract(bytes, file_name).await
}

/// Translate `text` into `target_lang`.
///
/// The text is cut into chunks of `config.chunk_size` characters which are
/// translated concurrently and reassembled in their original order. A chunk
/// whose translation fails keeps its original text, so a translation only
/// fails on bad input or an unusable provider configuration.
///
/// # Errors
/// - [`DocError::InvalidInput`] — `text` or `target_lang` is empty
/// - [`DocError::InvalidConfig`] — `config` fails [`TranslationConfig::validate`]
/// - [`DocError::ProviderNotConfigured`] — the HTTP client could not be built
pub async fn translate_text(
    text: &str,
    target_lang: &str,
    source_lang: Option<&str>,
    config: &TranslationConfig,
) -> Result<TranslationOutput, DocError> {
    if text.is_empty() || target_lang.trim().is_empty() {
        return Err(DocError::invalid_input("Text and target language are required"));
    }
    config.validate()?;
    let start = Instant::now();
    let target_lang = target_lang.trim();
    let source_lang = source_lang
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config.default_source_lang.as_str());

    let provider = provider::resolve_provider(config)?;
    let chunks: Vec<String> = chunk::split_into_chunks(text, config.chunk_size)
        .into_iter()
        .map(str::to_owned)
        .collect();
    let total = chunks.len();
    let concurrency = config.concurrency.unwrap_or(total).max(1);
    info!(
        "Translating {} chars in {} chunk(s) via {} ({} → {}, concurrency {})",
        text.chars().count(),
        total,
        provider.name(),
        source_lang,
        target_lang,
        concurrency
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_translation_start(total);
    }

    let mut results: Vec<ChunkResult> = stream::iter(chunks.into_iter().enumerate().map(
        |(index, piece)| {
            let provider = Arc::clone(&provider);
            let callback = config.progress_callback.clone();
            async move {
                if let Some(ref cb) = callback {
                    cb.on_chunk_start(index, total);
                }
                let result =
                    chunk::translate_chunk(provider.as_ref(), index, &piece, target_lang, source_lang)
                        .await;
                if let Some(ref cb) = callback {
                    match &result.error {
                        None => cb.on_chunk_complete(index, total, result.text.chars().count()),
                        Some(e) => cb.on_chunk_fallback(index, total, &e.to_string()),
                    }
                }
                result
            }
        },
    ))
    .buffer_unordered(concurrency)
    .collect()
    .await;

    // Completion order is arbitrary; reassembly must follow chunk order.
    results.sort_by_key(|r| r.index);
    let translated_text: String = results.iter().map(|r| r.text.as_str()).collect();

    let fallback_chunks = results.iter().filter(|r| r.is_fallback()).count();
    let stats = TranslationStats {
        total_chunks: total,
        translated_chunks: total - fallback_chunks,
        fallback_chunks,
        source_chars: text.chars().count(),
        translated_chars: translated_text.chars().count(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Translation complete: {}/{} chunks translated, {}ms",
        stats.translated_chunks, stats.total_chunks, stats.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_translation_complete(total, stats.translated_chunks);
    }

    Ok(TranslationOutput {
        translated_text,
        chunks: results,
        stats,
    })
}

/// Typeset `text` as a PDF.
///
/// The download name is `<file_name>.pdf`, or `translated.pdf` when no
/// name is given. Whitespace-only text produces a single blank page.
///
/// # Errors
/// - [`DocError::InvalidInput`] — `text` is empty
/// - [`DocError::RenderFailed`] — a character cannot be drawn with Helvetica,
///   or the document could not be serialised
pub async fn generate_pdf(
    text: &str,
    file_name: Option<&str>,
    geometry: &PageGeometry,
) -> Result<RenderedPdf, DocError> {
    if text.is_empty() {
        return Err(DocError::invalid_input("Text is required"));
    }
    let base = file_name
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_PDF_NAME);
    let file_name = format!("{base}.pdf");

    let owned = text.to_string();
    let geometry = *geometry;
    let (bytes, page_count) =
        tokio::task::spawn_blocking(move || typeset::render_pdf(&owned, &geometry))
            .await
            .map_err(|e| DocError::Internal(format!("PDF typesetting task failed: {e}")))??;

    info!("Generated '{}': {} page(s), {} bytes", file_name, page_count, bytes.len());
    Ok(RenderedPdf {
        bytes,
        file_name,
        page_count,
    })
}

/// Extract, translate and re-emit one document.
///
/// With [`TranslationConfig::normalize_text`] set, the extracted text is
/// cleaned up before translation; [`DocumentTranslation::extracted`] always
/// holds the text as extracted.
pub async fn translate_document(
    bytes: &[u8],
    file_name: &str,
    request: &TranslateRequest,
    config: &TranslationConfig,
) -> Result<DocumentTranslation, DocError> {
    let extracted = extract_document(bytes, file_name).await?;
    let source_text = if config.normalize_text {
        normalize::normalize_text(&extracted.text)
    } else {
        extracted.text.clone()
    };
    let translation = translate_text(
        &source_text,
        &request.target_lang,
        request.source_lang.as_deref(),
        config,
    )
    .await?;

    let output = match request.format {
        OutputFormat::Text => translation.translated_text.clone().into_bytes(),
        OutputFormat::Pdf => {
            generate_pdf(&translation.translated_text, None, &PageGeometry::default())
                .await?
                .bytes
        }
    };

    Ok(DocumentTranslation {
        output_name: output_name(file_name, request.format),
        extracted,
        translation,
        format: request.format,
        output,
    })
}

/// Translate a file on disk and write the result.
///
/// When `output_path` is `None` the result is written next to the input as
/// `translated_<stem>.<ext>`. Uses atomic write (temp file + rename) to
/// prevent partial files. Returns the path written.
pub async fn translate_file(
    input_path: impl AsRef<Path>,
    output_path: Option<&Path>,
    request: &TranslateRequest,
    config: &TranslationConfig,
) -> Result<(PathBuf, DocumentTranslation), DocError> {
    let input_path = input_path.as_ref();
    let bytes = tokio::fs::read(input_path)
        .await
        .map_err(|e| DocError::ReadFailed {
            path: input_path.to_path_buf(),
            source: e,
        })?;
    let file_name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = translate_document(&bytes, &file_name, request, config).await?;

    let path = match output_path {
        Some(p) => p.to_path_buf(),
        None => input_path.with_file_name(&result.output_name),
    };
    write_atomic(&path, &result.output, request.format).await?;
    debug!("Wrote {} bytes to {}", result.output.len(), path.display());

    Ok((path, result))
}

/// Download name for a translated document: `translated_<stem>.<ext>`.
///
/// The stem is the upload name minus its last extension; a name with no
/// extension is used whole.
pub fn output_name(file_name: &str, format: OutputFormat) -> String {
    format!("translated_{}.{}", file_stem(file_name), format.extension())
}

fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot)
            if dot + 1 < file_name.len() && !file_name[dot + 1..].contains('/') =>
        {
            &file_name[..dot]
        }
        _ => file_name,
    }
}

async fn write_atomic(path: &Path, bytes: &[u8], format: OutputFormat) -> Result<(), DocError> {
    let write_failed = |e: std::io::Error| DocError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }

    let tmp_path = path.with_extension(format!("{}.tmp", format.extension()));
    tokio::fs::write(&tmp_path, bytes).await.map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_failed)?;
    Ok(())
}
