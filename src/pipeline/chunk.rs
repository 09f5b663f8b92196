//! Chunking and per-chunk translation.
//!
//! Free translation endpoints cap request size, so text is cut into
//! fixed-width chunks before it is sent. The cut ignores word and sentence
//! boundaries: a chunk may end mid-word and the pieces are glued back
//! together by plain concatenation, so chunk *order* is the only thing
//! reassembly has to get right.
//!
//! [`translate_chunk`] never returns an error. A failed or empty provider
//! answer is recorded in [`ChunkResult::error`] and the chunk's original
//! text takes its place, so one bad chunk cannot sink the document.

use crate::error::ChunkError;
use crate::output::ChunkResult;
use crate::pipeline::provider::TranslationProvider;
use std::time::Instant;
use tracing::{debug, warn};

/// Split `text` into consecutive chunks of at most `max_chars` characters.
///
/// Lengths are counted in Unicode scalar values, so a chunk never splits a
/// UTF-8 sequence. Concatenating the chunks yields `text` exactly; the
/// number of chunks is `ceil(chars / max_chars)` (zero for empty input).
///
/// # Panics
/// If `max_chars` is zero. [`crate::TranslationConfig`] validation rules
/// that out.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    assert!(max_chars > 0, "chunk size must be positive");

    let mut chunks = Vec::with_capacity(text.len() / max_chars + 1);
    let mut start = 0;
    let mut count = 0;
    for (offset, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Translate one chunk, falling back to the original text on any failure.
pub async fn translate_chunk(
    provider: &dyn TranslationProvider,
    index: usize,
    chunk: &str,
    target_lang: &str,
    source_lang: &str,
) -> ChunkResult {
    let start = Instant::now();
    let outcome = provider.translate(chunk, target_lang, source_lang).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let error = match outcome {
        Ok(translated) if !translated.is_empty() => {
            debug!(
                "Chunk {}: {} → {} chars in {}ms",
                index,
                chunk.chars().count(),
                translated.chars().count(),
                duration_ms
            );
            return ChunkResult {
                index,
                text: translated,
                duration_ms,
                error: None,
            };
        }
        Ok(_) => ChunkError::EmptyTranslation { chunk: index },
        Err(e) => ChunkError::ProviderFailed {
            chunk: index,
            detail: e.to_string(),
        },
    };

    warn!("{}; keeping original text", error);
    ChunkResult {
        index,
        text: chunk.to_string(),
        duration_ms,
        error: Some(error),
    }
}
