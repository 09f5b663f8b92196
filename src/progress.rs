//! Progress-callback trait for per-chunk translation events.
//!
//! Inject an [`Arc<dyn TranslationProgressCallback>`] via
//! [`crate::config::TranslationConfigBuilder::progress_callback`] to receive
//! events as chunks are dispatched to the provider and come back.
//!
//! # Example
//!
//! ```rust
//! use doctranslate::{TranslationConfig, TranslationProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct FallbackCounter {
//!     fallbacks: AtomicUsize,
//! }
//!
//! impl TranslationProgressCallback for FallbackCounter {
//!     fn on_chunk_fallback(&self, chunk: usize, total: usize, error: &str) {
//!         self.fallbacks.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("chunk {}/{} kept original text: {}", chunk + 1, total, error);
//!     }
//! }
//!
//! let counter = Arc::new(FallbackCounter { fallbacks: AtomicUsize::new(0) });
//! let config = TranslationConfig::builder()
//!     .progress_callback(counter as Arc<dyn TranslationProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the translator as it processes each chunk.
///
/// Chunks are translated concurrently, so `on_chunk_start`,
/// `on_chunk_complete` and `on_chunk_fallback` may be called from different
/// tasks at once and in any order. Implementations must protect shared
/// mutable state (`Mutex`, atomics). All methods default to no-ops.
pub trait TranslationProgressCallback: Send + Sync {
    /// Called once, after chunking, before any provider call.
    fn on_translation_start(&self, total_chunks: usize) {
        let _ = total_chunks;
    }

    /// Called just before a chunk is sent to the provider.
    ///
    /// `chunk` is the 0-indexed chunk position.
    fn on_chunk_start(&self, chunk: usize, total_chunks: usize) {
        let _ = (chunk, total_chunks);
    }

    /// Called when a chunk came back translated.
    ///
    /// `translated_len` is the length in characters of the translation.
    fn on_chunk_complete(&self, chunk: usize, total_chunks: usize, translated_len: usize) {
        let _ = (chunk, total_chunks, translated_len);
    }

    /// Called when a chunk fell back to its original text.
    fn on_chunk_fallback(&self, chunk: usize, total_chunks: usize, error: &str) {
        let _ = (chunk, total_chunks, error);
    }

    /// Called once after every chunk has been attempted.
    fn on_translation_complete(&self, total_chunks: usize, translated_chunks: usize) {
        let _ = (total_chunks, translated_chunks);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl TranslationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::TranslationConfig`].
pub type ProgressCallback = Arc<dyn TranslationProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        fallbacks: AtomicUsize,
        total: AtomicUsize,
        translated: AtomicUsize,
    }

    impl TranslationProgressCallback for TrackingCallback {
        fn on_translation_start(&self, total_chunks: usize) {
            self.total.store(total_chunks, Ordering::SeqCst);
        }

        fn on_chunk_start(&self, _chunk: usize, _total: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_chunk_complete(&self, _chunk: usize, _total: usize, _len: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_chunk_fallback(&self, _chunk: usize, _total: usize, _error: &str) {
            self.fallbacks.fetch_add(1, Ordering::SeqCst);
        }

        fn on_translation_complete(&self, _total: usize, translated_chunks: usize) {
            self.translated.store(translated_chunks, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_translation_start(3);
        cb.on_chunk_start(0, 3);
        cb.on_chunk_complete(0, 3, 42);
        cb.on_chunk_fallback(1, 3, "HTTP 503");
        cb.on_translation_complete(3, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_translation_start(3);
        tracker.on_chunk_start(0, 3);
        tracker.on_chunk_complete(0, 3, 100);
        tracker.on_chunk_start(1, 3);
        tracker.on_chunk_complete(1, 3, 200);
        tracker.on_chunk_start(2, 3);
        tracker.on_chunk_fallback(2, 3, "timeout");
        tracker.on_translation_complete(3, 2);

        assert_eq!(tracker.total.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.fallbacks.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.translated.load(Ordering::SeqCst), 2);
    }
}
