//! Integration tests for the library entry points.
//!
//! Translation runs against an in-process scripted provider, so nothing here
//! touches the network.

use async_trait::async_trait;
use doctranslate::{
    extract_document, generate_pdf, translate_document, translate_text, DocError, OutputFormat,
    PageGeometry, ProviderError, TranslateRequest, TranslationConfig, TranslationProgressCallback,
    TranslationProvider,
};
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Upper-cases its input, fails on chunks containing `fail_marker`, and
/// sleeps longer for earlier chunks so completion order is reversed.
#[derive(Default)]
struct Scripted {
    calls: Mutex<Vec<String>>,
    fail_marker: Option<char>,
    stagger: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Scripted {
    fn failing_on(marker: char) -> Self {
        Self {
            fail_marker: Some(marker),
            ..Default::default()
        }
    }

    fn staggered() -> Self {
        Self {
            stagger: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, ProviderError> {
        let call_no = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(text.to_string());
            calls.len()
        };
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.stagger {
            tokio::time::sleep(Duration::from_millis(60 / call_no as u64)).await;
        } else {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.fail_marker {
            Some(m) if text.contains(m) => Err(ProviderError::Status { status: 503 }),
            _ => Ok(text.to_uppercase()),
        }
    }
}

fn config_with(provider: Arc<Scripted>) -> TranslationConfig {
    TranslationConfig::builder()
        .provider(provider)
        .build()
        .unwrap()
}

fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

// ── Translation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn hello_world_is_one_call() {
    let provider = Arc::new(Scripted::default());
    let out = translate_text("Hello world", "fr", None, &config_with(provider.clone()))
        .await
        .unwrap();

    assert_eq!(provider.calls(), vec!["Hello world"]);
    assert_eq!(out.translated_text, "HELLO WORLD");
    assert_eq!(out.stats.total_chunks, 1);
    assert_eq!(out.stats.fallback_chunks, 0);
}

#[tokio::test]
async fn hello_world_falls_back_to_original() {
    let provider = Arc::new(Scripted::failing_on('H'));
    let out = translate_text("Hello world", "fr", None, &config_with(provider.clone()))
        .await
        .unwrap();

    assert_eq!(provider.calls().len(), 1);
    assert_eq!(out.translated_text, "Hello world");
    assert_eq!(out.stats.fallback_chunks, 1);
    assert!(out.chunks[0].is_fallback());
}

#[tokio::test]
async fn ten_thousand_and_one_chars_make_three_chunks_in_order() {
    let text = format!("{}{}{}", "a".repeat(5000), "b".repeat(5000), "c");
    let provider = Arc::new(Scripted::staggered());
    let out = translate_text(&text, "de", Some("en"), &config_with(provider.clone()))
        .await
        .unwrap();

    let mut lens: Vec<usize> = provider.calls().iter().map(|c| c.len()).collect();
    lens.sort_unstable();
    assert_eq!(lens, vec![1, 5000, 5000]);

    // Later chunks finish first, but the result follows chunk order.
    assert_eq!(out.translated_text, text.to_uppercase());
    let indices: Vec<usize> = out.chunks.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn one_failing_chunk_keeps_its_original_text() {
    let text = format!("{}{}{}", "a".repeat(5000), "b".repeat(5000), "c".repeat(10));
    let provider = Arc::new(Scripted::failing_on('b'));
    let out = translate_text(&text, "es", None, &config_with(provider.clone()))
        .await
        .unwrap();

    let expected = format!("{}{}{}", "A".repeat(5000), "b".repeat(5000), "C".repeat(10));
    assert_eq!(out.translated_text, expected);
    assert_eq!(out.stats.translated_chunks, 2);
    assert_eq!(out.stats.fallback_chunks, 1);
    assert!(out.chunks[1].is_fallback());
}

#[tokio::test]
async fn multibyte_text_is_chunked_on_character_boundaries() {
    let text = "é".repeat(7);
    let provider = Arc::new(Scripted::default());
    let config = TranslationConfig::builder()
        .provider(provider.clone())
        .chunk_size(3)
        .build()
        .unwrap();
    let out = translate_text(&text, "fr", None, &config).await.unwrap();

    assert_eq!(out.stats.total_chunks, 3);
    assert_eq!(out.translated_text, "É".repeat(7));
}

#[tokio::test]
async fn concurrency_cap_is_respected() {
    let provider = Arc::new(Scripted::default());
    let config = TranslationConfig::builder()
        .provider(provider.clone())
        .chunk_size(10)
        .concurrency(2)
        .build()
        .unwrap();
    let text = "x".repeat(100);
    let out = translate_text(&text, "fr", None, &config).await.unwrap();

    assert_eq!(out.stats.total_chunks, 10);
    assert!(provider.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn progress_callback_sees_every_chunk() {
    #[derive(Default)]
    struct Counter {
        started: AtomicUsize,
        completed: AtomicUsize,
        fallbacks: AtomicUsize,
        finished_with: AtomicUsize,
    }
    impl TranslationProgressCallback for Counter {
        fn on_chunk_start(&self, _: usize, _: usize) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }
        fn on_chunk_complete(&self, _: usize, _: usize, _: usize) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
        fn on_chunk_fallback(&self, _: usize, _: usize, _: &str) {
            self.fallbacks.fetch_add(1, Ordering::SeqCst);
        }
        fn on_translation_complete(&self, _: usize, translated: usize) {
            self.finished_with.store(translated, Ordering::SeqCst);
        }
    }

    let counter = Arc::new(Counter::default());
    let config = TranslationConfig::builder()
        .provider(Arc::new(Scripted::failing_on('z')))
        .chunk_size(4)
        .progress_callback(counter.clone())
        .build()
        .unwrap();
    translate_text("aaaabbbbzzzz", "fr", None, &config).await.unwrap();

    assert_eq!(counter.started.load(Ordering::SeqCst), 3);
    assert_eq!(counter.completed.load(Ordering::SeqCst), 2);
    assert_eq!(counter.fallbacks.load(Ordering::SeqCst), 1);
    assert_eq!(counter.finished_with.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_target_language_is_rejected() {
    let provider = Arc::new(Scripted::default());
    let err = translate_text("Hello", "", None, &config_with(provider.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, DocError::InvalidInput { .. }));
    assert!(provider.calls().is_empty());
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn docx_paragraphs_are_extracted() {
    let bytes = docx_with_paragraphs(&["First paragraph", "Fish &amp; chips"]);
    let out = extract_document(&bytes, "Menu.DOCX").await.unwrap();
    assert_eq!(out.text, "First paragraph\n\nFish & chips\n\n");
    assert_eq!(out.file_name, "Menu.DOCX");
}

#[tokio::test]
async fn empty_docx_is_empty_document() {
    let bytes = docx_with_paragraphs(&[]);
    let err = extract_document(&bytes, "empty.docx").await.unwrap_err();
    assert!(matches!(err, DocError::EmptyDocument { .. }));
}

#[tokio::test]
async fn generated_pdf_text_can_be_extracted_again() {
    let pdf = generate_pdf(
        "Bonjour le monde. Ceci est un test.",
        None,
        &PageGeometry::default(),
    )
    .await
    .unwrap();
    let out = extract_document(&pdf.bytes, "roundtrip.pdf").await.unwrap();
    assert!(out.text.contains("Bonjour"), "got {:?}", out.text);
    assert!(out.text.contains("test"), "got {:?}", out.text);
}

// ── Typesetting ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn long_text_renders_three_pages() {
    // 120 words of 40 glyphs each: one word per line, 51 lines per page.
    let text = vec!["a".repeat(40); 120].join(" ");
    let pdf = generate_pdf(&text, Some("long"), &PageGeometry::default())
        .await
        .unwrap();
    assert_eq!(pdf.page_count, 3);
    assert_eq!(pdf_page_count(&pdf.bytes), 3);
    assert_eq!(pdf.file_name, "long.pdf");
}

#[tokio::test]
async fn non_latin_text_fails_to_render() {
    let err = generate_pdf("నమస్కారం", None, &PageGeometry::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DocError::RenderFailed { .. }));
    assert!(!err.is_client_error());
}

// ── Whole documents ──────────────────────────────────────────────────────────

#[tokio::test]
async fn docx_to_translated_pdf() {
    let bytes = docx_with_paragraphs(&["the quick brown fox"; 100]);
    let provider = Arc::new(Scripted::default());
    let request = TranslateRequest::new("fr").format(OutputFormat::Pdf);
    let doc = translate_document(&bytes, "fox.docx", &request, &config_with(provider))
        .await
        .unwrap();

    assert_eq!(doc.output_name, "translated_fox.pdf");
    assert!(doc.translation.translated_text.starts_with("THE QUICK BROWN FOX"));
    // 400 upper-case words reflow into roughly 33 full lines.
    assert_eq!(pdf_page_count(&doc.output), 1);
}

#[tokio::test]
async fn unsupported_upload_never_reaches_provider() {
    let provider = Arc::new(Scripted::default());
    let err = translate_document(
        b"slides",
        "deck.pptx",
        &TranslateRequest::new("fr"),
        &config_with(provider.clone()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DocError::UnsupportedFormat { .. }));
    assert!(provider.calls().is_empty());
}
