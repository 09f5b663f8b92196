//! Translation providers: the one stage with network I/O.
//!
//! [`TranslationProvider`] is the seam between the chunking logic and
//! whatever service actually translates text. [`GoogleTranslate`] talks to
//! the public `translate_a/single` endpoint used by the Google Translate web
//! widget; tests and alternative services plug in their own implementation.

use crate::config::TranslationConfig;
use crate::error::{DocError, ProviderError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Translates one piece of text.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Translate `text` from `source_lang` (or `"auto"`) into `target_lang`.
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, ProviderError>;
}

/// Client for the unofficial Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslate {
    pub const DEFAULT_ENDPOINT: &'static str =
        "https://translate.googleapis.com/translate_a/single";

    /// Build a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, DocError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("doctranslate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocError::ProviderNotConfigured {
                provider: "google".to_string(),
                detail: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, ProviderError> {
        // The text goes in the form body: a 5000-character chunk
        // percent-encoded into the query string overflows URL limits.
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        let translated = parse_translation(&body)?;
        debug!(
            "google: {} → {} chars ({} → {})",
            text.chars().count(),
            translated.chars().count(),
            source_lang,
            target_lang
        );
        Ok(translated)
    }
}

/// Pull the translated text out of a `translate_a/single` response.
///
/// The body is a nested JSON array; its first element lists sentence
/// segments as `[translated, original, …]`. Segments are concatenated in
/// order.
pub fn parse_translation(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("missing segment list".into()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            out.push_str(piece);
        }
    }
    Ok(out)
}

/// Resolve the provider from the config: a pre-built provider wins,
/// otherwise a [`GoogleTranslate`] client for the configured endpoint.
pub fn resolve_provider(
    config: &TranslationConfig,
) -> Result<Arc<dyn TranslationProvider>, DocError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }
    let endpoint = config
        .endpoint
        .as_deref()
        .unwrap_or(GoogleTranslate::DEFAULT_ENDPOINT);
    Ok(Arc::new(GoogleTranslate::new(
        endpoint,
        config.request_timeout_secs,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_single_segment() {
        let body = json!([[["Hola mundo", "Hello world", null, null, 10]], null, "en"]);
        assert_eq!(parse_translation(&body).unwrap(), "Hola mundo");
    }

    #[test]
    fn parse_concatenates_segments() {
        let body = json!([
            [
                ["Bonjour. ", "Hello. ", null, null, 3],
                ["Au revoir.", "Goodbye.", null, null, 3],
                [null, null, "bon-zhoor"]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Bonjour. Au revoir.");
    }

    #[test]
    fn parse_rejects_unexpected_shape() {
        assert!(matches!(
            parse_translation(&json!({"error": "nope"})),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_translation(&json!([null, null, "en"])),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn resolve_prefers_prebuilt_provider() {
        struct Echo;
        #[async_trait]
        impl TranslationProvider for Echo {
            fn name(&self) -> &str {
                "echo"
            }
            async fn translate(&self, t: &str, _: &str, _: &str) -> Result<String, ProviderError> {
                Ok(t.to_string())
            }
        }

        let config = TranslationConfig::builder()
            .provider(Arc::new(Echo))
            .build()
            .unwrap();
        assert_eq!(resolve_provider(&config).unwrap().name(), "echo");

        let default = resolve_provider(&TranslationConfig::default()).unwrap();
        assert_eq!(default.name(), "google");
    }
}
