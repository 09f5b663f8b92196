//! HTTP API over the three pipeline operations.
//!
//! Thin axum layer: every handler validates its payload, calls one
//! [`crate::convert`] function and maps [`DocError`] to a status code.
//! Client mistakes come back as `400 {"error": "<what was wrong>"}`; anything
//! that broke while doing the work is logged in full and answered with a
//! generic `500` message.
//!
//! | Route | Body | Response |
//! |-------|------|----------|
//! | `POST /api/extract` | multipart, `file` field | `{text, fileName}` |
//! | `POST /api/translate` | `{text, targetLang, sourceLang?}` | `{translatedText}` |
//! | `POST /api/generate-pdf` | `{text, fileName?}` | `application/pdf` attachment |
//! | `GET /api/languages` | | `[{code, name}]` |
//! | `GET /health` | | `{status, version, uptimeSecs}` |

use crate::config::{PageGeometry, TranslationConfig};
use crate::convert;
use crate::error::DocError;
use crate::languages::{Language, LANGUAGES};
use crate::pipeline::provider;
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};
use tracing::{error, info};

const EXTRACT_FAILED: &str = "Failed to extract text from document";
const TRANSLATE_FAILED: &str = "Failed to translate text";
const GENERATE_FAILED: &str = "Failed to generate PDF";

// ── Configuration ────────────────────────────────────────────────────────

/// Listener and request limits for [`serve`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind. Default: `127.0.0.1:3000`.
    pub bind: String,
    /// Largest accepted request body in bytes. Default: 25 MiB.
    pub max_upload_bytes: usize,
    /// Send permissive CORS headers. Default: off.
    pub cors: bool,
    /// Layout of PDFs from `/api/generate-pdf`.
    pub geometry: PageGeometry,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
            cors: false,
            geometry: PageGeometry::default(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    translation: Arc<TranslationConfig>,
    geometry: PageGeometry,
    start_time: Instant,
}

// ── Error type ───────────────────────────────────────────────────────────

struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({"error": self.1}))).into_response()
    }
}

fn bad_request(msg: impl Into<String>) -> AppError {
    AppError(StatusCode::BAD_REQUEST, msg.into())
}

/// Client errors keep their message; everything else is logged and hidden
/// behind `generic`.
fn doc_error(e: DocError, generic: &'static str) -> AppError {
    if e.is_client_error() {
        bad_request(e.to_string())
    } else {
        error!("{}: {}", generic, e);
        AppError(StatusCode::INTERNAL_SERVER_ERROR, generic.to_string())
    }
}

/// Unreadable JSON bodies are the client's fault whatever axum would answer;
/// only an oversized body keeps its own status.
fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => {
            AppError(StatusCode::PAYLOAD_TOO_LARGE, rejection.body_text())
        }
        _ => bad_request(rejection.body_text()),
    }
}

// ── Request / Response types ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractResponse {
    text: String,
    file_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    target_lang: Option<String>,
    #[serde(default)]
    source_lang: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratePdfBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

// ── Handlers ─────────────────────────────────────────────────────────────

// POST /api/extract
async fn extract_handler(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut multipart = multipart.map_err(|r| bad_request(r.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError(e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError(e.status(), e.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) = upload.ok_or_else(|| bad_request("No file provided"))?;

    let extracted = convert::extract_document(&bytes, &file_name)
        .await
        .map_err(|e| doc_error(e, EXTRACT_FAILED))?;
    info!(
        "[POST /api/extract] '{}': {} chars",
        extracted.file_name,
        extracted.text.chars().count()
    );

    Ok(Json(ExtractResponse {
        text: extracted.text,
        file_name: extracted.file_name,
    }))
}

// POST /api/translate
async fn translate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let Json(body) = payload.map_err(json_rejection)?;
    let text = body.text.unwrap_or_default();
    let target_lang = body.target_lang.unwrap_or_default();

    let output = convert::translate_text(
        &text,
        &target_lang,
        body.source_lang.as_deref(),
        &state.translation,
    )
    .await
    .map_err(|e| doc_error(e, TRANSLATE_FAILED))?;
    info!(
        "[POST /api/translate] {} → {}: {}/{} chunks translated",
        body.source_lang.as_deref().unwrap_or("auto"),
        target_lang,
        output.stats.translated_chunks,
        output.stats.total_chunks
    );

    Ok(Json(TranslateResponse {
        translated_text: output.translated_text,
    }))
}

// POST /api/generate-pdf
async fn generate_pdf_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePdfBody>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload.map_err(json_rejection)?;

    let name = body.file_name.as_deref().map(sanitize_file_name);
    let text = body.text.unwrap_or_default();
    let pdf = convert::generate_pdf(&text, name.as_deref(), &state.geometry)
        .await
        .map_err(|e| doc_error(e, GENERATE_FAILED))?;
    info!(
        "[POST /api/generate-pdf] '{}': {} page(s)",
        pdf.file_name, pdf.page_count
    );

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", pdf.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"translated.pdf\""));
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf.bytes,
    )
        .into_response())
}

// GET /api/languages
async fn languages_handler() -> Json<&'static [Language]> {
    Json(&LANGUAGES[..])
}

// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Strip characters that would break out of a quoted header parameter.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect::<String>()
        .trim()
        .to_string()
}

// ── Router / serve ───────────────────────────────────────────────────────

/// Build the application router.
///
/// The translation provider is resolved once here and shared by every
/// request.
pub fn router(translation: TranslationConfig, server: &ServerConfig) -> Result<Router, DocError> {
    let mut translation = translation;
    if translation.provider.is_none() {
        translation.provider = Some(provider::resolve_provider(&translation)?);
    }

    let state = AppState {
        translation: Arc::new(translation),
        geometry: server.geometry,
        start_time: Instant::now(),
    };

    let app = Router::new()
        .route("/api/extract", post(extract_handler))
        .route("/api/translate", post(translate_handler))
        .route("/api/generate-pdf", post(generate_pdf_handler))
        .route("/api/languages", get(languages_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(server.max_upload_bytes))
        .with_state(state);

    Ok(if server.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    })
}

/// Bind `server.bind` and serve until Ctrl-C.
pub async fn serve(translation: TranslationConfig, server: ServerConfig) -> Result<(), DocError> {
    let failed = |detail: String| DocError::ServerFailed {
        bind: server.bind.clone(),
        detail,
    };

    let app = router(translation, &server)?;
    let listener = tokio::net::TcpListener::bind(&server.bind)
        .await
        .map_err(|e| failed(e.to_string()))?;
    let addr = listener.local_addr().map_err(|e| failed(e.to_string()))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| failed(e.to_string()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
