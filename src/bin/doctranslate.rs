//! CLI binary for doctranslate.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `TranslationConfig` / `ServerConfig` and prints results.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doctranslate::{
    convert, languages, server, OutputFormat, PageGeometry, ProgressCallback, TranslateRequest,
    TranslationConfig, TranslationProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar counting chunks, plus a log line for
/// every chunk that kept its original text. Chunks finish out of order, so
/// the bar only ever counts.
struct CliProgressCallback {
    bar: ProgressBar,
    fallbacks: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(TICKS),
        );
        bar.set_prefix("Preparing");
        bar.set_message("Extracting text…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            fallbacks: AtomicUsize::new(0),
        })
    }
}

impl TranslationProgressCallback for CliProgressCallback {
    fn on_translation_start(&self, total_chunks: usize) {
        self.bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} chunks  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(TICKS),
        );
        self.bar.set_length(total_chunks as u64);
        self.bar.set_prefix("Translating");
        self.bar.set_message("");
    }

    fn on_chunk_complete(&self, _chunk: usize, _total: usize, _translated_len: usize) {
        self.bar.inc(1);
    }

    fn on_chunk_fallback(&self, chunk: usize, total: usize, error: &str) {
        self.fallbacks.fetch_add(1, Ordering::SeqCst);
        let msg: String = if error.chars().count() > 80 {
            error.chars().take(79).chain(['\u{2026}']).collect()
        } else {
            error.to_string()
        };
        self.bar.println(format!(
            "  {} Chunk {:>3}/{:<3}  {}  {}",
            red("✗"),
            chunk + 1,
            total,
            red(&msg),
            dim("(kept original text)"),
        ));
        self.bar.inc(1);
    }

    fn on_translation_complete(&self, total_chunks: usize, translated_chunks: usize) {
        self.bar.finish_and_clear();
        let fallbacks = self.fallbacks.load(Ordering::SeqCst);
        if fallbacks == 0 {
            eprintln!(
                "{} {} chunks translated",
                green("✔"),
                bold(&translated_chunks.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} chunks translated  ({} kept original text)",
                cyan("⚠"),
                bold(&translated_chunks.to_string()),
                total_chunks,
                red(&fallbacks.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Translate a PDF to Telugu, write translated_report.txt next to it
  doctranslate translate report.pdf

  # Translate a Word document to French as a typeset PDF
  doctranslate translate letter.docx --to fr --format pdf -o letter_fr.pdf

  # Just extract the text
  doctranslate extract report.pdf

  # Typeset an existing text file
  doctranslate render notes.txt -o notes.pdf

  # Run the HTTP API
  doctranslate serve --bind 0.0.0.0:3000 --cors

ENVIRONMENT VARIABLES:
  DOCTRANSLATE_TARGET       Default target language (te)
  DOCTRANSLATE_SOURCE       Default source language (auto)
  DOCTRANSLATE_ENDPOINT     Translation endpoint URL override
  DOCTRANSLATE_CHUNK_SIZE   Characters per provider call (5000)
  DOCTRANSLATE_CONCURRENCY  Max in-flight provider calls (all)
  DOCTRANSLATE_TIMEOUT      Per-request timeout in seconds (30)
  DOCTRANSLATE_NORMALIZE    Clean up extracted text before translating (off)
  DOCTRANSLATE_BIND         Server bind address (127.0.0.1:3000)
  RUST_LOG                  Log filter, overrides -v / -q

NOTE:
  Generated PDFs use the standard Helvetica font, which only covers
  Western European scripts. Use --format text for other scripts.
"#;

/// Extract, translate and re-typeset PDF, DOCX and plain-text documents.
#[derive(Parser, Debug)]
#[command(
    name = "doctranslate",
    version,
    about = "Extract, translate and re-typeset PDF, DOCX and plain-text documents",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "DOCTRANSLATE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "DOCTRANSLATE_QUIET")]
    quiet: bool,

    /// Disable progress bar.
    #[arg(long, global = true, env = "DOCTRANSLATE_NO_PROGRESS")]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Socket address to listen on.
        #[arg(long, env = "DOCTRANSLATE_BIND", default_value = "127.0.0.1:3000")]
        bind: String,

        /// Largest accepted upload in MiB.
        #[arg(long, env = "DOCTRANSLATE_MAX_UPLOAD_MB", default_value_t = 25)]
        max_upload_mb: usize,

        /// Send permissive CORS headers.
        #[arg(long, env = "DOCTRANSLATE_CORS")]
        cors: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Print the text of a PDF, DOCX or TXT file.
    Extract {
        input: PathBuf,

        /// Write text to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output `{text, fileName, format}` as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Translate a PDF, DOCX or TXT file.
    Translate {
        input: PathBuf,

        /// Target language code (see `doctranslate languages`).
        #[arg(short, long, env = "DOCTRANSLATE_TARGET", default_value = languages::DEFAULT_TARGET)]
        to: String,

        /// Source language code; auto-detected when omitted.
        #[arg(short, long, env = "DOCTRANSLATE_SOURCE")]
        from: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Output path. Default: translated_<stem>.<ext> next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the translation to stdout instead of writing a file (text only).
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Clean up line endings, invisible characters and blank-line runs
        /// before translating.
        #[arg(long, env = "DOCTRANSLATE_NORMALIZE")]
        normalize: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Typeset a UTF-8 text file as a PDF.
    Render {
        input: PathBuf,

        /// Output path. Default: <stem>.pdf next to the input.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the offered target languages.
    Languages {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ProviderArgs {
    /// Translation endpoint URL override.
    #[arg(long, env = "DOCTRANSLATE_ENDPOINT")]
    endpoint: Option<String>,

    /// Characters per provider call.
    #[arg(long, env = "DOCTRANSLATE_CHUNK_SIZE", default_value_t = doctranslate::config::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Max in-flight provider calls. Default: all chunks at once.
    #[arg(short, long, env = "DOCTRANSLATE_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "DOCTRANSLATE_TIMEOUT", default_value_t = 30)]
    timeout: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Pdf,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Pdf => OutputFormat::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs during a file translation.
    let show_progress = !cli.quiet
        && !cli.no_progress
        && matches!(cli.command, Command::Translate { stdout: false, .. });
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            bind,
            max_upload_mb,
            cors,
            provider,
        } => {
            let config = build_config(&provider, None)?;
            let server_config = server::ServerConfig {
                bind,
                max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
                cors,
                ..Default::default()
            };
            server::serve(config, server_config)
                .await
                .context("Server failed")?;
        }

        Command::Extract {
            input,
            output,
            json,
        } => {
            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let extracted = convert::extract_document(&bytes, &file_name_of(&input))
                .await
                .context("Extraction failed")?;

            let rendered = if json {
                serde_json::to_string_pretty(&extracted).context("Failed to serialise output")?
            } else {
                extracted.text
            };
            emit(&rendered, output.as_deref()).await?;
        }

        Command::Translate {
            input,
            to,
            from,
            format,
            output,
            stdout,
            normalize,
            provider,
        } => {
            let progress: Option<ProgressCallback> = if show_progress {
                Some(CliProgressCallback::new() as Arc<dyn TranslationProgressCallback>)
            } else {
                None
            };
            let mut config = build_config(&provider, progress)?;
            config.normalize_text = normalize;
            let mut request = TranslateRequest::new(to).format(format.into());
            if let Some(from) = from {
                request = request.source_lang(from);
            }

            if stdout {
                let bytes = tokio::fs::read(&input)
                    .await
                    .with_context(|| format!("Failed to read {}", input.display()))?;
                let result =
                    convert::translate_document(&bytes, &file_name_of(&input), &request, &config)
                        .await
                        .context("Translation failed")?;
                emit(&result.translation.translated_text, None).await?;
                return Ok(());
            }

            let (path, result) =
                convert::translate_file(&input, output.as_deref(), &request, &config)
                    .await
                    .context("Translation failed")?;
            if !cli.quiet {
                let stats = &result.translation.stats;
                eprintln!(
                    "{}  {}/{} chunks  {}ms  →  {}",
                    if stats.fallback_chunks == 0 {
                        green("✔")
                    } else {
                        cyan("⚠")
                    },
                    stats.translated_chunks,
                    stats.total_chunks,
                    stats.duration_ms,
                    bold(&path.display().to_string()),
                );
            }
        }

        Command::Render { input, output } => {
            let text = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned());
            let pdf = convert::generate_pdf(&text, stem.as_deref(), &PageGeometry::default())
                .await
                .context("Rendering failed")?;

            let path = output.unwrap_or_else(|| input.with_file_name(&pdf.file_name));
            tokio::fs::write(&path, &pdf.bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !cli.quiet {
                eprintln!(
                    "{}  {} page(s)  →  {}",
                    green("✔"),
                    pdf.page_count,
                    bold(&path.display().to_string())
                );
            }
        }

        Command::Languages { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&languages::LANGUAGES[..])
                        .context("Failed to serialise languages")?
                );
            } else {
                for lang in languages::LANGUAGES.iter() {
                    let marker = if lang.code == languages::DEFAULT_TARGET {
                        dim(" (default)")
                    } else {
                        String::new()
                    };
                    println!("{:<4} {}{}", lang.code, lang.name, marker);
                }
            }
        }
    }

    Ok(())
}

/// Map provider flags to `TranslationConfig`.
fn build_config(args: &ProviderArgs, progress: Option<ProgressCallback>) -> Result<TranslationConfig> {
    let mut builder = TranslationConfig::builder()
        .chunk_size(args.chunk_size)
        .request_timeout_secs(args.timeout);
    if let Some(n) = args.concurrency {
        builder = builder.concurrency(n);
    }
    if let Some(ref url) = args.endpoint {
        builder = builder.endpoint(url.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }
    builder.build().context("Invalid configuration")
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write `text` to `path`, or to stdout with a trailing newline.
async fn emit(text: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        return tokio::fs::write(path, text)
            .await
            .with_context(|| format!("Failed to write {}", path.display()));
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
