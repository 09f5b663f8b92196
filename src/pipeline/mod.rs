//! Pipeline stages for document translation.
//!
//! Each submodule implements exactly one transformation step, so each can
//! be tested on its own and the provider can be swapped without touching
//! extraction or typesetting.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──▶ chunk ──▶ provider ──▶ layout ──▶ typeset
//! (PDF/DOCX/TXT) (cleanup)  (5000 ch) (HTTP)     (wrap/paginate) (lopdf)
//! ```
//!
//! 1. [`extract`]   — dispatch on file suffix; PDF parsing runs in
//!    `spawn_blocking`, DOCX goes through [`docx`]
//! 2. [`normalize`] — opt-in whitespace and invisible-character cleanup
//! 3. [`chunk`]     — fixed-width chunking and per-chunk fallback
//! 4. [`provider`]  — the translation service; the only stage with network I/O
//! 5. [`layout`]    — greedy word wrap and pagination, measured with [`metrics`]
//! 6. [`typeset`]   — serialise pages as a PDF with the standard Helvetica font

pub mod chunk;
pub mod docx;
pub mod extract;
pub mod layout;
pub mod metrics;
pub mod normalize;
pub mod provider;
pub mod typeset;
