//! Text normalisation applied to every extracted document.
//!
//! PDF and DOCX extractors and plain-text uploads all leak formatting noise:
//! Windows line endings, a UTF-8 byte-order mark, zero-width joiners from
//! copy-pasted web text, and long runs of blank lines where a PDF had
//! vertical whitespace. These rules are deterministic and never touch
//! visible characters, so the translator sees the same words the user does.
//!
//! ## Rule Order
//!
//! Invisible characters go first so a BOM-only line counts as blank; line
//! endings are normalised before per-line trimming; blank-line collapsing
//! and the outer trim run last.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all normalisation rules to freshly extracted text.
///
/// Rules (applied in order):
/// 1. Strip invisible Unicode (BOM, zero-width space/joiners, word joiner, soft hyphen)
/// 2. Normalise line endings (CRLF / CR → LF)
/// 3. Trim trailing whitespace per line
/// 4. Collapse 3+ consecutive blank lines down to 2
/// 5. Drop blank lines at the start and end of the document
pub fn normalize_text(input: &str) -> String {
    let s = remove_invisible_chars(input);
    let s = normalise_line_endings(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    s.trim_matches('\n').to_string()
}

/// `true` if the text has at least one visible character.
pub fn has_visible_text(input: &str) -> bool {
    input.chars().any(|c| !c.is_whitespace() && !is_invisible(c))
}

// ── Rule 1: Remove invisible Unicode characters ─────────────────────────────

const INVISIBLE: [char; 6] = [
    '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
];

fn is_invisible(c: char) -> bool {
    INVISIBLE.contains(&c)
}

fn remove_invisible_chars(input: &str) -> String {
    input.replace(INVISIBLE, "")
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{4,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n\n").to_string()
}
