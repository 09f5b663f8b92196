//! Line breaking and pagination.
//!
//! Text is reflowed from scratch: every whitespace run, newlines included,
//! separates two words, and words are packed greedily onto lines no wider
//! than the page's usable width. A word that is wider than a line on its
//! own is never split; it gets a line to itself and overflows the margin.
//!
//! Pagination walks a baseline cursor down from the top margin. Before each
//! line is placed, a cursor below `margin + line_height` starts a new page,
//! which yields 51 lines per page at the default geometry.

use crate::config::PageGeometry;
use crate::error::DocError;
use crate::pipeline::metrics;

/// One line of text positioned on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Left edge of the line, in points from the page's left edge.
    pub x: f32,
    /// Baseline, in points from the page's bottom edge.
    pub y: f32,
}

/// Lines placed on one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Break `text` into lines that fit `geometry.usable_width()`.
///
/// # Errors
/// [`DocError::RenderFailed`] if the text contains a character Helvetica
/// cannot show.
pub fn wrap_lines(text: &str, geometry: &PageGeometry) -> Result<Vec<String>, DocError> {
    let max_width = geometry.usable_width();
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        let width = metrics::text_width(&candidate, geometry.font_size).map_err(unencodable)?;

        if width > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Distribute lines over pages. Always returns at least one page.
pub fn paginate(lines: Vec<String>, geometry: &PageGeometry) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut y = geometry.top();

    for text in lines {
        if y < geometry.bottom() {
            pages.push(Page::default());
            y = geometry.top();
        }
        if let Some(page) = pages.last_mut() {
            page.lines.push(PlacedLine {
                text,
                x: geometry.margin,
                y,
            });
        }
        y -= geometry.line_height();
    }
    pages
}

/// Wrap and paginate in one step.
pub fn layout(text: &str, geometry: &PageGeometry) -> Result<Vec<Page>, DocError> {
    Ok(paginate(wrap_lines(text, geometry)?, geometry))
}

fn unencodable(c: char) -> DocError {
    DocError::RenderFailed {
        detail: format!(
            "character {:?} (U+{:04X}) cannot be encoded in WinAnsi for Helvetica",
            c, c as u32
        ),
    }
}
