//! PDF serialisation of laid-out pages.
//!
//! Builds a minimal PDF 1.5 document with `lopdf`: one shared Helvetica
//! font resource, one content stream per page drawing each line with a
//! `BT … Tj … ET` block, and a flat page tree. Content streams are
//! Flate-compressed before saving.

use crate::config::PageGeometry;
use crate::error::DocError;
use crate::pipeline::layout::{self, Page};
use crate::pipeline::metrics;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

const FONT_KEY: &str = "F1";

/// Typeset `text` into a PDF. Returns the file bytes and the page count.
///
/// Empty or whitespace-only text yields a single blank page.
pub fn render_pdf(text: &str, geometry: &PageGeometry) -> Result<(Vec<u8>, usize), DocError> {
    let pages = layout::layout(text, geometry)?;
    let bytes = write_pdf(&pages, geometry)?;
    debug!(
        "Typeset {} lines on {} page(s), {} bytes",
        pages.iter().map(|p| p.lines.len()).sum::<usize>(),
        pages.len(),
        bytes.len()
    );
    Ok((bytes, pages.len()))
}

/// Serialise already-paginated lines.
pub fn write_pdf(pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>, DocError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_KEY => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, geometry)?;
        let encoded = content.encode().map_err(render_failed)?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let page_tree = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(concat!("doctranslate ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(render_failed)?;
    Ok(bytes)
}

fn page_content(page: &Page, geometry: &PageGeometry) -> Result<Content, DocError> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        let encoded = metrics::encode_win_ansi(&line.text).map_err(|c| DocError::RenderFailed {
            detail: format!("character {c:?} cannot be encoded in WinAnsi"),
        })?;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![FONT_KEY.into(), geometry.font_size.into()],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Ok(Content { operations })
}

fn render_failed(e: impl std::fmt::Display) -> DocError {
    DocError::RenderFailed {
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn renders_valid_pdf() {
        let (bytes, pages) = render_pdf("Hello world", &PageGeometry::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(pages, 1);
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn empty_text_is_one_blank_page() {
        let (bytes, pages) = render_pdf("", &PageGeometry::default()).unwrap();
        assert_eq!(pages, 1);
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn long_text_spans_pages() {
        let text = vec!["a".repeat(40); 120].join(" ");
        let (bytes, pages) = render_pdf(&text, &PageGeometry::default()).unwrap();
        assert_eq!(pages, 3);
        assert_eq!(page_count(&bytes), 3);
    }

    #[test]
    fn media_box_is_a4() {
        let (bytes, _) = render_pdf("x", &PageGeometry::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let catalog = doc.catalog().unwrap();
        let pages_id = catalog.get(b"Pages").unwrap().as_reference().unwrap();
        let pages = doc.get_dictionary(pages_id).unwrap();
        let media_box = pages.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box.len(), 4);
        assert_eq!(media_box[2].as_float().unwrap(), 595.0);
        assert_eq!(media_box[3].as_float().unwrap(), 842.0);
    }

    #[test]
    fn unencodable_text_fails_to_render() {
        let err = render_pdf("తెలుగు", &PageGeometry::default()).unwrap_err();
        assert!(matches!(err, DocError::RenderFailed { .. }));
    }
}
