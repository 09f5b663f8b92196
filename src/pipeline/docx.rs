//! Raw text extraction from Office Open XML (`.docx`) documents.
//!
//! A DOCX file is a ZIP archive; the body lives in `word/document.xml` as a
//! sequence of paragraphs (`<w:p>`) containing runs with text (`<w:t>`),
//! tabs (`<w:tab/>`) and line breaks (`<w:br/>`, `<w:cr/>`). Raw extraction
//! ignores styling, headers, footers and footnotes: it emits run text in
//! document order and terminates every paragraph with a blank line.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Cursor, Read};
use thiserror::Error;

const BODY_PART: &str = "word/document.xml";

/// Why a DOCX body could not be read.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive has no word/document.xml")]
    MissingBody,

    #[error("could not read word/document.xml: {0}")]
    Read(#[from] std::io::Error),
}

/// Paragraph properties hold tab-stop definitions (`<w:tabs><w:tab …/>`)
/// that must not be mistaken for tab characters.
static RE_PARAGRAPH_PROPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:pPr(?:\s[^>]*)?>.*?</w:pPr>").unwrap());

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)<w:t(?:\s[^>]*)?>(?P<text>.*?)</w:t>|<w:tab(?:\s[^>]*)?/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>|<w:p(?:\s[^>]*)?/>",
    )
    .unwrap()
});

/// Extract the raw text of a DOCX document held in memory.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut body = match archive.by_name(BODY_PART) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Err(DocxError::MissingBody),
        Err(e) => return Err(DocxError::Archive(e)),
    };

    let mut xml = String::new();
    body.read_to_string(&mut xml)?;
    Ok(document_xml_to_text(&xml))
}

/// Convert the XML of `word/document.xml` into plain text.
pub fn document_xml_to_text(xml: &str) -> String {
    let xml = RE_PARAGRAPH_PROPS.replace_all(xml, "");
    let mut out = String::with_capacity(xml.len() / 4);

    for caps in RE_TOKEN.captures_iter(&xml) {
        if let Some(text) = caps.name("text") {
            out.push_str(&html_escape::decode_html_entities(text.as_str()));
            continue;
        }
        let token = &caps[0];
        if token.starts_with("<w:tab") {
            out.push('\t');
        } else if token.starts_with("<w:br") || token.starts_with("<w:cr") {
            out.push('\n');
        } else {
            out.push_str("\n\n");
        }
    }

    out
}
