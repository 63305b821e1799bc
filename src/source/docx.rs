//! DOCX paragraph extraction.
//!
//! A `.docx` file is a zip archive; the body text lives in
//! `word/document.xml` as WordprocessingML. Each `w:p` paragraph becomes one
//! line, with runs (`w:t`) concatenated and `w:tab` rendered as `\t`.

use crate::error::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

#[cfg(feature = "office")]
use std::path::Path;

/// Archive member holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph texts from a `word/document.xml` body.
///
/// `w:br` and `w:cr` split a paragraph into separate lines. Tab stop
/// definitions inside paragraph properties (`w:pPr`) are not content and are
/// skipped. Blank paragraphs are kept as empty strings so line positions
/// match the document.
pub fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;
    let mut properties_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                },
                b"pPr" => properties_depth += 1,
                b"t" => in_text = true,
                _ => {},
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" if in_paragraph && properties_depth == 0 => current.push('\t'),
                b"br" | b"cr" if in_paragraph => {
                    paragraphs.push(std::mem::take(&mut current));
                },
                _ => {},
            },
            Event::Text(ref e) if in_text => {
                current.push_str(&e.unescape()?);
            },
            Event::CData(ref e) if in_text => {
                current.push_str(&String::from_utf8_lossy(e));
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"p" => {
                    paragraphs.push(std::mem::take(&mut current));
                    in_paragraph = false;
                },
                b"pPr" => properties_depth = properties_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    log::debug!("Read {} paragraphs from document XML", paragraphs.len());
    Ok(paragraphs)
}

/// Read the paragraphs of a `.docx` file.
#[cfg(feature = "office")]
pub fn read_docx(path: impl AsRef<Path>) -> Result<Vec<String>> {
    use std::io::Read;

    let file = std::fs::File::open(path.as_ref())?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut part = archive.by_name(DOCUMENT_PART)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    paragraphs_from_document_xml(&xml)
}
