//! Document sources.
//!
//! Turns files into either a flat line list or per-page text, the two input
//! shapes the parser accepts.

pub mod docx;
pub mod text;

#[cfg(feature = "office")]
pub use docx::read_docx;
pub use docx::paragraphs_from_document_xml;
pub use text::{lines_from_text, PagedText, FORM_FEED};

use crate::config::TocParserConfig;
use crate::error::{Error, Result};
use crate::pipeline::{TocParser, TocResult};
use crate::toc::{BoundaryDetector, FnPages, LineClassifier, PageTextProvider};
use std::path::Path;

/// Loaded document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Ordered lines without page information (DOCX paragraphs, plain text)
    Lines(Vec<String>),
    /// Text with physical page breaks
    Paged(PagedText),
}

impl Source {
    /// Run `parser` over this source.
    ///
    /// `total_pages` overrides the page count. Without it, paged sources use
    /// their own page count and line sources use the largest page declared by
    /// a TOC entry.
    pub fn parse(&self, parser: &TocParser, total_pages: Option<u32>) -> TocResult {
        match self {
            Source::Lines(lines) => {
                let total =
                    total_pages.unwrap_or_else(|| estimate_total_pages(lines, parser.config()));
                parser.parse_lines(lines, total)
            },
            Source::Paged(paged) => match total_pages {
                Some(total) => {
                    let provider = FnPages::new(total, |page| paged.page_text(page));
                    parser.parse_document(&provider)
                },
                None => parser.parse_document(paged),
            },
        }
    }

    /// Number of lines, or of pages for a paged source.
    pub fn len(&self) -> usize {
        match self {
            Source::Lines(lines) => lines.len(),
            Source::Paged(paged) => paged.len(),
        }
    }

    /// True if the source holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Largest declared page among the TOC entries, or 1 without a TOC.
///
/// Only lines inside the detected TOC region count, so trailing numbers in
/// body text never inflate the estimate.
fn estimate_total_pages(lines: &[String], config: &TocParserConfig) -> u32 {
    let Some(region) = BoundaryDetector::from_config(config).extract_region(lines) else {
        return 1;
    };
    LineClassifier::from_config(config)
        .classify_lines(region.texts())
        .iter()
        .map(|e| e.page_start)
        .max()
        .unwrap_or(1)
}

/// Load a document, choosing a reader by file extension.
///
/// # Errors
///
/// [`Error::UnsupportedInput`] for PDF, legacy DOC, and unknown formats, or
/// when `.docx` support is compiled out. I/O, XML, and archive errors
/// propagate.
pub fn load(path: impl AsRef<Path>) -> Result<Source> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let source = match extension.as_str() {
        "txt" | "text" => {
            let text = std::fs::read_to_string(path)?;
            if PagedText::is_paged(&text) {
                Source::Paged(PagedText::from_text(&text))
            } else {
                Source::Lines(lines_from_text(&text))
            }
        },
        "xml" => {
            let xml = std::fs::read_to_string(path)?;
            Source::Lines(paragraphs_from_document_xml(&xml)?)
        },
        "docx" => Source::Lines(load_docx(path)?),
        "doc" => {
            return Err(Error::UnsupportedInput(
                "legacy .doc files must be converted to .docx first".to_string(),
            ))
        },
        "pdf" => {
            return Err(Error::UnsupportedInput(
                "PDF text extraction is not built in; extract text to a .txt file first".to_string(),
            ))
        },
        other => {
            return Err(Error::UnsupportedInput(format!(
                "unsupported file format: .{}",
                other
            )))
        },
    };

    log::info!("Loaded {} ({} units)", path.display(), source.len());
    Ok(source)
}

#[cfg(feature = "office")]
fn load_docx(path: &Path) -> Result<Vec<String>> {
    read_docx(path)
}

#[cfg(not(feature = "office"))]
fn load_docx(_path: &Path) -> Result<Vec<String>> {
    Err(Error::UnsupportedInput(
        ".docx support requires the `office` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_estimate_total_pages() {
        let config = TocParserConfig::default();
        let lines = owned(&["目录", "1. 总则......1", "2. 术语......17", "note 2024"]);
        assert_eq!(estimate_total_pages(&lines, &config), 17);
        assert_eq!(estimate_total_pages(&[], &config), 1);
    }

    #[test]
    fn test_estimate_ignores_body_after_region() {
        let config = TocParserConfig::default();
        let lines = owned(&[
            "目录",
            "1. 总则..........1",
            "2. 术语..........3",
            "附件一 xxx",
            "联系电话：   8000",
        ]);
        assert_eq!(estimate_total_pages(&lines, &config), 3);

        // Numbers outside any TOC are never used
        let no_toc = owned(&["封面", "联系电话：   8000"]);
        assert_eq!(estimate_total_pages(&no_toc, &config), 1);
    }

    #[test]
    fn test_body_numbers_do_not_stretch_last_range() {
        let source = Source::Lines(owned(&[
            "目录",
            "1. 总则..........1",
            "2. 术语..........3",
            "附件一 xxx",
            "联系电话：   8000",
        ]));
        let result = source.parse(&TocParser::new(), None);
        assert_eq!(result.metadata.total_pages, Some(3));
        assert_eq!(result.toc[1].page_range().as_deref(), Some("3-3"));
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["report.pdf", "report.doc", "report.rtf", "README"] {
            assert!(
                matches!(load(name), Err(Error::UnsupportedInput(_))),
                "{name} should be rejected"
            );
        }
    }
}
