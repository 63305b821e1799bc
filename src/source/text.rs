//! Plain-text sources.

use crate::toc::PageTextProvider;

/// Page break character used by `pdftotext` and similar tools.
pub const FORM_FEED: char = '\u{0C}';

/// Split text into trimmed, non-blank lines.
pub fn lines_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Text split into physical pages on form feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedText {
    pages: Vec<String>,
}

impl PagedText {
    /// Split `text` on form feeds. A trailing form feed does not open an
    /// extra empty page.
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(FORM_FEED).map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    /// Wrap already-split page texts.
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// True if `text` contains at least one page break.
    pub fn is_paged(text: &str) -> bool {
        text.contains(FORM_FEED)
    }

    /// `(page_number, page_text)` pairs, 1-based.
    pub fn pages(&self) -> Vec<(u32, String)> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, text)| (i as u32 + 1, text.clone()))
            .collect()
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if there are no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageTextProvider for PagedText {
    fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Option<String> {
        let index = (page as usize).checked_sub(1)?;
        self.pages.get(index).cloned()
    }
}
