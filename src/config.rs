//! Configuration for TOC parsing.

/// TOC parsing configuration.
///
/// Every stage of [`TocParser`](crate::pipeline::TocParser) reads its knobs
/// from here, so a single value fully describes a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocParserConfig {
    /// Lines shorter than this many characters (after trimming) are never entries.
    pub min_line_length: usize,

    /// Minimum width of a whitespace gap before a trailing page number.
    /// A gap containing a tab always qualifies.
    pub min_gap_width: usize,

    /// Largest page number accepted in a TOC line.
    pub max_page_number: u32,

    /// Number of leading pages scanned for the TOC in paged sources.
    pub max_scan_pages: usize,

    /// Correction added to declared page numbers to obtain physical pages.
    pub page_offset: i64,

    /// Require a TOC title line before collecting entries.
    pub require_title: bool,

    /// Bind page text to leaf entries when parsing a paged document.
    pub bind_content: bool,
}

impl Default for TocParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TocParserConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            min_line_length: 5,
            min_gap_width: 2,
            max_page_number: 9999,
            max_scan_pages: 10,
            page_offset: 0,
            require_title: true,
            bind_content: false,
        }
    }

    /// Set the minimum line length.
    pub fn with_min_line_length(mut self, len: usize) -> Self {
        self.min_line_length = len;
        self
    }

    /// Set the minimum whitespace gap before a page number.
    pub fn with_min_gap_width(mut self, width: usize) -> Self {
        self.min_gap_width = width.max(1);
        self
    }

    /// Set the largest accepted page number.
    pub fn with_max_page_number(mut self, max: u32) -> Self {
        self.max_page_number = max.max(1);
        self
    }

    /// Set how many leading pages are scanned for the TOC.
    pub fn with_max_scan_pages(mut self, pages: usize) -> Self {
        self.max_scan_pages = pages;
        self
    }

    /// Set the declared-to-physical page offset.
    pub fn with_page_offset(mut self, offset: i64) -> Self {
        self.page_offset = offset;
        self
    }

    /// Require (or not) a TOC title line.
    pub fn with_require_title(mut self, require: bool) -> Self {
        self.require_title = require;
        self
    }

    /// Enable content binding.
    pub fn with_bind_content(mut self, enable: bool) -> Self {
        self.bind_content = enable;
        self
    }
}
