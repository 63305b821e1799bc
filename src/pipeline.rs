//! End-to-end TOC parsing pipeline.
//!
//! [`TocParser`] runs the stages in `toc` in order and packages the outcome
//! as a [`TocResult`]. Pipeline-level failures (no TOC title, no entries)
//! never escape as errors: they become an unsuccessful result with an empty
//! outline, so callers can serialize whatever comes back.

use crate::config::TocParserConfig;
use crate::error::{Error, Result};
use crate::toc::{
    assign_page_ends, build_hierarchy, propagate_spans, BoundaryDetector, ContentBinder,
    LineClassifier, SharedProvider, TocEntry, TocRegion,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Category of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// The source could not be read as text
    UnsupportedInput,
    /// No TOC title line was found
    TocNotFound,
    /// A region was found but no entries were recognized
    NoEntriesExtracted,
}

impl From<&Error> for FailureKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::TocNotFound => FailureKind::TocNotFound,
            Error::NoEntriesExtracted => FailureKind::NoEntriesExtracted,
            _ => FailureKind::UnsupportedInput,
        }
    }
}

/// Summary statistics over the flat entry list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TocMetadata {
    /// Number of recognized entries
    pub total_sections: usize,
    /// Entry count per level, ascending by level
    pub level_stats: BTreeMap<u32, usize>,
    /// Physical page count used for range resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Name of the source document, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TocMetadata {
    fn from_entries(entries: &[TocEntry], total_pages: u32) -> Self {
        let mut level_stats = BTreeMap::new();
        for entry in entries {
            *level_stats.entry(entry.level).or_insert(0) += 1;
        }
        Self {
            total_sections: entries.len(),
            level_stats,
            total_pages: Some(total_pages),
            source: None,
        }
    }
}

/// Outcome of a parse: the outline on success, an error message otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct TocResult {
    /// Whether an outline was produced
    pub success: bool,
    /// Failure description when `success` is false
    pub error: Option<String>,
    /// Statistics
    pub metadata: TocMetadata,
    /// Resolved outline forest
    pub toc: Vec<TocEntry>,
    /// Entries in document order after the first range pass
    pub flat_list: Vec<TocEntry>,
    #[serde(skip)]
    failure: Option<FailureKind>,
}

impl TocResult {
    /// Build an unsuccessful result from a pipeline error.
    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            metadata: TocMetadata::default(),
            toc: Vec::new(),
            flat_list: Vec::new(),
            failure: Some(FailureKind::from(err)),
        }
    }

    fn outline(toc: Vec<TocEntry>, flat_list: Vec<TocEntry>, total_pages: u32) -> Self {
        Self {
            success: true,
            error: None,
            metadata: TocMetadata::from_entries(&flat_list, total_pages),
            toc,
            flat_list,
            failure: None,
        }
    }

    /// Record the source document name in the metadata.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }

    /// The failure category, if the parse was unsuccessful.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Pretty JSON rendering of the result.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Indented text listing of the outline.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        if !self.success {
            let _ = writeln!(out, "❌ {}", self.error.as_deref().unwrap_or("unknown error"));
            return out;
        }
        for root in &self.toc {
            render_node(&mut out, root, 0);
        }
        let _ = write!(out, "{} sections", self.metadata.total_sections);
        for (level, count) in &self.metadata.level_stats {
            let _ = write!(out, ", level {}: {}", level, count);
        }
        out.push('\n');
        out
    }
}

fn render_node(out: &mut String, node: &TocEntry, depth: usize) {
    let icon = if node.is_leaf() { "📄" } else { "📁" };
    let label = node.label().map(|l| format!("{} ", l)).unwrap_or_default();
    let pages = node
        .page_range()
        .unwrap_or_else(|| node.page_start.to_string());
    let _ = writeln!(
        out,
        "{}{} {}{} (pages {})",
        "  ".repeat(depth),
        icon,
        label,
        node.title,
        pages
    );
    for child in &node.children {
        render_node(out, child, depth + 1);
    }
}

/// The TOC parsing pipeline.
#[derive(Debug, Clone)]
pub struct TocParser {
    config: TocParserConfig,
    detector: BoundaryDetector,
    classifier: LineClassifier,
    binder: ContentBinder,
}

impl TocParser {
    /// Create a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(TocParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: TocParserConfig) -> Self {
        Self {
            detector: BoundaryDetector::from_config(&config),
            classifier: LineClassifier::from_config(&config),
            binder: ContentBinder::with_offset(config.page_offset),
            config,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &TocParserConfig {
        &self.config
    }

    /// Parse an ordered list of lines from a document of `total_pages` pages.
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S], total_pages: u32) -> TocResult {
        self.finish(self.detector.extract_region(lines), total_pages)
    }

    /// Parse `(page_number, page_text)` pairs from a document of `total_pages` pages.
    pub fn parse_pages(&self, pages: &[(u32, String)], total_pages: u32) -> TocResult {
        self.finish(self.detector.extract_region_pages(pages), total_pages)
    }

    /// Parse a paged document.
    ///
    /// Only the first `max_scan_pages` pages are scanned for the TOC. When
    /// `bind_content` is set, every leaf receives the text of its page range.
    pub fn parse_document<P>(&self, provider: &P) -> TocResult
    where
        P: SharedProvider + ?Sized,
    {
        let total_pages = provider.total_pages();
        let scanned = (total_pages as usize).min(self.config.max_scan_pages) as u32;
        let pages: Vec<(u32, String)> = (1..=scanned)
            .map(|page| (page, provider.page_text(page).unwrap_or_default()))
            .collect();
        log::debug!("Scanning {} of {} pages for a TOC", scanned, total_pages);

        let mut result = self.parse_pages(&pages, total_pages);
        if result.success && self.config.bind_content {
            let toc = std::mem::take(&mut result.toc);
            result.toc = self.binder.bind_forest(toc, provider);
        }
        result
    }

    fn finish(&self, region: Option<TocRegion>, total_pages: u32) -> TocResult {
        match self.build(region, total_pages) {
            Ok((toc, flat_list)) => TocResult::outline(toc, flat_list, total_pages),
            Err(e) => {
                log::info!("TOC parsing failed: {}", e);
                TocResult::failure(&e)
            },
        }
    }

    fn build(&self, region: Option<TocRegion>, total_pages: u32) -> Result<(Vec<TocEntry>, Vec<TocEntry>)> {
        let region = region.ok_or(Error::TocNotFound)?;
        if let Some((first, last)) = region.page_span() {
            log::debug!("TOC region spans pages {}-{}", first, last);
        }

        let entries = self.classifier.classify_lines(region.texts());
        if entries.is_empty() {
            return Err(Error::NoEntriesExtracted);
        }

        let flat_list = assign_page_ends(entries, total_pages);
        let toc = propagate_spans(build_hierarchy(flat_list.clone()));
        log::info!(
            "Extracted {} TOC entries ({} top-level)",
            flat_list.len(),
            toc.len()
        );
        Ok((toc, flat_list))
    }
}

impl Default for TocParser {
    fn default() -> Self {
        Self::new()
    }
}
