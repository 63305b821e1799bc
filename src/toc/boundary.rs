//! TOC region detection.
//!
//! Finds the contiguous run of lines between the TOC title ("目录",
//! "Contents") and the first line that clearly belongs to the document body.

use super::classifier::{is_toc_title, match_heading, GrammarKind, LineClassifier};
use crate::config::TocParserConfig;

/// A non-blank input line, optionally tagged with its physical page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Trimmed line text
    pub text: String,
    /// 1-based physical page the line came from, if known
    pub page: Option<u32>,
}

impl SourceLine {
    /// Create a line with no page information.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: None,
        }
    }

    /// Create a line tagged with its page.
    pub fn on_page(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page: Some(page),
        }
    }
}

/// Why a TOC region stopped where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionEnd {
    /// A line starting with an appendix marker that is not itself an entry
    Appendix,
    /// A top-level heading without a page number repeating the first TOC heading
    BodyRestart,
    /// Input ran out before any end marker
    EndOfInput,
}

/// The detected TOC region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocRegion {
    /// Lines strictly between the title and the end marker
    pub lines: Vec<SourceLine>,
    /// Why the region ended
    pub end: RegionEnd,
    /// The line that ended the region (excluded from `lines`)
    pub end_line: Option<SourceLine>,
    /// Page of the TOC title line, if a title was found and pages are known
    pub title_page: Option<u32>,
    /// Whether the region was anchored on a TOC title line
    pub has_title: bool,
}

impl TocRegion {
    /// Iterate over the region's line texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// First and last physical page covered by the region's lines.
    pub fn page_span(&self) -> Option<(u32, u32)> {
        let mut pages = self.lines.iter().filter_map(|l| l.page);
        let first = pages.next()?;
        let last = pages.last().unwrap_or(first);
        Some((first, last))
    }

    /// True if the region holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Locates the TOC region in an ordered line stream.
#[derive(Debug, Clone)]
pub struct BoundaryDetector {
    classifier: LineClassifier,
    /// Refuse to produce a region without a TOC title line (default: true)
    pub require_title: bool,
}

impl Default for BoundaryDetector {
    fn default() -> Self {
        Self::from_config(&TocParserConfig::default())
    }
}

impl BoundaryDetector {
    /// Create a detector with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector from parser configuration.
    pub fn from_config(config: &TocParserConfig) -> Self {
        Self {
            classifier: LineClassifier::from_config(config),
            require_title: config.require_title,
        }
    }

    /// Find the TOC region in a flat list of lines.
    ///
    /// Returns `None` if no title line exists and a title is required.
    pub fn extract_region<S: AsRef<str>>(&self, lines: &[S]) -> Option<TocRegion> {
        let lines = lines
            .iter()
            .map(|l| l.as_ref().trim())
            .filter(|l| !l.is_empty())
            .map(SourceLine::new)
            .collect();
        self.scan(lines)
    }

    /// Find the TOC region in `(page_number, page_text)` pairs.
    pub fn extract_region_pages(&self, pages: &[(u32, String)]) -> Option<TocRegion> {
        let lines = pages
            .iter()
            .flat_map(|(page, text)| {
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(move |l| SourceLine::on_page(l, *page))
            })
            .collect();
        self.scan(lines)
    }

    fn scan(&self, lines: Vec<SourceLine>) -> Option<TocRegion> {
        let title_index = lines.iter().position(|l| is_toc_title(&l.text));

        let (start, title_page) = match title_index {
            Some(index) => {
                log::debug!("TOC title found at line {}", index);
                (index + 1, lines[index].page)
            },
            None if self.require_title => {
                log::debug!("No TOC title line in {} lines", lines.len());
                return None;
            },
            None => (0, None),
        };

        let mut region = Vec::new();
        let mut first_top_label: Option<String> = None;
        let mut entries_seen = 0usize;

        for line in lines.into_iter().skip(start) {
            if let Some(entry) = self.classifier.classify(&line.text) {
                entries_seen += 1;
                if first_top_label.is_none() && entry.grammar.is_some_and(is_top_level_shape) {
                    first_top_label = entry.label().map(str::to_string);
                }
                region.push(line);
                continue;
            }

            if let Some(end) = self.end_marker(&line.text, entries_seen, first_top_label.as_deref()) {
                log::debug!("TOC region ends at {:?} ({:?})", line.text, end);
                return Some(TocRegion {
                    lines: region,
                    end,
                    end_line: Some(line),
                    title_page,
                    has_title: title_index.is_some(),
                });
            }

            region.push(line);
        }

        Some(TocRegion {
            lines: region,
            end: RegionEnd::EndOfInput,
            end_line: None,
            title_page,
            has_title: title_index.is_some(),
        })
    }

    /// Check a non-entry line for a region end marker.
    fn end_marker(&self, text: &str, entries_seen: usize, first_top: Option<&str>) -> Option<RegionEnd> {
        let heading = match_heading(text)?;

        if heading.kind == GrammarKind::Appendix {
            return Some(RegionEnd::Appendix);
        }

        if entries_seen > 0
            && is_top_level_shape(heading.kind)
            && !self.classifier.has_page_token(text)
            && first_top == Some(heading.label.as_str())
        {
            return Some(RegionEnd::BodyRestart);
        }

        None
    }
}

/// Heading shapes that open a top-level body section.
fn is_top_level_shape(kind: GrammarKind) -> bool {
    matches!(
        kind,
        GrammarKind::Numeric1 | GrammarKind::BareInteger | GrammarKind::ChineseChapter
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_starts_after_title_and_ends_at_appendix() {
        let lines = [
            "封面",
            "目录",
            "1. 总则..........1",
            "1.1 编制依据......1",
            "附件一 xxx",
            "正文",
        ];
        let region = BoundaryDetector::new().extract_region(&lines).unwrap();
        let texts: Vec<_> = region.texts().collect();
        assert_eq!(texts, vec!["1. 总则..........1", "1.1 编制依据......1"]);
        assert_eq!(region.end, RegionEnd::Appendix);
        assert_eq!(region.end_line.unwrap().text, "附件一 xxx");
        assert!(region.has_title);
    }

    #[test]
    fn test_no_title_yields_none() {
        let lines = ["1. 总则..........1", "2. 术语..........3"];
        assert!(BoundaryDetector::new().extract_region(&lines).is_none());
    }

    #[test]
    fn test_no_title_scans_everything_when_not_required() {
        let config = TocParserConfig::new().with_require_title(false);
        let detector = BoundaryDetector::from_config(&config);
        let lines = ["1. 总则..........1", "2. 术语..........3"];
        let region = detector.extract_region(&lines).unwrap();
        assert_eq!(region.lines.len(), 2);
        assert!(!region.has_title);
        assert_eq!(region.end, RegionEnd::EndOfInput);
    }

    #[test]
    fn test_appendix_entries_stay_inside_region() {
        let lines = [
            "目录",
            "1. 总则..........1",
            "附件一 环评委托书......45",
            "附图1 地理位置图......46",
            "附表",
        ];
        let region = BoundaryDetector::new().extract_region(&lines).unwrap();
        assert_eq!(region.lines.len(), 3);
        assert_eq!(region.end, RegionEnd::Appendix);
    }

    #[test]
    fn test_body_restart_ends_region() {
        let lines = [
            "Contents",
            "1 Introduction ....... 1",
            "2 Methods ....... 4",
            "1 Introduction",
            "This report describes ...",
        ];
        let region = BoundaryDetector::new().extract_region(&lines).unwrap();
        assert_eq!(region.lines.len(), 2);
        assert_eq!(region.end, RegionEnd::BodyRestart);
    }

    #[test]
    fn test_deeper_numbering_does_not_end_region() {
        let lines = [
            "目录",
            "1. 总则..........1",
            "1.1 a long wrapped heading that",
            "continues here......2",
            "2. 术语..........3",
        ];
        let region = BoundaryDetector::new().extract_region(&lines).unwrap();
        assert_eq!(region.lines.len(), 4);
        assert_eq!(region.end, RegionEnd::EndOfInput);
    }

    #[test]
    fn test_restart_before_any_entry_is_kept() {
        let lines = ["目录", "1 Introduction", "1.1 Scope ...... 2"];
        let region = BoundaryDetector::new().extract_region(&lines).unwrap();
        assert_eq!(region.lines.len(), 2);
    }

    #[test]
    fn test_pages_tag_lines() {
        let pages = vec![
            (1, "Cover\n".to_string()),
            (2, "目录\n1. 总则....1\n".to_string()),
            (3, "2. 术语....3\n\n附件一 xxx\n".to_string()),
        ];
        let region = BoundaryDetector::new().extract_region_pages(&pages).unwrap();
        assert_eq!(region.title_page, Some(2));
        assert_eq!(region.page_span(), Some((2, 3)));
        assert_eq!(region.lines[1], SourceLine::on_page("2. 术语....3", 3));
    }
}
