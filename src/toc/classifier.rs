//! TOC line classification.
//!
//! Decides whether a single text line is a table of contents entry and, if so,
//! extracts its numbering path, title, nesting level, and declared page.
//!
//! A line qualifies when two independent checks pass:
//!
//! 1. It ends with a page token: a leader run (`......`, `…`) or a wide
//!    whitespace gap, followed by 1-4 digits in the accepted page range.
//! 2. The text before the page token starts with one of the heading grammars
//!    in [`GrammarKind::PRIORITY`], tried in that order.
//!
//! Classification is a pure function of the line; rejected lines are simply
//! not entries.

use super::entry::TocEntry;
use crate::config::TocParserConfig;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A line consisting solely of a TOC section title
    static ref RE_TOC_TITLE: Regex =
        Regex::new(r"(?i)^(?:目\s*录|contents|table\s+of\s+contents)$").unwrap();

    /// Leader run (2+ dots or any ellipsis) followed by the page digits
    static ref RE_LEADER_PAGE: Regex =
        Regex::new(r"(?:[.．·]{2,}|…+)[\s.．·…]*(\d{1,4})\s*$").unwrap();

    /// Whitespace gap followed by the page digits
    static ref RE_GAP_PAGE: Regex = Regex::new(r"(\s+)(\d{1,4})\s*$").unwrap();

    /// Leader runs left inside a title
    static ref RE_LEADER_RUN: Regex = Regex::new(r"[.．·]{2,}|…+").unwrap();

    /// Any whitespace run
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Four or more components; deeper paths stay at level 4
    static ref RE_NUMERIC4: Regex = Regex::new(r"^(\d+(?:\.\d+){3,})\.?").unwrap();
    static ref RE_NUMERIC3: Regex = Regex::new(r"^(\d+(?:\.\d+){2})\.?").unwrap();
    static ref RE_NUMERIC2: Regex = Regex::new(r"^(\d+\.\d+)\.?").unwrap();
    static ref RE_NUMERIC1: Regex = Regex::new(r"^(\d+)\.").unwrap();
    static ref RE_CHINESE_CHAPTER: Regex =
        Regex::new(r"^(第[一二三四五六七八九十百千零〇两\d]+[章节篇])").unwrap();
    static ref RE_CHINESE_CLAUSE: Regex =
        Regex::new(r"^(第[一二三四五六七八九十百千零〇两\d]+(?:条|款|部分))").unwrap();
    static ref RE_APPENDIX: Regex =
        Regex::new(r"^(附[件图表录](?:[一二三四五六七八九十\d]+|[A-Z])?)").unwrap();
    static ref RE_ROMAN: Regex = Regex::new(r"^([IVXLC]+)\.").unwrap();
    static ref RE_BARE_INTEGER: Regex = Regex::new(r"^(\d+)\s+\S").unwrap();
}

/// Separator punctuation allowed between a heading marker and its title.
const MARKER_SEPARATORS: &[char] = &['、', ':', '：', '.', '．', '-', ' ', '\t', '\u{3000}'];

/// Heading-shape grammars, each paired with an extraction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// `1.1.1.1` four-level numbering (and deeper)
    Numeric4,
    /// `1.1.1` three-level numbering
    Numeric3,
    /// `1.1` two-level numbering
    Numeric2,
    /// `1.` top-level numbering with a dot
    Numeric1,
    /// `第一章`, `第二节`, `第三篇`
    ChineseChapter,
    /// `第一条`, `第二款`, `第三部分`
    ChineseClause,
    /// `附件`, `附图`, `附表`, `附录` with an optional ordinal
    Appendix,
    /// `I.`, `II.`, `IV.`
    Roman,
    /// `1 Introduction`
    BareInteger,
}

impl GrammarKind {
    /// Evaluation order. Longer numeric paths come first so that `1.1.1`
    /// is never read as `1.1` followed by text.
    pub const PRIORITY: [GrammarKind; 9] = [
        GrammarKind::Numeric4,
        GrammarKind::Numeric3,
        GrammarKind::Numeric2,
        GrammarKind::Numeric1,
        GrammarKind::ChineseChapter,
        GrammarKind::ChineseClause,
        GrammarKind::Appendix,
        GrammarKind::Roman,
        GrammarKind::BareInteger,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            GrammarKind::Numeric4 => &*RE_NUMERIC4,
            GrammarKind::Numeric3 => &*RE_NUMERIC3,
            GrammarKind::Numeric2 => &*RE_NUMERIC2,
            GrammarKind::Numeric1 => &*RE_NUMERIC1,
            GrammarKind::ChineseChapter => &*RE_CHINESE_CHAPTER,
            GrammarKind::ChineseClause => &*RE_CHINESE_CLAUSE,
            GrammarKind::Appendix => &*RE_APPENDIX,
            GrammarKind::Roman => &*RE_ROMAN,
            GrammarKind::BareInteger => &*RE_BARE_INTEGER,
        }
    }

    /// True for grammars whose label is a dotted numbering path.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            GrammarKind::Numeric4
                | GrammarKind::Numeric3
                | GrammarKind::Numeric2
                | GrammarKind::Numeric1
                | GrammarKind::BareInteger
        )
    }

    /// Nesting level for a heading recognized by this grammar.
    pub fn level(self, label: &str) -> u32 {
        match self {
            GrammarKind::ChineseClause => 2,
            GrammarKind::Numeric4 => 4,
            GrammarKind::ChineseChapter | GrammarKind::Appendix | GrammarKind::Roman => 1,
            _ => label.matches('.').count() as u32 + 1,
        }
    }

    /// Match this grammar against the start of `text`.
    pub fn matches(self, text: &str) -> Option<HeadingMatch> {
        let caps = self.pattern().captures(text)?;
        let label = caps.get(1)?;
        Some(HeadingMatch {
            kind: self,
            label: label.as_str().to_string(),
            end: label.end(),
        })
    }
}

/// A heading grammar matched at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Grammar that matched
    pub kind: GrammarKind,
    /// Numbering path or marker text (without a trailing dot)
    pub label: String,
    /// Byte offset just past the label
    pub end: usize,
}

impl HeadingMatch {
    /// Nesting level implied by this match.
    pub fn level(&self) -> u32 {
        self.kind.level(&self.label)
    }
}

/// Try every grammar in priority order; the first match wins.
pub fn match_heading(text: &str) -> Option<HeadingMatch> {
    GrammarKind::PRIORITY
        .iter()
        .find_map(|kind| kind.matches(text))
}

/// True if the line is only a TOC section title ("目录", "Contents", ...).
pub fn is_toc_title(line: &str) -> bool {
    RE_TOC_TITLE.is_match(line.trim())
}

/// Why a line was not accepted as a TOC entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty or whitespace-only line
    Blank,
    /// Shorter than the minimum line length
    TooShort,
    /// The TOC section title itself
    TocTitle,
    /// No leader run or wide gap followed by 1-4 digits at the end
    NoPageToken,
    /// Trailing digits parsed outside the accepted page range
    PageOutOfRange(u32),
    /// Page token present but no heading grammar matched
    NoHeading,
    /// Nothing left of the title after stripping
    EmptyTitle,
}

/// A trailing page number and where it starts in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToken {
    /// Parsed page number
    pub page: u32,
    /// Byte offset where the leader run or gap begins
    pub start: usize,
}

/// Classifies single lines as TOC entries.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    /// Minimum trimmed line length in characters (default: 5)
    pub min_line_length: usize,
    /// Minimum whitespace gap before a page number without leaders (default: 2)
    pub min_gap_width: usize,
    /// Largest accepted page number (default: 9999)
    pub max_page_number: u32,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::from_config(&TocParserConfig::default())
    }
}

impl LineClassifier {
    /// Create a classifier with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from parser configuration.
    pub fn from_config(config: &TocParserConfig) -> Self {
        Self {
            min_line_length: config.min_line_length,
            min_gap_width: config.min_gap_width,
            max_page_number: config.max_page_number,
        }
    }

    /// Classify a line, returning the entry if it is one.
    pub fn classify(&self, line: &str) -> Option<TocEntry> {
        self.classify_detailed(line).ok()
    }

    /// Classify a line, reporting why it was rejected.
    pub fn classify_detailed(&self, line: &str) -> Result<TocEntry, Rejection> {
        let line = line.trim();
        if line.is_empty() {
            return Err(Rejection::Blank);
        }
        if line.chars().count() < self.min_line_length {
            return Err(Rejection::TooShort);
        }
        if is_toc_title(line) {
            return Err(Rejection::TocTitle);
        }

        let token = self.page_token(line)?;
        let body = line[..token.start].trim_end();
        let heading = match_heading(body).ok_or(Rejection::NoHeading)?;

        let rest = body[heading.end..].trim_start_matches(MARKER_SEPARATORS);
        let mut title = normalize_title(rest);

        let (numbering, marker) = if heading.kind.is_numeric() {
            (Some(heading.label.clone()), None)
        } else {
            (None, Some(heading.label.clone()))
        };

        if title.is_empty() {
            match &marker {
                Some(marker) => title = marker.clone(),
                None => return Err(Rejection::EmptyTitle),
            }
        }

        Ok(TocEntry {
            numbering,
            marker,
            title,
            level: heading.level(),
            page_start: token.page,
            page_end: None,
            children: Vec::new(),
            content: None,
            grammar: Some(heading.kind),
        })
    }

    /// Locate and validate the trailing page token.
    pub fn page_token(&self, line: &str) -> Result<PageToken, Rejection> {
        let (start, digits) = if let Some(caps) = RE_LEADER_PAGE.captures(line) {
            let whole = caps.get(0).ok_or(Rejection::NoPageToken)?;
            let digits = caps.get(1).ok_or(Rejection::NoPageToken)?;
            (whole.start(), digits.as_str())
        } else if let Some(caps) = RE_GAP_PAGE.captures(line) {
            let gap = caps.get(1).ok_or(Rejection::NoPageToken)?;
            let digits = caps.get(2).ok_or(Rejection::NoPageToken)?;
            let gap_text = gap.as_str();
            if !gap_text.contains('\t') && gap_text.chars().count() < self.min_gap_width {
                return Err(Rejection::NoPageToken);
            }
            (gap.start(), digits.as_str())
        } else {
            return Err(Rejection::NoPageToken);
        };

        let page: u32 = digits.parse().map_err(|_| Rejection::NoPageToken)?;
        if page < 1 || page > self.max_page_number {
            return Err(Rejection::PageOutOfRange(page));
        }
        Ok(PageToken { page, start })
    }

    /// True if the line ends with a valid page token.
    pub fn has_page_token(&self, line: &str) -> bool {
        self.page_token(line.trim()).is_ok()
    }

    /// Classify every line, keeping the entries in order.
    pub fn classify_lines<I, S>(&self, lines: I) -> Vec<TocEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for line in lines {
            let line = line.as_ref();
            match self.classify_detailed(line) {
                Ok(entry) => entries.push(entry),
                Err(Rejection::Blank | Rejection::TooShort | Rejection::TocTitle) => {},
                Err(reason) => log::debug!("Skipping TOC line {:?}: {:?}", line, reason),
            }
        }
        entries
    }
}

/// Strip leader runs, collapse whitespace, and trim.
fn normalize_title(text: &str) -> String {
    let without_leaders = RE_LEADER_RUN.replace_all(text, " ");
    RE_WHITESPACE
        .replace_all(&without_leaders, " ")
        .trim()
        .to_string()
}
