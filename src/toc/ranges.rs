//! Page range resolution.
//!
//! Two passes, each consuming a forest and returning a new one:
//!
//! 1. [`assign_page_ends`]: in document order, every entry ends on the page
//!    where the next entry starts; the last entry ends on the last page.
//!    The boundary is inclusive, so adjacent sections share one page.
//! 2. [`propagate_spans`]: post-order, every node with children ends where
//!    its last child ends.

use super::entry::{preorder, TocEntry};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// First pass: `page_end = next.page_start` in document order.
pub fn assign_page_ends(forest: Vec<TocEntry>, total_pages: u32) -> Vec<TocEntry> {
    let starts: Vec<u32> = preorder(&forest).map(|e| e.page_start).collect();
    warn_on_inversions(&starts);

    let mut ends = starts
        .into_iter()
        .skip(1)
        .chain(std::iter::once(total_pages));

    forest
        .into_iter()
        .map(|node| assign_node(node, &mut ends))
        .collect()
}

fn assign_node(mut node: TocEntry, ends: &mut impl Iterator<Item = u32>) -> TocEntry {
    node.page_end = ends.next();
    node.children = std::mem::take(&mut node.children)
        .into_iter()
        .map(|child| assign_node(child, &mut *ends))
        .collect();
    node
}

/// Second pass: every interior node ends where its last child ends.
pub fn propagate_spans(forest: Vec<TocEntry>) -> Vec<TocEntry> {
    forest.into_iter().map(propagate_node).collect()
}

fn propagate_node(mut node: TocEntry) -> TocEntry {
    if node.children.is_empty() {
        return node;
    }
    node.children = propagate_spans(std::mem::take(&mut node.children));
    node.page_end = node.children.last().and_then(|c| c.page_end);
    node
}

/// Run both passes. Re-running on a resolved forest yields the same forest.
pub fn resolve(forest: Vec<TocEntry>, total_pages: u32) -> Vec<TocEntry> {
    propagate_spans(assign_page_ends(forest, total_pages))
}

fn warn_on_inversions(starts: &[u32]) {
    for (i, pair) in starts.windows(2).enumerate() {
        if pair[1] < pair[0] {
            log::warn!(
                "TOC entry {} starts on page {} before its predecessor (page {})",
                i + 1,
                pair[1],
                pair[0]
            );
        }
    }
}

/// An inclusive page span such as `3-5` or `7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page
    pub start: u32,
    /// Last page (inclusive)
    pub end: u32,
}

impl PageRange {
    /// Create a range; `end` is raised to `start` if smaller.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The resolved range of an entry, if its end is known.
    pub fn of(entry: &TocEntry) -> Option<Self> {
        entry.page_end.map(|end| Self {
            start: entry.page_start,
            end,
        })
    }

    /// Number of pages covered.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    /// Always false; a range covers at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PageRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| -> Result<u32> {
            match part.trim().parse::<u32>() {
                Ok(page) if page >= 1 => Ok(page),
                _ => Err(Error::MalformedPageToken(s.to_string())),
            }
        };

        match s.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse(start)?, parse(end)?);
                if end < start {
                    return Err(Error::MalformedPageToken(s.to_string()));
                }
                Ok(Self { start, end })
            },
            None => {
                let page = parse(s)?;
                Ok(Self {
                    start: page,
                    end: page,
                })
            },
        }
    }
}
