//! Content binding.
//!
//! Attaches raw page text to every leaf of a resolved forest. Interior nodes
//! get an empty string: content lives at leaf granularity only.
//!
//! With the `parallel` feature, sibling subtrees are bound on rayon's thread
//! pool. Each leaf depends only on its own resolved range, and the indexed
//! collect keeps document order.

use super::entry::TocEntry;
use crate::error::{Error, Result};

/// Line written after every page's text in bound content.
pub const PAGE_SEPARATOR: &str = "==================================================";

/// Source of per-page text, addressed by 1-based physical page number.
pub trait PageTextProvider {
    /// Number of physical pages in the document.
    fn total_pages(&self) -> u32;

    /// Text of one page, or `None` if the page has no extractable text.
    fn page_text(&self, page: u32) -> Option<String>;
}

/// Providers accepted by [`ContentBinder::bind_forest`].
///
/// Any [`PageTextProvider`] qualifies; with the `parallel` feature it must
/// also be `Sync`.
#[cfg(feature = "parallel")]
pub trait SharedProvider: PageTextProvider + Sync {}

#[cfg(feature = "parallel")]
impl<T: PageTextProvider + Sync + ?Sized> SharedProvider for T {}

/// Providers accepted by [`ContentBinder::bind_forest`].
///
/// Any [`PageTextProvider`] qualifies; with the `parallel` feature it must
/// also be `Sync`.
#[cfg(not(feature = "parallel"))]
pub trait SharedProvider: PageTextProvider {}

#[cfg(not(feature = "parallel"))]
impl<T: PageTextProvider + ?Sized> SharedProvider for T {}

impl PageTextProvider for Vec<String> {
    fn total_pages(&self) -> u32 {
        self.len() as u32
    }

    fn page_text(&self, page: u32) -> Option<String> {
        let index = (page as usize).checked_sub(1)?;
        self.get(index).cloned()
    }
}

/// Adapts a closure into a [`PageTextProvider`].
pub struct FnPages<F> {
    total: u32,
    fetch: F,
}

impl<F> FnPages<F>
where
    F: Fn(u32) -> Option<String>,
{
    /// Wrap `fetch` as a provider for a document of `total` pages.
    pub fn new(total: u32, fetch: F) -> Self {
        Self { total, fetch }
    }
}

impl<F> PageTextProvider for FnPages<F>
where
    F: Fn(u32) -> Option<String>,
{
    fn total_pages(&self) -> u32 {
        self.total
    }

    fn page_text(&self, page: u32) -> Option<String> {
        (self.fetch)(page)
    }
}

/// Binds page text to leaf entries.
#[derive(Debug, Clone, Default)]
pub struct ContentBinder {
    /// Added to declared TOC pages to obtain physical pages (default: 0)
    pub page_offset: i64,
}

impl ContentBinder {
    /// Create a binder with no page offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binder with a declared-to-physical page offset.
    pub fn with_offset(page_offset: i64) -> Self {
        Self { page_offset }
    }

    /// Fetch the text for one entry's resolved range.
    ///
    /// The physical range is `[page_start + offset, page_end + offset]`, with the
    /// end clamped to the document. An unresolved entry covers its start page only.
    ///
    /// # Errors
    ///
    /// [`Error::PageOutOfRange`] if the physical start page is below 1 or past
    /// the last page.
    pub fn bind_leaf<P>(&self, entry: &TocEntry, provider: &P) -> Result<String>
    where
        P: PageTextProvider + ?Sized,
    {
        let total = provider.total_pages();
        let start = i64::from(entry.page_start) + self.page_offset;
        let end = i64::from(entry.page_end.unwrap_or(entry.page_start)) + self.page_offset;

        if start < 1 || start > i64::from(total) {
            return Err(Error::PageOutOfRange { page: start, total });
        }
        let end = end.clamp(start, i64::from(total));

        let mut text = String::new();
        for page in start..=end {
            let Some(page_text) = provider
                .page_text(page as u32)
                .filter(|t| !t.trim().is_empty())
            else {
                continue;
            };
            text.push_str(&format!(
                "[page {} (toc page {})]\n{}\n{}\n",
                page,
                page - self.page_offset,
                page_text.trim_end(),
                PAGE_SEPARATOR
            ));
        }

        if text.is_empty() {
            Ok(format!("[empty] no text in pages {}-{}", start, end))
        } else {
            Ok(text.trim_end().to_string())
        }
    }

    /// Bind content to every leaf of `forest`; interior nodes get `""`.
    ///
    /// A leaf whose range cannot be bound gets an `[error] ...` marker instead
    /// of failing the whole forest.
    pub fn bind_forest<P>(&self, forest: Vec<TocEntry>, provider: &P) -> Vec<TocEntry>
    where
        P: SharedProvider + ?Sized,
    {
        map_forest(forest, |node| self.bind_node(node, provider))
    }

    fn bind_node<P>(&self, mut node: TocEntry, provider: &P) -> TocEntry
    where
        P: SharedProvider + ?Sized,
    {
        if node.children.is_empty() {
            let content = match self.bind_leaf(&node, provider) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Could not bind content for '{}': {}", node.title, e);
                    format!("[error] {}", e)
                },
            };
            node.content = Some(content);
        } else {
            node.children = self.bind_forest(std::mem::take(&mut node.children), provider);
            node.content = Some(String::new());
        }
        node
    }
}

#[cfg(feature = "parallel")]
fn map_forest<F>(forest: Vec<TocEntry>, f: F) -> Vec<TocEntry>
where
    F: Fn(TocEntry) -> TocEntry + Send + Sync,
{
    use rayon::prelude::*;
    forest.into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_forest<F>(forest: Vec<TocEntry>, f: F) -> Vec<TocEntry>
where
    F: Fn(TocEntry) -> TocEntry,
{
    forest.into_iter().map(f).collect()
}
