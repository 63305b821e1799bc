//! Hierarchy building.
//!
//! Folds the flat, document-ordered entry list into a forest. The fold keeps an
//! explicit stack of open nodes: every node on the stack can still receive
//! children, and a node leaves the stack exactly once, at which point it is
//! attached to the node below it (or becomes a root).

use super::entry::TocEntry;

/// Open-ancestor stack plus the finished roots.
///
/// Invariant: levels on `open` strictly increase from bottom to top.
#[derive(Debug, Default)]
pub struct OpenStack {
    open: Vec<TocEntry>,
    roots: Vec<TocEntry>,
}

impl OpenStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next entry in document order.
    ///
    /// Closes every open node with `level >= entry.level`, then opens the entry
    /// beneath whatever remains on top. Level gaps (1 followed by 3) simply
    /// nest under the nearest open ancestor.
    pub fn push(&mut self, entry: TocEntry) {
        while self.open.last().is_some_and(|top| top.level >= entry.level) {
            self.close_top();
        }
        self.open.push(entry);
    }

    /// Close all remaining nodes and return the forest.
    pub fn finish(mut self) -> Vec<TocEntry> {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.roots
    }

    /// Number of currently open nodes.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn close_top(&mut self) {
        if let Some(node) = self.open.pop() {
            match self.open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.roots.push(node),
            }
        }
    }
}

/// Build a forest from a flat list of entries in document order.
pub fn build_hierarchy(entries: Vec<TocEntry>) -> Vec<TocEntry> {
    let stack = entries
        .into_iter()
        .fold(OpenStack::new(), |mut stack, entry| {
            stack.push(entry);
            stack
        });
    let roots = stack.finish();
    log::debug!("Built hierarchy with {} top-level entries", roots.len());
    roots
}
