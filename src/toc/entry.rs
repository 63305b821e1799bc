//! The outline node produced by every TOC stage.

use super::classifier::GrammarKind;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One recognized TOC heading and, after hierarchy building, its subtree.
///
/// Entries are created by the line classifier and then only extended:
/// the hierarchy builder fills `children`, the range resolver fills
/// `page_end`, and the content binder fills `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Dot-separated numbering path (e.g. "1.2.3"); `None` for marker-based headings
    pub numbering: Option<String>,
    /// Non-numeric marker stripped from the title (e.g. "第一章", "附件一", "II")
    pub marker: Option<String>,
    /// Normalized heading text
    pub title: String,
    /// Nesting depth, 1 = outermost
    pub level: u32,
    /// Page number declared in the TOC line
    pub page_start: u32,
    /// Resolved last page, unset until ranges are resolved
    pub page_end: Option<u32>,
    /// Child entries in document order
    pub children: Vec<TocEntry>,
    /// Raw text bound to this entry (leaves only carry real text)
    pub content: Option<String>,
    /// Grammar that recognized this entry, `None` for hand-built entries
    pub grammar: Option<GrammarKind>,
}

impl TocEntry {
    /// Create a bare entry with no numbering, marker, or children.
    pub fn new(title: impl Into<String>, level: u32, page_start: u32) -> Self {
        Self {
            numbering: None,
            marker: None,
            title: title.into(),
            level: level.max(1),
            page_start,
            page_end: None,
            children: Vec::new(),
            content: None,
            grammar: None,
        }
    }

    /// Set the numbering path.
    pub fn with_numbering(mut self, numbering: impl Into<String>) -> Self {
        self.numbering = Some(numbering.into());
        self
    }

    /// Set the marker text.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Add a child entry.
    pub fn with_child(mut self, child: TocEntry) -> Self {
        self.children.push(child);
        self
    }

    /// True if the entry has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The "start-end" form of the resolved span, if resolved.
    pub fn page_range(&self) -> Option<String> {
        self.page_end
            .map(|end| format!("{}-{}", self.page_start, end))
    }

    /// Label shown in tree listings: numbering, else marker, else nothing.
    pub fn label(&self) -> Option<&str> {
        self.numbering.as_deref().or(self.marker.as_deref())
    }

    /// Iterate over this entry and all descendants in document order.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

/// Iterate over every node of a forest in document (pre-)order.
pub fn preorder(forest: &[TocEntry]) -> Preorder<'_> {
    Preorder {
        stack: forest.iter().rev().collect(),
    }
}

/// Pre-order iterator over a TOC forest.
pub struct Preorder<'a> {
    stack: Vec<&'a TocEntry>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TocEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Serialize for TocEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.marker.is_some() { 9 } else { 8 };
        let mut state = serializer.serialize_struct("TocEntry", fields)?;
        state.serialize_field("numbering", &self.numbering)?;
        if let Some(marker) = &self.marker {
            state.serialize_field("marker", marker)?;
        }
        state.serialize_field("title", &self.title)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("page_start", &self.page_start)?;
        state.serialize_field("page_end", &self.page_end)?;
        state.serialize_field("page_range", &self.page_range())?;
        state.serialize_field("children", &self.children)?;
        state.serialize_field("content", &self.content)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<TocEntry> {
        vec![
            TocEntry::new("Intro", 1, 1)
                .with_numbering("1")
                .with_child(TocEntry::new("Scope", 2, 1).with_numbering("1.1"))
                .with_child(
                    TocEntry::new("Terms", 2, 2)
                        .with_numbering("1.2")
                        .with_child(TocEntry::new("Abbrev", 3, 2).with_numbering("1.2.1")),
                ),
            TocEntry::new("Design", 1, 5).with_numbering("2"),
        ]
    }

    #[test]
    fn test_preorder_is_document_order() {
        let forest = sample_tree();
        let order: Vec<_> = preorder(&forest)
            .map(|e| e.numbering.clone().unwrap())
            .collect();
        assert_eq!(order, vec!["1", "1.1", "1.2", "1.2.1", "2"]);
    }

    #[test]
    fn test_entry_iter_includes_self() {
        let forest = sample_tree();
        assert_eq!(forest[0].iter().count(), 4);
        assert_eq!(forest[1].iter().count(), 1);
    }

    #[test]
    fn test_page_range_unset_until_resolved() {
        let mut entry = TocEntry::new("Intro", 1, 3);
        assert_eq!(entry.page_range(), None);
        entry.page_end = Some(7);
        assert_eq!(entry.page_range().as_deref(), Some("3-7"));
    }

    #[test]
    fn test_level_is_at_least_one() {
        assert_eq!(TocEntry::new("x", 0, 1).level, 1);
    }

    #[test]
    fn test_serialize_schema() {
        let mut entry = TocEntry::new("总则", 1, 1).with_numbering("1");
        entry.page_end = Some(3);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["numbering"], "1");
        assert_eq!(json["title"], "总则");
        assert_eq!(json["level"], 1);
        assert_eq!(json["page_start"], 1);
        assert_eq!(json["page_end"], 3);
        assert_eq!(json["page_range"], "1-3");
        assert!(json["children"].as_array().unwrap().is_empty());
        assert!(json["content"].is_null());
        assert!(json.get("marker").is_none());
    }

    #[test]
    fn test_serialize_marker_when_present() {
        let entry = TocEntry::new("环境影响评价委托书", 1, 45).with_marker("附件一");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["marker"], "附件一");
        assert!(json["numbering"].is_null());
        assert!(json["page_range"].is_null());
    }
}
