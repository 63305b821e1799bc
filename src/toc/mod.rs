//! TOC recognition and hierarchy resolution.
//!
//! The stages run strictly in order, each taking ownership of the previous
//! stage's output:
//!
//! ```text
//! lines
//!     ↓
//! [BoundaryDetector] (title ... end marker → TocRegion)
//!     ↓
//! [LineClassifier] (line → TocEntry, non-entries dropped)
//!     ↓
//! [assign_page_ends] (flat first pass)
//!     ↓
//! [build_hierarchy] (open-ancestor stack → forest)
//!     ↓
//! [propagate_spans] (interior nodes cover their descendants)
//!     ↓
//! [ContentBinder] (optional, leaves only)
//! ```

pub mod binder;
pub mod boundary;
pub mod classifier;
pub mod entry;
pub mod hierarchy;
pub mod ranges;

pub use binder::{ContentBinder, FnPages, PageTextProvider, SharedProvider, PAGE_SEPARATOR};
pub use boundary::{BoundaryDetector, RegionEnd, SourceLine, TocRegion};
pub use classifier::{
    is_toc_title, match_heading, GrammarKind, HeadingMatch, LineClassifier, PageToken, Rejection,
};
pub use entry::{preorder, Preorder, TocEntry};
pub use hierarchy::{build_hierarchy, OpenStack};
pub use ranges::{assign_page_ends, propagate_spans, resolve, PageRange};
