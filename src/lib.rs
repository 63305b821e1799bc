// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # TOC Oxide
//!
//! Table of contents recognition for plain-text documents: finds the TOC
//! region, classifies its entries, rebuilds the section hierarchy, and
//! resolves every section's page span.
//!
//! ## Core Features
//!
//! - **Heading grammars**: dotted numbering (`1.`, `1.1` ... `1.1.1.1`),
//!   Chinese chapters and clauses (`第一章`, `第二条`), appendices (`附件一`),
//!   Roman numerals, bare integers
//! - **Page tokens**: dot and ellipsis leaders, tabs, wide space gaps
//! - **Hierarchy**: open-ancestor stack, tolerant of level gaps
//! - **Page spans**: next-start rule with interior nodes covering their
//!   descendants
//! - **Content binding**: per-leaf page text with a declared-to-physical
//!   page offset (parallel with the `parallel` feature)
//! - **Sources**: plain text (form-feed paged or not), WordprocessingML, and
//!   `.docx` with the `office` feature
//!
//! ## Quick Start
//!
//! ```
//! use toc_oxide::TocParser;
//!
//! let lines = [
//!     "目录",
//!     "1. 总则..........1",
//!     "1.1 编制依据......1",
//!     "1.2 评价标准......2",
//!     "2. 术语..........3",
//! ];
//! let result = TocParser::new().parse_lines(&lines, 10);
//!
//! assert!(result.success);
//! assert_eq!(result.toc.len(), 2);
//! assert_eq!(result.toc[0].page_range().as_deref(), Some("1-3"));
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

/// Parser configuration options
pub mod config;

// Recognition stages
pub mod toc;

// Orchestration
pub mod pipeline;

// Input readers
pub mod source;

// Re-exports
pub use config::TocParserConfig;
pub use error::{Error, Result};
pub use pipeline::{FailureKind, TocMetadata, TocParser, TocResult};
pub use source::{load, Source};
pub use toc::{
    BoundaryDetector, ContentBinder, GrammarKind, LineClassifier, PageRange, PageTextProvider,
    TocEntry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
