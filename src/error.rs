//! Error types for the TOC library.
//!
//! This module defines all error types that can occur while reading a source
//! document, locating its table of contents, and binding page content.

/// Result type alias for TOC library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during TOC processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document reader could not supply text
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// No TOC title line was found in the scanned input
    #[error("Table of contents not found")]
    TocNotFound,

    /// A TOC region was found but no line matched any heading grammar
    #[error("No table of contents entries extracted")]
    NoEntriesExtracted,

    /// A content request resolved to a physical page outside the document
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange {
        /// Physical page after applying the offset
        page: i64,
        /// Total physical pages in the document
        total: u32,
    },

    /// A page number or page range string failed validation
    #[error("Malformed page token: '{0}'")]
    MalformedPageToken(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML decoding error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP container error
    #[cfg(feature = "office")]
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_out_of_range_error() {
        let err = Error::PageOutOfRange { page: 42, total: 10 };
        let msg = format!("{}", err);
        assert!(msg.contains("42"));
        assert!(msg.contains("10 pages"));
    }

    #[test]
    fn test_malformed_page_token_error() {
        let err = Error::MalformedPageToken("3-x".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Malformed page token"));
        assert!(msg.contains("3-x"));
    }

    #[test]
    fn test_toc_not_found_error() {
        assert_eq!(Error::TocNotFound.to_string(), "Table of contents not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.docx");
        let err: Error = io.into();
        assert!(format!("{}", err).contains("missing.docx"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
