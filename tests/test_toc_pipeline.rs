//! Integration tests for the TOC parsing pipeline.
//!
//! Runs complete documents through `TocParser` and checks the outline, the
//! flat list, the metadata, and the JSON shape.

use toc_oxide::toc::{FnPages, PAGE_SEPARATOR};
use toc_oxide::{FailureKind, TocEntry, TocParser, TocParserConfig};

fn numbers(forest: &[TocEntry]) -> Vec<&str> {
    forest
        .iter()
        .map(|e| e.numbering.as_deref().unwrap_or(""))
        .collect()
}

const REPORT: [&str; 9] = [
    "XX项目环境影响报告书",
    "建设单位：XX有限公司",
    "目录",
    "1. 总则..........1",
    "1.1 编制依据......1",
    "1.2 适用范围......2",
    "2. 术语..........3",
    "附件一 xxx",
    "1. 总则",
];

#[test]
fn test_report_outline() {
    let result = TocParser::new().parse_lines(&REPORT, 10);
    assert!(result.success);
    assert!(result.error.is_none());
    assert_eq!(result.failure_kind(), None);

    let toc = &result.toc;
    assert_eq!(numbers(toc), vec!["1", "2"]);
    assert_eq!(toc[0].title, "总则");
    assert_eq!((toc[0].page_start, toc[0].page_end), (1, Some(3)));
    assert_eq!(numbers(&toc[0].children), vec!["1.1", "1.2"]);

    let (one_one, one_two) = (&toc[0].children[0], &toc[0].children[1]);
    assert_eq!(one_one.level, 2);
    assert_eq!((one_one.page_start, one_one.page_end), (1, Some(2)));
    assert_eq!((one_two.page_start, one_two.page_end), (2, Some(3)));

    assert_eq!((toc[1].page_start, toc[1].page_end), (3, Some(10)));
    assert!(toc[1].children.is_empty());
}

#[test]
fn test_flat_list_is_first_pass_view() {
    let result = TocParser::new().parse_lines(&REPORT, 10);
    let flat: Vec<_> = result
        .flat_list
        .iter()
        .map(|e| (e.numbering.as_deref().unwrap(), e.page_end.unwrap()))
        .collect();
    // Interior "1" still carries the next-start end here
    assert_eq!(flat, vec![("1", 1), ("1.1", 2), ("1.2", 3), ("2", 10)]);
    assert!(result.flat_list.iter().all(|e| e.children.is_empty()));
}

#[test]
fn test_metadata() {
    let result = TocParser::new().parse_lines(&REPORT, 10);
    assert_eq!(result.metadata.total_sections, 4);
    assert_eq!(result.metadata.level_stats.get(&1), Some(&2));
    assert_eq!(result.metadata.level_stats.get(&2), Some(&2));
    assert_eq!(result.metadata.total_pages, Some(10));
}

#[test]
fn test_missing_title_fails() {
    let lines = ["1. 总则..........1", "2. 术语..........3"];
    let result = TocParser::new().parse_lines(&lines, 10);
    assert!(!result.success);
    assert_eq!(result.failure_kind(), Some(FailureKind::TocNotFound));
    assert!(result.toc.is_empty());
    assert!(result.flat_list.is_empty());
    assert_eq!(result.metadata.total_sections, 0);
}

#[test]
fn test_missing_title_allowed() {
    let config = TocParserConfig::new().with_require_title(false);
    let lines = ["1. 总则..........1", "2. 术语..........3"];
    let result = TocParser::with_config(config).parse_lines(&lines, 10);
    assert!(result.success);
    assert_eq!(result.toc.len(), 2);
}

#[test]
fn test_title_without_entries_fails() {
    let lines = ["目录", "本报告共分五章", "附件一 xxx"];
    let result = TocParser::new().parse_lines(&lines, 10);
    assert!(!result.success);
    assert_eq!(result.failure_kind(), Some(FailureKind::NoEntriesExtracted));
}

#[test]
fn test_line_without_page_token_is_skipped() {
    let with_noise = [
        "目录",
        "1. 总则..........1",
        "Revision 2024",
        "2. 术语..........3",
    ];
    let without_noise = ["目录", "1. 总则..........1", "2. 术语..........3"];

    let parser = TocParser::new();
    let noisy = parser.parse_lines(&with_noise, 10);
    let clean = parser.parse_lines(&without_noise, 10);
    assert_eq!(noisy.metadata.total_sections, 2);
    assert_eq!(noisy.toc, clean.toc);
}

#[test]
fn test_single_entry_spans_document() {
    let lines = ["目录", "1. 总则..........1"];
    let result = TocParser::new().parse_lines(&lines, 5);
    assert_eq!(result.toc.len(), 1);
    assert_eq!(result.toc[0].page_start, 1);
    assert_eq!(result.toc[0].page_end, Some(5));
}

#[test]
fn test_english_contents_with_body_restart() {
    let lines = [
        "Annual Report",
        "Table of Contents",
        "1 Introduction ........ 1",
        "2 Methods\t4",
        "2.1 Sampling ........ 4",
        "2.2 Analysis ........ 6",
        "3 Results    9",
        "1 Introduction",
        "2 Methods ....... see below",
    ];
    let result = TocParser::new().parse_lines(&lines, 12);
    assert!(result.success);
    assert_eq!(numbers(&result.toc), vec!["1", "2", "3"]);
    assert_eq!(result.toc[1].children.len(), 2);
    assert_eq!(result.toc[1].page_range().as_deref(), Some("4-9"));
    assert_eq!(result.toc[2].page_range().as_deref(), Some("9-12"));
}

#[test]
fn test_chinese_chapters_and_clauses() {
    let lines = [
        "目 录",
        "第一章 总则……………1",
        "第一条 目的……………1",
        "第二条 范围……………2",
        "第二章 管理……………5",
        "附件",
    ];
    let result = TocParser::new().parse_lines(&lines, 8);
    assert!(result.success);
    assert_eq!(result.toc.len(), 2);

    let chapter = &result.toc[0];
    assert_eq!(chapter.marker.as_deref(), Some("第一章"));
    assert_eq!(chapter.numbering, None);
    assert_eq!(chapter.children.len(), 2);
    assert_eq!(chapter.children[1].title, "范围");
    assert_eq!(chapter.page_end, Some(5));
    assert_eq!(result.toc[1].page_end, Some(8));
}

#[test]
fn test_json_schema() {
    let result = TocParser::new().parse_lines(&REPORT, 10).with_source("report.docx");
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(json["success"], true);
    assert!(json["error"].is_null());
    assert_eq!(json["metadata"]["total_sections"], 4);
    assert_eq!(json["metadata"]["level_stats"]["1"], 2);
    assert_eq!(json["metadata"]["source"], "report.docx");

    let first = &json["toc"][0];
    assert_eq!(first["numbering"], "1");
    assert_eq!(first["title"], "总则");
    assert_eq!(first["level"], 1);
    assert_eq!(first["page_start"], 1);
    assert_eq!(first["page_end"], 3);
    assert_eq!(first["page_range"], "1-3");
    assert!(first["content"].is_null());
    assert!(first.get("marker").is_none());
    assert_eq!(first["children"].as_array().unwrap().len(), 2);

    assert_eq!(json["flat_list"].as_array().unwrap().len(), 4);
}

#[test]
fn test_parse_document_binds_leaves() {
    let pages: Vec<String> = vec![
        "Cover page".into(),
        "目录\n1. 总则......2\n1.1 目的......2\n1.2 范围......3\n2. 术语......4".into(),
        "总则正文".into(),
        "范围正文".into(),
        "术语正文".into(),
    ];
    // Declared page 2 is physical page 3
    let config = TocParserConfig::new()
        .with_bind_content(true)
        .with_page_offset(1);
    let result = TocParser::with_config(config).parse_document(&pages);

    assert!(result.success);
    assert_eq!(result.metadata.total_pages, Some(5));

    let chapter = &result.toc[0];
    assert_eq!(chapter.content.as_deref(), Some(""));
    let purpose = chapter.children[0].content.as_deref().unwrap();
    assert!(purpose.starts_with("[page 3 (toc page 2)]\n总则正文"));
    assert!(purpose.contains(PAGE_SEPARATOR));
    assert!(purpose.contains("范围正文"));

    // Declared 4-5 maps past the last page: start 5 is valid, end is clamped
    let terms = result.toc[1].content.as_deref().unwrap();
    assert_eq!(terms, format!("[page 5 (toc page 4)]\n术语正文\n{}", PAGE_SEPARATOR));
}

#[test]
fn test_parse_document_scans_leading_pages_only() {
    let provider = FnPages::new(50, |page| match page {
        12 => Some("目录\n1. 总则......20".to_string()),
        _ => Some(format!("body text {page}")),
    });
    let parser = TocParser::with_config(TocParserConfig::new().with_max_scan_pages(10));
    let result = parser.parse_document(&provider);
    assert_eq!(result.failure_kind(), Some(FailureKind::TocNotFound));

    let wider = TocParser::with_config(TocParserConfig::new().with_max_scan_pages(15));
    let result = wider.parse_document(&provider);
    assert!(result.success);
    assert_eq!(result.toc[0].page_range().as_deref(), Some("20-50"));
    assert!(result.toc[0].content.is_none());
}
