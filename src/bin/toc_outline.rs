//! Extract a table of contents outline from a document.
//!
//! Usage:
//!   cargo run --release --features office --bin toc_outline -- report.docx
//!   cargo run --release --bin toc_outline -- report.txt --tree --offset 2 --bind-content
//!
//! Set `RUST_LOG=debug` to see why individual lines were rejected.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use toc_oxide::{load, TocParser, TocParserConfig};

/// Turn the TOC pages of a document into a hierarchical outline.
#[derive(Parser, Debug)]
#[command(name = "toc_outline", version, about)]
struct Args {
    /// Input document (.txt, .docx, or WordprocessingML .xml)
    input: PathBuf,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print an indented outline instead of JSON
    #[arg(long)]
    tree: bool,

    /// Physical page count (default: page breaks, or the largest TOC page)
    #[arg(long)]
    total_pages: Option<u32>,

    /// Number of leading pages scanned for the TOC
    #[arg(long, default_value_t = 10)]
    max_pages: usize,

    /// Correction added to TOC page numbers to get physical pages
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,

    /// Minimum TOC line length in characters
    #[arg(long, default_value_t = 5)]
    min_line_length: usize,

    /// Accept a TOC without a "目录"/"Contents" title line
    #[arg(long)]
    no_title: bool,

    /// Attach page text to every leaf entry (paged input only)
    #[arg(long)]
    bind_content: bool,
}

impl Args {
    fn config(&self) -> TocParserConfig {
        TocParserConfig::new()
            .with_max_scan_pages(self.max_pages)
            .with_page_offset(self.offset)
            .with_min_line_length(self.min_line_length)
            .with_require_title(!self.no_title)
            .with_bind_content(self.bind_content)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let parser = TocParser::with_config(args.config());
    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = match load(&args.input) {
        Ok(source) => source.parse(&parser, args.total_pages),
        Err(e) => {
            log::error!("Failed to read {}: {}", args.input.display(), e);
            toc_oxide::TocResult::failure(&e)
        },
    }
    .with_source(name);

    let rendered = if args.tree {
        result.render_tree()
    } else {
        match result.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("❌ {}", e);
                return ExitCode::FAILURE;
            },
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &rendered) {
                eprintln!("❌ Cannot write {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            eprintln!("✅ Saved to {}", path.display());
        },
        None => println!("{}", rendered),
    }

    if result.success {
        eprintln!(
            "📊 {} sections, {} top-level",
            result.metadata.total_sections,
            result.toc.len()
        );
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
