//! # pdf-outline
//!
//! Infers a document outline (title + nested headings) from the visual
//! layout of PDF pages, using only typographic signals: font size, font
//! weight and vertical position.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_file, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let structure = extract_file("document.pdf");
//!     println!("{}", render::to_json(&structure, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - **Style profiling**: the most common font size is body text; every
//!   larger or bold style becomes a heading style, ranked `H1`, `H2`, ...
//! - **Title detection**: the large lines at the top of page 1, merged while
//!   they are adjacent and share one size
//! - **Outline building**: heading-style spans, deduplicated by text, with
//!   lexical overrides (`Appendix A:` → `H2`, `1. ` → `H3`) and footer noise
//!   removed
//!
//! Documents that cannot be opened or contain no text produce sentinel
//! results instead of errors, so batch runs never abort on one bad file.

pub mod analysis;
pub mod batch;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{analyze_layout, OutlineConfig, OverrideRule, PositionLookup, StyleProfile};
pub use batch::{process_directory, BatchOptions, BatchReport};
pub use error::{Error, Result};
pub use extract::{ExtractionOutcome, StructureExtractor, ERROR_TITLE, NO_TEXT_TITLE};
pub use model::{
    BBox, DocumentLayout, DocumentStructure, HeadingLevel, HeadingLevelMap, OutlineEntry,
    PageLayout, Style, TextSpan,
};
pub use parser::{ErrorMode, ExtractOptions, LayoutExtractor, LopdfBackend, PdfBackend};
pub use render::JsonFormat;

use std::path::Path;

/// Infer the structure of a PDF file.
///
/// Never fails: an unreadable document yields the
/// [`ERROR_TITLE`] sentinel and a document without text the
/// [`NO_TEXT_TITLE`] sentinel, both with an empty outline.
///
/// # Example
///
/// ```no_run
/// let structure = pdf_outline::extract_file("report.pdf");
/// for entry in &structure.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> DocumentStructure {
    StructureExtractor::new().extract_file(path)
}

/// Infer the structure of an in-memory PDF.
pub fn extract_bytes(data: &[u8]) -> DocumentStructure {
    StructureExtractor::new().extract_bytes(data)
}

/// Decode a PDF file into page geometry and positioned spans.
pub fn decode_file<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<DocumentLayout> {
    let backend = LopdfBackend::load_file(path)?;
    LayoutExtractor::new(&backend, options).extract()
}

/// Infer the structure of spans supplied by an external decoder.
pub fn extract_layout(layout: &DocumentLayout) -> DocumentStructure {
    StructureExtractor::new().run_layout(layout).into_structure()
}
