//! Per-document orchestration.
//!
//! [`StructureExtractor`] decodes a document, runs the inference pipeline and
//! absorbs the two recognized failure kinds (the document cannot be opened,
//! or it has no text) into sentinel results.

use std::path::Path;

use crate::analysis::{analyze_layout, OutlineConfig};
use crate::error::Error;
use crate::model::{DocumentLayout, DocumentStructure};
use crate::parser::{ExtractOptions, LayoutExtractor, LopdfBackend, PdfBackend};

/// Title of the result for a document that could not be opened or decoded.
pub const ERROR_TITLE: &str = "Error processing file";

/// Title of the result for a document without extractable text.
pub const NO_TEXT_TITLE: &str = "No text found";

/// Result of processing one document.
#[derive(Debug)]
pub enum ExtractionOutcome {
    /// The pipeline ran and produced a structure.
    Extracted(DocumentStructure),
    /// The decoder could not open or decode the document.
    OpenFailure(Error),
    /// The document opened but contains no text spans.
    EmptyDocument,
}

impl ExtractionOutcome {
    /// Whether the pipeline produced a structure.
    pub fn is_extracted(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted(_))
    }

    /// Short description used in logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionOutcome::Extracted(_) => "extracted",
            ExtractionOutcome::OpenFailure(_) => "open failure",
            ExtractionOutcome::EmptyDocument => "empty document",
        }
    }

    /// The structure to write out; failures become sentinel results.
    pub fn into_structure(self) -> DocumentStructure {
        match self {
            ExtractionOutcome::Extracted(structure) => structure,
            ExtractionOutcome::OpenFailure(_) => DocumentStructure::with_title(ERROR_TITLE),
            ExtractionOutcome::EmptyDocument => DocumentStructure::with_title(NO_TEXT_TITLE),
        }
    }
}

/// Runs decoding and outline inference for one document at a time.
#[derive(Debug, Clone, Default)]
pub struct StructureExtractor {
    options: ExtractOptions,
    config: OutlineConfig,
}

impl StructureExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set span extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Set inference heuristics.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Inference heuristics in use.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Process a PDF file.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> ExtractionOutcome {
        let path = path.as_ref();
        match LopdfBackend::load_file(path) {
            Ok(backend) => self.run_backend(&backend),
            Err(e) => {
                log::error!("Error opening {}: {}", path.display(), e);
                ExtractionOutcome::OpenFailure(e)
            }
        }
    }

    /// Process an in-memory PDF.
    pub fn run_bytes(&self, data: &[u8]) -> ExtractionOutcome {
        match LopdfBackend::load_bytes(data) {
            Ok(backend) => self.run_backend(&backend),
            Err(e) => {
                log::error!("Error opening document: {}", e);
                ExtractionOutcome::OpenFailure(e)
            }
        }
    }

    /// Process a document through any backend.
    pub fn run_backend<B: PdfBackend>(&self, backend: &B) -> ExtractionOutcome {
        match self.decode(backend) {
            Ok(layout) => self.run_layout(&layout),
            Err(e) => {
                log::error!("Error decoding document: {}", e);
                ExtractionOutcome::OpenFailure(e)
            }
        }
    }

    /// Run inference on spans produced by an external decoder.
    pub fn run_layout(&self, layout: &DocumentLayout) -> ExtractionOutcome {
        if layout.is_empty() {
            log::warn!("No text spans in {} pages", layout.page_count());
            return ExtractionOutcome::EmptyDocument;
        }
        ExtractionOutcome::Extracted(analyze_layout(layout, &self.config))
    }

    /// Decode a document into page geometry and spans without analysis.
    pub fn decode<B: PdfBackend>(&self, backend: &B) -> crate::Result<DocumentLayout> {
        LayoutExtractor::new(backend, self.options.clone()).extract()
    }

    /// Title and outline of a PDF file, with failures turned into sentinels.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> DocumentStructure {
        self.run_file(path).into_structure()
    }

    /// Title and outline of an in-memory PDF, with failures turned into sentinels.
    pub fn extract_bytes(&self, data: &[u8]) -> DocumentStructure {
        self.run_bytes(data).into_structure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, PageLayout, TextSpan};

    #[test]
    fn test_open_failure_sentinel() {
        let structure = StructureExtractor::new().extract_bytes(b"not a pdf at all");
        assert_eq!(structure, DocumentStructure::with_title(ERROR_TITLE));
        assert!(structure.outline.is_empty());
    }

    #[test]
    fn test_missing_file_sentinel() {
        let outcome = StructureExtractor::new().run_file("/nonexistent/path/report.pdf");
        assert!(matches!(outcome, ExtractionOutcome::OpenFailure(_)));
        assert_eq!(outcome.into_structure().title, ERROR_TITLE);
    }

    #[test]
    fn test_empty_document_sentinel() {
        let mut layout = DocumentLayout::new();
        layout.add_page(PageLayout::letter(1));

        let outcome = StructureExtractor::new().run_layout(&layout);
        assert_eq!(outcome.label(), "empty document");
        assert_eq!(
            outcome.into_structure(),
            DocumentStructure::with_title(NO_TEXT_TITLE)
        );
    }

    #[test]
    fn test_extracted_layout() {
        let mut layout = DocumentLayout::new();
        layout.add_page(PageLayout::letter(1));
        layout.add_span(TextSpan::new(
            "Body text only",
            11.0,
            "Times-Roman",
            BBox::new(72.0, 100.0, 300.0, 111.0),
            1,
        ));

        let outcome = StructureExtractor::new().run_layout(&layout);
        assert!(outcome.is_extracted());
        let structure = outcome.into_structure();
        assert_eq!(structure.title, crate::analysis::TITLE_NOT_FOUND);
        assert!(structure.outline.is_empty());
    }
}
