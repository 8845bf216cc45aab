//! Directory batch processing.
//!
//! Every PDF in the input directory yields one JSON file in the output
//! directory. A document that fails to open, has no text, or cannot be
//! written is recorded in the [`BatchReport`]; it never stops the batch.
//!
//! Output names drop the extension, so `a.pdf` and `a.PDF` share
//! `a.json`. The first input in sorted order claims the name; the others are
//! reported as [`DocumentStatus::OutputCollision`] and not processed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::extract::{ExtractionOutcome, StructureExtractor};
use crate::render::{write_json, JsonFormat};

/// Options for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// JSON output format
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create new batch options with defaults (sequential, pretty JSON).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

/// How a single document fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Title and outline were inferred.
    Extracted,
    /// The document could not be opened or decoded.
    OpenFailure(String),
    /// The document has no text.
    EmptyDocument,
    /// Another input already claimed the same output file.
    OutputCollision(PathBuf),
}

/// Record of one processed document.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Input PDF
    pub input: PathBuf,
    /// Output JSON
    pub output: PathBuf,
    /// Processing status
    pub status: DocumentStatus,
    /// Title written to the output (sentinel on failure)
    pub title: String,
    /// Number of outline entries written
    pub outline_len: usize,
    /// Error writing the output, if any
    pub write_error: Option<String>,
}

impl BatchEntry {
    /// Whether the output file was written.
    pub fn is_written(&self) -> bool {
        self.write_error.is_none() && !matches!(self.status, DocumentStatus::OutputCollision(_))
    }
}

/// Result of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of documents processed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no document was processed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Documents whose structure was inferred and written.
    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == DocumentStatus::Extracted && e.is_written())
            .count()
    }

    /// Documents that produced a sentinel result or could not be written.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

/// List the PDF files (by extension, case-insensitive) of a directory, sorted by name.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InputDirNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for an input document: `<output_dir>/<stem>.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(".json");
    output_dir.join(name)
}

/// Process one document and write its JSON record.
pub fn process_document(
    input: &Path,
    output_dir: &Path,
    extractor: &StructureExtractor,
    format: JsonFormat,
) -> BatchEntry {
    log::info!("Processing {}", input.display());

    let outcome = extractor.run_file(input);
    let status = match &outcome {
        ExtractionOutcome::Extracted(_) => DocumentStatus::Extracted,
        ExtractionOutcome::OpenFailure(e) => DocumentStatus::OpenFailure(e.to_string()),
        ExtractionOutcome::EmptyDocument => DocumentStatus::EmptyDocument,
    };
    let structure = outcome.into_structure();

    let output = output_path_for(input, output_dir);
    let write_error = match write_json(&output, &structure, format) {
        Ok(()) => {
            log::info!("Created {}", output.display());
            None
        }
        Err(e) => {
            log::error!("Error writing JSON for {}: {}", input.display(), e);
            Some(e.to_string())
        }
    };

    BatchEntry {
        input: input.to_path_buf(),
        output,
        status,
        title: structure.title,
        outline_len: structure.outline.len(),
        write_error,
    }
}

/// Process every PDF in `input_dir`, writing results to `output_dir`.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    extractor: &StructureExtractor,
    options: &BatchOptions,
) -> Result<BatchReport> {
    process_directory_with(input_dir, output_dir, extractor, options, |_| {})
}

/// Like [`process_directory`], calling `on_done` after each document.
pub fn process_directory_with<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    extractor: &StructureExtractor,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&BatchEntry) + Sync,
{
    let files = list_pdfs(input_dir)?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let jobs = claim_outputs(files, output_dir);

    let run = |(path, claimed_by): &(PathBuf, Option<PathBuf>)| {
        let entry = match claimed_by {
            Some(first) => collision_entry(path, first, output_dir),
            None => process_document(path, output_dir, extractor, options.format),
        };
        on_done(&entry);
        entry
    };

    let entries = if options.parallel {
        jobs.par_iter().map(run).collect()
    } else {
        jobs.iter().map(run).collect()
    };

    Ok(BatchReport { entries })
}

/// Pair each input with the earlier input that already owns its output
/// path, if any.
fn claim_outputs(files: Vec<PathBuf>, output_dir: &Path) -> Vec<(PathBuf, Option<PathBuf>)> {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    files
        .into_iter()
        .map(|path| {
            let output = output_path_for(&path, output_dir);
            let claimed_by = match owners.get(&output) {
                Some(first) => Some(first.clone()),
                None => {
                    owners.insert(output, path.clone());
                    None
                }
            };
            (path, claimed_by)
        })
        .collect()
}

fn collision_entry(input: &Path, first: &Path, output_dir: &Path) -> BatchEntry {
    let output = output_path_for(input, output_dir);
    log::warn!(
        "Skipping {}: {} is already written for {}",
        input.display(),
        output.display(),
        first.display()
    );
    BatchEntry {
        input: input.to_path_buf(),
        output,
        status: DocumentStatus::OutputCollision(first.to_path_buf()),
        title: String::new(),
        outline_len: 0,
        write_error: None,
    }
}
