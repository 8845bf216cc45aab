//! pdf-outline CLI - infer titles and heading outlines from PDFs

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::batch::{self, BatchEntry, DocumentStatus};
use pdf_outline::render::{self, JsonFormat};
use pdf_outline::{
    BatchOptions, ExtractOptions, ExtractionOutcome, OutlineConfig, StructureExtractor,
    StyleProfile,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Infer document titles and heading outlines from PDF layout", long_about = None)]
struct Cli {
    /// Directory of input PDFs
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory for JSON results
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT", default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    heuristics: HeuristicArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct HeuristicArgs {
    /// Fraction of the page height below which spans are ignored as footers
    #[arg(long, global = true, value_name = "RATIO")]
    footer_ratio: Option<f32>,

    /// Maximum vertical gap between merged title lines
    #[arg(long, global = true, value_name = "POINTS")]
    title_gap: Option<f32>,

    /// Order headings by the first span with matching text
    #[arg(long, global = true)]
    legacy_sort: bool,
}

impl HeuristicArgs {
    fn config(&self) -> OutlineConfig {
        let mut config = OutlineConfig::new();
        if let Some(ratio) = self.footer_ratio {
            config = config.with_footer_ratio(ratio);
        }
        if let Some(gap) = self.title_gap {
            config = config.with_title_gap(gap);
        }
        if self.legacy_sort {
            config = config.legacy_sort();
        }
        config
    }

    fn extractor(&self) -> StructureExtractor {
        // Skip undecodable pages instead of failing the whole document
        StructureExtractor::new()
            .with_options(ExtractOptions::new().lenient())
            .with_config(self.config())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory
    Batch {
        /// Directory of input PDFs
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for JSON results
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process documents in parallel
        #[arg(long)]
        parallel: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Infer the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the body size and heading style ranking of a PDF
    Styles {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let heuristics = cli.heuristics.clone();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            parallel,
            compact,
        }) => cmd_batch(&input, &output, &heuristics, parallel, compact),
        Some(Commands::Extract {
            input,
            output,
            compact,
        }) => cmd_extract(&input, output.as_deref(), &heuristics, compact),
        Some(Commands::Styles { input }) => cmd_styles(&input, &heuristics),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, &heuristics, false, false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    heuristics: &HeuristicArgs,
    parallel: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = batch::list_pdfs(input)?;
    if files.is_empty() {
        println!("{} {}", "No PDF files in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let extractor = heuristics.extractor();
    let options = BatchOptions::new()
        .with_parallel(parallel)
        .with_format(json_format(compact));

    let report = batch::process_directory_with(input, output, &extractor, &options, |entry| {
        pb.println(describe_entry(entry));
        pb.inc(1);
    })?;

    pb.finish_and_clear();

    println!(
        "\n{} {} processed, {} succeeded, {} with sentinel results",
        "Done!".green().bold(),
        report.len(),
        report.succeeded(),
        report.failed()
    );
    println!("{} {}", "Output:".bold(), output.display());

    Ok(())
}

fn describe_entry(entry: &BatchEntry) -> String {
    let name = entry
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(ref err) = entry.write_error {
        return format!("{} {}: {}", "✗".red(), name, err);
    }

    match &entry.status {
        DocumentStatus::Extracted => format!(
            "{} {} → {} ({} headings)",
            "✓".green(),
            name,
            entry.title.bold(),
            entry.outline_len
        ),
        DocumentStatus::OpenFailure(err) => {
            format!("{} {}: {}", "✗".red(), name, err.dimmed())
        }
        DocumentStatus::EmptyDocument => format!("{} {}: no text found", "!".yellow(), name),
        DocumentStatus::OutputCollision(first) => format!(
            "{} {}: skipped, {} already claimed {}",
            "!".yellow(),
            name,
            first.display(),
            entry.output.display()
        ),
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    heuristics: &HeuristicArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = heuristics.extractor().run_file(input);
    match &outcome {
        ExtractionOutcome::OpenFailure(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
        }
        ExtractionOutcome::EmptyDocument => {
            eprintln!("{} no text found in {}", "Warning:".yellow(), input.display());
        }
        ExtractionOutcome::Extracted(_) => {}
    }

    let structure = outcome.into_structure();
    let json = render::to_json(&structure, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_styles(input: &Path, heuristics: &HeuristicArgs) -> Result<(), Box<dyn std::error::Error>> {
    let layout = pdf_outline::decode_file(input, ExtractOptions::new().lenient())?;
    let config = heuristics.config();
    let profile = StyleProfile::analyze(&layout.spans, &config);

    println!("{}", "Style Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), layout.page_count());
    println!("{}: {}", "Spans".bold(), layout.spans.len());
    println!("{}: {}pt", "Body size".bold(), profile.body_size);

    println!();
    println!("{}", "Styles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (style, count) in &profile.style_counts {
        let level = profile
            .levels
            .get(style)
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>4}  {:<16} {:>6}", level.bold(), style.to_string(), count);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdf-outline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Layout-based PDF outline inference");
    println!();
    println!("License: MIT");
}
