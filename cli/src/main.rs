//! pdfoutline CLI - infer titles and heading outlines from PDFs

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{collect_inputs, process_inputs, BatchOptions, DocumentReport};
use pdfoutline::outline::{assemble_lines, estimate_base_style};
use pdfoutline::render::{self, JsonFormat};
use pdfoutline::{InferenceOptions, Outliner, ParseOptions, PdfParser};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Infer the title and heading outline of PDF documents", long_about = None)]
struct Cli {
    /// Directory of PDF files
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Directory for the JSON results
    #[arg(long, value_name = "DIR")]
    outdir: Option<PathBuf>,

    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write <stem>.json for every PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Process one file at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Infer the outline of one PDF as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Print the outline of one PDF as an indented tree
    Tree {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Dump the assembled lines of one PDF with their style and position
    Lines {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only read the first N pages
        #[arg(long, value_name = "N")]
        max_pages: Option<u32>,
    },

    /// Show version information
    Version,
}

/// Heuristic knobs shared by the commands that infer outlines.
#[derive(Args, Clone, Default)]
struct Tuning {
    /// Only read the first N pages of each document
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Minimum score for a line to become the title
    #[arg(long, value_name = "SCORE")]
    title_threshold: Option<f64>,

    /// Minimum vertical gap (pt) above a heading
    #[arg(long, value_name = "PT")]
    min_gap: Option<f32>,

    /// Number of un-numbered heading styles that get a level
    #[arg(long, value_name = "N")]
    ranked_styles: Option<usize>,
}

impl Tuning {
    fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new().lenient();
        match self.max_pages {
            Some(pages) => options.with_max_pages(pages),
            None => options,
        }
    }

    fn inference_options(&self) -> InferenceOptions {
        let mut options = InferenceOptions::new();
        if let Some(threshold) = self.title_threshold {
            options = options.with_title_threshold(threshold);
        }
        if let Some(gap) = self.min_gap {
            options = options.with_min_gap(gap);
        }
        if let Some(styles) = self.ranked_styles {
            options = options.with_max_ranked_styles(styles);
        }
        options
    }

    fn outliner(&self) -> Outliner {
        Outliner::new()
            .with_parse_options(self.parse_options())
            .with_inference_options(self.inference_options())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
            tuning,
        }) => cmd_batch(&input, &output, sequential, compact, &tuning),
        Some(Commands::Json {
            input,
            output,
            compact,
            tuning,
        }) => cmd_json(&input, output.as_deref(), compact, &tuning),
        Some(Commands::Tree { input, tuning }) => cmd_tree(&input, &tuning),
        Some(Commands::Lines { input, max_pages }) => cmd_lines(&input, max_pages),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.outdir) {
            (Some(input), Some(outdir)) => cmd_batch(&input, &outdir, false, false, &cli.tuning),
            _ => {
                println!(
                    "{}",
                    "Usage: pdfoutline <INPUT_DIR> --outdir <OUTPUT_DIR>".yellow()
                );
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    compact: bool,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let inputs = collect_inputs(input)?;
    if inputs.is_empty() {
        println!("No PDF files found in {}", input.display());
        return Ok(());
    }
    println!("Found {} PDF file(s) to process.", inputs.len());

    let mut options = BatchOptions::new()
        .with_parse_options(tuning.parse_options())
        .with_inference_options(tuning.inference_options());
    if sequential {
        options = options.sequential();
    }
    if compact {
        options = options.with_format(JsonFormat::Compact);
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_inputs(&inputs, output, &options, |doc: &DocumentReport| {
        let name = doc
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if doc.degraded {
            pb.println(format!(
                "  {} {} {}",
                "->".dimmed(),
                "Created (unreadable, fallback):".yellow(),
                doc.output.display()
            ));
        } else {
            pb.println(format!(
                "  {} {} {} ({} headings)",
                "->".dimmed(),
                "Created:".green(),
                doc.output.display(),
                doc.headings
            ));
        }
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "\n{} in {:.2} seconds",
        "Completed".green().bold(),
        report.elapsed.as_secs_f64()
    );
    if report.degraded_count() > 0 {
        println!(
            "{} {} file(s) could not be read",
            "Warning:".yellow().bold(),
            report.degraded_count()
        );
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = tuning.outliner().extract(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_tree(input: &Path, tuning: &Tuning) -> Result<(), Box<dyn std::error::Error>> {
    let outline = tuning.outliner().extract(input)?;
    print!("{}", render::to_tree(&outline));
    Ok(())
}

fn cmd_lines(input: &Path, max_pages: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new().lenient();
    if let Some(pages) = max_pages {
        options = options.with_max_pages(pages);
    }
    let document = PdfParser::open_with_options(input, options)?.extract()?;

    let lines = assemble_lines(&document.pages);
    let base = estimate_base_style(&lines, &InferenceOptions::default());

    println!("{}", "Document Lines".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), document.pdf_version);
    println!(
        "{}: {} of {}",
        "Pages".bold(),
        document.page_count(),
        document.total_pages
    );
    println!("{}: {}", "Lines".bold(), lines.len());
    println!();
    print!("{}", render::to_line_table(&lines, &base));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline inference");
}
