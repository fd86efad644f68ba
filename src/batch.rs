//! Directory batch processing.
//!
//! Every `*.pdf` file in an input directory is turned into `<stem>.json` in
//! an output directory. A document that cannot be read still produces a
//! file, holding the degraded result `{ "title": <stem>, "outline": [] }`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::OutlineResult;
use crate::outline::{infer_outline, InferenceOptions};
use crate::parser::{ParseOptions, PdfParser};
use crate::render::{write_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,
    /// Output JSON format
    pub format: JsonFormat,
    pub parse: ParseOptions,
    pub inference: InferenceOptions,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one document at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_inference_options(mut self, inference: InferenceOptions) -> Self {
        self.inference = inference;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Pretty,
            // A broken page should cost its headings, not the document.
            parse: ParseOptions::new().lenient(),
            inference: InferenceOptions::default(),
        }
    }
}

/// Outcome for one document of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub headings: usize,
    /// The document could not be read and got the fallback result
    pub degraded: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One report per input, in sorted input order
    pub documents: Vec<DocumentReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn degraded_count(&self) -> usize {
        self.documents.iter().filter(|d| d.degraded).count()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// List the PDF files (by extension, any case) directly inside `dir`,
/// sorted by path.
pub fn collect_inputs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Extract and infer the outline of one file, propagating failures.
pub fn try_process_file(
    path: &Path,
    parse: &ParseOptions,
    inference: &InferenceOptions,
) -> Result<OutlineResult> {
    let parser = PdfParser::open_with_options(path, parse.clone())?;
    let document = parser.extract()?;
    Ok(infer_outline(&document, inference))
}

/// Extract and infer the outline of one file.
///
/// Never fails: an unreadable document yields `{ title: <file stem>,
/// outline: [] }`.
pub fn process_file(
    path: &Path,
    parse: &ParseOptions,
    inference: &InferenceOptions,
) -> OutlineResult {
    process_or_degrade(path, parse, inference).0
}

fn process_or_degrade(
    path: &Path,
    parse: &ParseOptions,
    inference: &InferenceOptions,
) -> (OutlineResult, bool) {
    degrade_on_failure(path, || try_process_file(path, parse, inference))
}

/// Run `process`, turning both errors and panics into the fallback result.
/// lopdf can panic on malformed input; one such file must not take down
/// the rest of the batch.
fn degrade_on_failure<F>(path: &Path, process: F) -> (OutlineResult, bool)
where
    F: FnOnce() -> Result<OutlineResult>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(process))
        .unwrap_or_else(|_| Err(Error::PdfParse("parser panicked on malformed input".to_string())));

    match outcome {
        Ok(result) => (result, false),
        Err(e) => {
            log::warn!("{}: {}; writing fallback result", path.display(), e);
            (OutlineResult::degraded(file_stem(path)), true)
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Process every PDF in `input` into `output`, which is created if missing.
///
/// `progress` is called once per finished document, possibly from several
/// threads. Only directory-level failures are errors: an unreadable input
/// directory, an output directory that cannot be created, or a result that
/// cannot be written.
pub fn run_batch<F>(input: &Path, output: &Path, options: &BatchOptions, progress: F) -> Result<BatchReport>
where
    F: Fn(&DocumentReport) + Sync,
{
    fs::create_dir_all(output)?;
    let inputs = collect_inputs(input)?;
    log::info!("Found {} PDF file(s) in {}", inputs.len(), input.display());
    process_inputs(&inputs, output, options, progress)
}

/// Process already collected `inputs` into the existing directory `output`.
pub fn process_inputs<F>(
    inputs: &[PathBuf],
    output: &Path,
    options: &BatchOptions,
    progress: F,
) -> Result<BatchReport>
where
    F: Fn(&DocumentReport) + Sync,
{
    let start = Instant::now();

    let run_one = |path: &PathBuf| -> Result<DocumentReport> {
        let (result, degraded) = process_or_degrade(path, &options.parse, &options.inference);
        let target = output.join(format!("{}.json", file_stem(path)));

        let mut writer = BufWriter::new(File::create(&target)?);
        write_json(&mut writer, &result, options.format)
            .and_then(|()| writer.flush().map_err(Error::from))
            .map_err(|e| Error::Other(format!("cannot write {}: {}", target.display(), e)))?;

        let report = DocumentReport {
            input: path.clone(),
            output: target,
            headings: result.heading_count(),
            degraded,
        };
        progress(&report);
        Ok(report)
    };

    let documents = if options.parallel {
        inputs.par_iter().map(run_one).collect::<Result<Vec<_>>>()?
    } else {
        inputs.iter().map(run_one).collect::<Result<Vec<_>>>()?
    };

    Ok(BatchReport {
        documents,
        elapsed: start.elapsed(),
    })
}
