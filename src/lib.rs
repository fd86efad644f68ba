//! # pdfoutline
//!
//! Title and heading outline inference for PDF documents.
//!
//! PDFs rarely carry a usable structure tree. This library reads the text
//! layout of each page (fonts, sizes, positions) and infers the document
//! title and a leveled H1..H4 outline from typography and numbering alone.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("report.pdf")?;
//!     println!("{}", render::to_tree(&outline));
//!
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`parser`] turns a PDF into [`ExtractedDocument`] page layouts (lopdf)
//! - [`outline`] infers the title and headings from the layouts
//! - [`render`] writes the result as JSON or an indented tree
//! - [`batch`] processes a directory of PDFs, optionally in parallel

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{run_batch, BatchOptions, BatchReport, DocumentReport};
pub use detect::{is_pdf, pdf_version_from_bytes, pdf_version_from_path};
pub use error::{Error, Result};
pub use model::{
    BBox, Block, ExtractedDocument, Heading, Level, Line, LineGroup, OutlineResult, PageLayout,
    Span, TextBlock,
};
pub use outline::{infer_outline, InferenceOptions};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract the page layouts of a PDF file.
pub fn extract_document<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument> {
    PdfParser::open(path)?.extract()
}

/// Infer the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// let outline = pdfoutline::extract_outline("report.pdf").unwrap();
/// println!("{} ({} headings)", outline.title, outline.heading_count());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    Outliner::new().extract(path)
}

/// Infer the title and outline of a PDF file with custom options.
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    parse: ParseOptions,
    inference: &InferenceOptions,
) -> Result<OutlineResult> {
    let document = PdfParser::open_with_options(path, parse)?.extract()?;
    Ok(infer_outline(&document, inference))
}

/// Infer the title and outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<OutlineResult> {
    Outliner::new().extract_bytes(data)
}

/// Infer the title and outline of a PDF read from `reader`.
pub fn extract_outline_reader<R: Read>(reader: R) -> Result<OutlineResult> {
    let document = PdfParser::from_reader(reader)?.extract()?;
    Ok(infer_outline(&document, &InferenceOptions::default()))
}

/// Builder for outline extraction.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{InferenceOptions, Outliner};
///
/// let outline = Outliner::new()
///     .lenient()
///     .with_max_pages(50)
///     .with_inference_options(InferenceOptions::new().with_title_threshold(30.0))
///     .extract("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    parse_options: ParseOptions,
    inference_options: InferenceOptions,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep going when individual pages cannot be decoded.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Only read the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.parse_options = self.parse_options.with_max_pages(pages);
        self
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    pub fn with_inference_options(mut self, options: InferenceOptions) -> Self {
        self.inference_options = options;
        self
    }

    /// Infer the outline of a PDF file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        extract_outline_with_options(path, self.parse_options.clone(), &self.inference_options)
    }

    /// Infer the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<OutlineResult> {
        let parser = PdfParser::from_bytes_with_options(data, self.parse_options.clone())?;
        Ok(infer_outline(&parser.extract()?, &self.inference_options))
    }

    /// Infer the outline of a PDF file, falling back to
    /// `{ title: <file stem>, outline: [] }` if it cannot be read.
    pub fn extract_or_degrade<P: AsRef<Path>>(&self, path: P) -> OutlineResult {
        batch::process_file(path.as_ref(), &self.parse_options, &self.inference_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .lenient()
            .with_max_pages(2)
            .with_inference_options(InferenceOptions::new().with_max_ranked_styles(2));

        assert_eq!(outliner.parse_options.error_mode, ErrorMode::Lenient);
        assert_eq!(outliner.parse_options.max_pages, Some(2));
        assert_eq!(outliner.inference_options.max_ranked_styles, 2);
    }

    #[test]
    fn test_extract_bytes_empty_data() {
        assert!(matches!(extract_outline_bytes(&[]), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_invalid_header() {
        let result = extract_outline_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_reader_error() {
        let result = extract_outline_reader(std::io::Cursor::new(b"%PDF-x.y".to_vec()));
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_extract_or_degrade_missing_file() {
        let result = Outliner::new().extract_or_degrade("/nonexistent/dir/quarterly.pdf");
        assert_eq!(result, OutlineResult::degraded("quarterly"));
    }
}
