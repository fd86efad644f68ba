//! PDF parsing and layout extraction.

mod content;
mod layout;
mod options;
mod pdf_parser;

pub use content::{ContentInterpreter, PageContent};
pub use layout::{LayoutAnalyzer, TextLine, TextSpan};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
