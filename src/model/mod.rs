//! Data model shared by extraction and inference.
//!
//! [`page`] types describe what the extraction layer hands over, [`Line`]
//! and friends are the engine's working set, and [`OutlineResult`] is what
//! gets serialized.

mod document;
mod line;
mod outline;
mod page;

pub use document::ExtractedDocument;
pub use line::{is_bold_font, BaseStyle, Line, StyleKey};
pub use outline::{Heading, Level, OutlineResult};
pub use page::{BBox, Block, LineGroup, PageLayout, Span, TextBlock};
