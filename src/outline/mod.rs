//! Title and heading inference.
//!
//! The engine turns extracted page layouts into an [`OutlineResult`] in six
//! strictly sequential steps:
//!
//! 1. [`lines`] assembles line groups into [`Line`] records ordered by page
//!    and vertical position.
//! 2. [`style`] estimates the body-text style.
//! 3. [`title`] scores first-page lines and picks a title.
//! 4. [`candidate`] filters heading-like lines.
//! 5. [`level`] assigns H1..H4 from numbering, then from style rank.
//! 6. [`assemble`] orders, deduplicates and finalizes the outline.
//!
//! Every step is a pure function of its inputs; nothing is shared between
//! documents.

pub mod assemble;
pub mod candidate;
pub mod freq;
pub mod level;
pub mod lines;
mod options;
pub mod style;
pub mod title;

pub use assemble::assemble_outline;
pub use candidate::{find_candidates, is_heading_candidate, is_noise};
pub use level::{assign_levels, numbering_level, LeveledCandidate};
pub use lines::{assemble_line, assemble_lines, normalize_lines};
pub use options::InferenceOptions;
pub use style::estimate_base_style;
pub use title::{select_title, title_score};

use crate::model::{ExtractedDocument, Line, OutlineResult, PageLayout};

/// Infer the outline of an extracted document.
pub fn infer_outline(document: &ExtractedDocument, options: &InferenceOptions) -> OutlineResult {
    infer_from_pages(&document.pages, options)
}

/// Infer the outline from page layouts.
///
/// The width of the first page is used to judge title centering.
pub fn infer_from_pages(pages: &[PageLayout], options: &InferenceOptions) -> OutlineResult {
    let mut lines = assemble_lines(pages);
    if options.normalize_unicode {
        normalize_lines(&mut lines);
    }
    let page_width = pages.first().map_or(0.0, |page| page.width);
    infer_from_lines(&lines, page_width, options)
}

/// Infer the outline from already assembled lines.
///
/// `lines` must be ordered by page and top coordinate, as produced by
/// [`assemble_lines`].
pub fn infer_from_lines(lines: &[Line], page_width: f32, options: &InferenceOptions) -> OutlineResult {
    if lines.is_empty() {
        return OutlineResult::default();
    }

    let title = select_title(lines, page_width, options)
        .map(|line| line.text.clone())
        .unwrap_or_default();
    let base = estimate_base_style(lines, options);
    let candidates = find_candidates(lines, &title, &base, options);
    let leveled = assign_levels(&candidates, options);
    let result = assemble_outline(&title, leveled, options);

    log::info!(
        "Inferred outline: title {:?}, {} headings",
        result.title,
        result.outline.len()
    );
    result
}
