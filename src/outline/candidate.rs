//! Heading candidate filtering.
//!
//! A heading candidate is a line that is set apart from the text above it,
//! styled differently from body text, short, not shaped like prose, and not
//! an obvious artifact (page numbers, captions, rules).

use std::sync::OnceLock;

use regex::Regex;

use super::InferenceOptions;
use crate::model::{BaseStyle, Line};

static BARE_NUMBERING: OnceLock<Regex> = OnceLock::new();

/// Digits (any script), dots, dashes and whitespace only.
fn bare_numbering_regex() -> &'static Regex {
    BARE_NUMBERING
        .get_or_init(|| Regex::new(r"^[\s\d.\-]+$").expect("bare numbering pattern is valid"))
}

/// Lines starting with these (case-insensitive) are captions or boilerplate.
/// English only.
const BOILERPLATE_PREFIXES: [&str; 4] = ["figure", "table", "copyright", "page"];

const SENTENCE_ENDINGS: &[char] = &['.', ',', ';'];

/// Share of symbol characters above which a line containing a `---` rule is
/// treated as a separator artifact.
const SYMBOL_RATIO_LIMIT: f64 = 0.3;

/// Check for table rules, bare numbering and caption/boilerplate lines.
pub fn is_noise(text: &str) -> bool {
    let total = text.chars().count();
    if total > 0 && text.contains("---") {
        let symbols = text
            .chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
            .count();
        if symbols as f64 / total as f64 > SYMBOL_RATIO_LIMIT {
            return true;
        }
    }

    if bare_numbering_regex().is_match(text) {
        return true;
    }

    let lower = text.to_lowercase();
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Decide whether `line`, preceded by `prev`, looks like a heading.
pub fn is_heading_candidate(
    line: &Line,
    prev: &Line,
    base: &BaseStyle,
    options: &InferenceOptions,
) -> bool {
    if is_noise(&line.text) {
        return false;
    }

    let words = line.word_count();

    let spaced = line.page != prev.page || line.top() - prev.bbox.bottom > options.min_gap;
    let distinct = line.size > base.size || (line.is_bold && !base.is_bold);
    let short = words < options.max_heading_words;
    let not_prose =
        !line.text.ends_with(SENTENCE_ENDINGS) || words < options.short_fragment_words;

    spaced && distinct && short && not_prose
}

/// Collect the heading candidates of a document.
///
/// The first line is never a candidate (it has no predecessor), nor is any
/// line whose text equals the chosen title.
pub fn find_candidates<'a>(
    lines: &'a [Line],
    title: &str,
    base: &BaseStyle,
    options: &InferenceOptions,
) -> Vec<&'a Line> {
    let candidates: Vec<&Line> = lines
        .windows(2)
        .filter(|pair| pair[1].text != title)
        .filter(|pair| is_heading_candidate(&pair[1], &pair[0], base, options))
        .map(|pair| &pair[1])
        .collect();

    log::debug!(
        "{} of {} lines are heading candidates",
        candidates.len(),
        lines.len()
    );
    candidates
}
