//! Heading level assignment.
//!
//! Levels come from two sources. Explicit numbering ("2.1 Background",
//! "IV. Results", "Appendix B") fixes the level of a heading and, through
//! its style, of un-numbered headings that share that style. Remaining
//! styles are ranked by size and weight and mapped to H1..H3.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use super::InferenceOptions;
use crate::model::{Level, Line, StyleKey};

static NUMBERING: OnceLock<Regex> = OnceLock::new();
static APPENDIX: OnceLock<Regex> = OnceLock::new();

fn numbering_regex() -> &'static Regex {
    NUMBERING.get_or_init(|| {
        // 1: roman numeral with a period, 2: dotted decimal
        Regex::new(r"(?i)^\s*(?:([IVXLCDM]+)\.|(\d+(?:\.\d+)*))[.\s]+")
            .expect("numbering pattern is valid")
    })
}

fn appendix_regex() -> &'static Regex {
    APPENDIX.get_or_init(|| {
        Regex::new(r"(?i)^Appendix\s+[A-Z]").expect("appendix pattern is valid")
    })
}

/// A heading candidate with its assigned level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeveledCandidate<'a> {
    pub line: &'a Line,
    pub level: Level,
}

/// Level implied by a leading numbering token, if any.
///
/// The depth of a dotted decimal is its number of internal dots, so `3` is
/// H1, `3.1` H2 and `3.1.4` H3. Roman numerals and `Appendix X` are H1.
pub fn numbering_level(text: &str) -> Option<Level> {
    if let Some(caps) = numbering_regex().captures(text) {
        let depth = caps
            .get(2)
            .map(|decimal| decimal.as_str().matches('.').count())
            .unwrap_or(0);
        return Some(Level::from_depth(depth));
    }

    if appendix_regex().is_match(text) {
        return Some(Level::H1);
    }

    None
}

/// Visual weight of a style: larger and bolder ranks higher.
pub fn style_rank(style: &StyleKey) -> i32 {
    style.size * 2 + if style.is_bold() { 10 } else { 0 }
}

/// Assign levels to heading candidates, dropping those that get none.
///
/// Candidates keep their input order.
pub fn assign_levels<'a>(
    candidates: &[&'a Line],
    options: &InferenceOptions,
) -> Vec<LeveledCandidate<'a>> {
    let numbered: Vec<Option<Level>> = candidates
        .iter()
        .map(|line| numbering_level(&line.text))
        .collect();

    // Shallowest numbered level seen for each style.
    let mut style_levels: HashMap<StyleKey, Level> = HashMap::new();
    for (line, level) in candidates.iter().zip(&numbered) {
        if let Some(level) = *level {
            style_levels
                .entry(line.style())
                .and_modify(|existing| *existing = (*existing).min(level))
                .or_insert(level);
        }
    }

    // Styles of un-numbered candidates, in order of first appearance so
    // that equally ranked styles resolve the same way on every run.
    let mut seen = HashSet::new();
    let mut unnumbered: Vec<StyleKey> = candidates
        .iter()
        .zip(&numbered)
        .filter(|(_, level)| level.is_none())
        .map(|(line, _)| line.style())
        .filter(|style| seen.insert(style.clone()))
        .collect();
    unnumbered.sort_by_key(|style| Reverse(style_rank(style)));

    let mut assigned = 0;
    for style in unnumbered {
        if style_levels.contains_key(&style) {
            continue;
        }
        if assigned >= options.max_ranked_styles {
            log::debug!("Style {} ranked past the limit, dropping its candidates", style);
            break;
        }
        log::debug!("Style {} -> {}", style, Level::from_depth(assigned));
        style_levels.insert(style, Level::from_depth(assigned));
        assigned += 1;
    }

    candidates
        .iter()
        .zip(numbered)
        .filter_map(|(line, level)| {
            level
                .or_else(|| style_levels.get(&line.style()).copied())
                .map(|level| LeveledCandidate { line: *line, level })
        })
        .collect()
}
