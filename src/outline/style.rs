//! Body-text style estimation.

use super::{freq, InferenceOptions};
use crate::model::{BaseStyle, Line, StyleKey};

/// Estimate the style of ordinary paragraph text.
///
/// Long lines ending in a period are the primary evidence. Without any, long
/// lines of any shape are used, and a document with neither gets the
/// configured default size with the `"default"` font.
pub fn estimate_base_style(lines: &[Line], options: &InferenceOptions) -> BaseStyle {
    let mut pool: Vec<StyleKey> = lines
        .iter()
        .filter(|l| l.word_count() > options.prose_min_words && l.text.ends_with('.'))
        .map(Line::style)
        .collect();

    if pool.is_empty() {
        pool = lines
            .iter()
            .filter(|l| l.word_count() > options.fallback_min_words)
            .map(Line::style)
            .collect();
    }

    match freq::mode(pool) {
        Some(key) => {
            log::debug!("Base style: {}", key);
            BaseStyle::from_key(key)
        }
        None => {
            log::debug!("No body text found, using default base style");
            BaseStyle::fallback(options.default_body_size)
        }
    }
}
