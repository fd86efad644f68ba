//! Title selection on the first page.

use super::InferenceOptions;
use crate::model::Line;

const BOLD_BONUS: f64 = 5.0;
const CENTERED_BONUS: f64 = 10.0;
const UPPERCASE_BONUS: f64 = 5.0;

/// True if the text has at least one cased character and no lower-case ones.
pub fn is_all_caps(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Score a first-page line as a title. Returns `None` for lines that are not
/// title candidates: other pages, or a word count outside the allowed range.
pub fn title_score(line: &Line, page_width: f32, options: &InferenceOptions) -> Option<f64> {
    let words = line.word_count();
    if line.page != 0 || words < options.title_min_words || words > options.title_max_words {
        return None;
    }

    let mut score = 1.5 * f64::from(line.size) - 0.1 * f64::from(line.top());
    if line.is_bold {
        score += BOLD_BONUS;
    }

    let page_width = f64::from(page_width);
    let offset = (f64::from(line.bbox.center_x()) - page_width / 2.0).abs();
    if offset < page_width * options.title_center_tolerance {
        score += CENTERED_BONUS;
    }

    if is_all_caps(&line.text) {
        score += UPPERCASE_BONUS;
    }

    Some(score)
}

/// Pick the title line: the best positive-scoring candidate, provided its
/// score clears the threshold. The earliest line wins ties.
pub fn select_title<'a>(
    lines: &'a [Line],
    page_width: f32,
    options: &InferenceOptions,
) -> Option<&'a Line> {
    let mut best: Option<(&Line, f64)> = None;

    for line in lines {
        let Some(score) = title_score(line, page_width, options) else {
            continue;
        };
        if score <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((line, score));
        }
    }

    match best {
        Some((line, score)) if score > options.title_threshold => {
            log::debug!("Title {:?} (score {:.1})", line.text, score);
            Some(line)
        }
        Some((line, score)) => {
            log::debug!(
                "Best title candidate {:?} scored {:.1}, below threshold",
                line.text,
                score
            );
            None
        }
        None => None,
    }
}
