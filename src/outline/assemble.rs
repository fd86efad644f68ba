//! Final outline assembly.

use std::collections::HashSet;

use super::level::LeveledCandidate;
use super::InferenceOptions;
use crate::model::{Heading, Level, OutlineResult};

/// Order leveled candidates by page and position, keep the first heading of
/// each distinct text, and build the result.
///
/// When `title` is empty and the outline opens with an H1 near the top of
/// its page, that heading becomes the title instead.
pub fn assemble_outline(
    title: &str,
    mut candidates: Vec<LeveledCandidate<'_>>,
    options: &InferenceOptions,
) -> OutlineResult {
    candidates.sort_by(|a, b| {
        a.line
            .page
            .cmp(&b.line.page)
            .then(a.line.top().total_cmp(&b.line.top()))
    });

    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries: Vec<&LeveledCandidate<'_>> = candidates
        .iter()
        .filter(|c| seen.insert(c.line.text.as_str()))
        .collect();

    let mut title = title.to_string();
    if title.is_empty() {
        let promote = entries.first().is_some_and(|first| {
            first.level == Level::H1 && first.line.top() < options.title_promotion_band
        });
        if promote {
            let first = entries.remove(0);
            log::debug!("Promoting leading heading {:?} to title", first.line.text);
            title = first.line.text.clone();
        }
    }

    let outline = entries
        .into_iter()
        .map(|c| Heading::new(c.level, c.line.text.clone(), c.line.page as u32 + 1))
        .collect();

    OutlineResult::new(title, outline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Line};

    fn line(text: &str, top: f32, page: usize) -> Line {
        Line::new(text, 14, "Arial-Bold", BBox::new(72.0, top, 300.0, top + 14.0), page)
    }

    fn leveled(line: &Line, level: Level) -> LeveledCandidate<'_> {
        LeveledCandidate { line, level }
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        let header_p2 = line("ACME Quarterly", 30.0, 1);
        let header_p1 = line("ACME Quarterly", 30.0, 0);
        let intro = line("Introduction", 300.0, 0);
        let methods = line("Methods", 100.0, 1);

        let result = assemble_outline(
            "Report",
            vec![
                leveled(&methods, Level::H1),
                leveled(&header_p2, Level::H2),
                leveled(&intro, Level::H1),
                leveled(&header_p1, Level::H2),
            ],
            &InferenceOptions::default(),
        );

        assert_eq!(result.title, "Report");
        assert_eq!(
            result.outline,
            vec![
                Heading::new(Level::H2, "ACME Quarterly", 1),
                Heading::new(Level::H1, "Introduction", 1),
                Heading::new(Level::H1, "Methods", 2),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let a = line("Alpha", 100.0, 0);
        let b = line("Beta", 50.0, 1);
        let build = || {
            assemble_outline(
                "T",
                vec![leveled(&b, Level::H2), leveled(&a, Level::H1), leveled(&a, Level::H1)],
                &InferenceOptions::default(),
            )
        };
        assert_eq!(build(), build());
        assert_eq!(build().outline.len(), 2);
    }

    #[test]
    fn test_promote_leading_h1() {
        let first = line("Request for Proposal", 120.0, 0);
        let next = line("Background", 400.0, 0);

        let result = assemble_outline(
            "",
            vec![leveled(&first, Level::H1), leveled(&next, Level::H2)],
            &InferenceOptions::default(),
        );
        assert_eq!(result.title, "Request for Proposal");
        assert_eq!(result.outline, vec![Heading::new(Level::H2, "Background", 1)]);
    }

    #[test]
    fn test_no_promotion_cases() {
        let low = line("Overview", 250.0, 0);
        let result = assemble_outline("", vec![leveled(&low, Level::H1)], &InferenceOptions::default());
        assert_eq!(result.title, "");
        assert_eq!(result.outline.len(), 1);

        let high_h2 = line("Overview", 40.0, 0);
        let result = assemble_outline("", vec![leveled(&high_h2, Level::H2)], &InferenceOptions::default());
        assert_eq!(result.title, "");

        let result = assemble_outline(
            "",
            vec![leveled(&high_h2, Level::H1)],
            &InferenceOptions::new().without_title_promotion(),
        );
        assert_eq!(result.title, "");
        assert_eq!(result.outline.len(), 1);

        let result = assemble_outline("", Vec::new(), &InferenceOptions::default());
        assert!(result.is_empty());
    }
}
