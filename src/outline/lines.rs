//! Line assembly: extraction line groups to [`Line`] records.

use unicode_normalization::UnicodeNormalization;

use super::freq;
use crate::model::{Line, LineGroup, PageLayout};

/// Round a font size to the nearest integer, halves to even.
pub fn round_size(size: f32) -> i32 {
    size.round_ties_even() as i32
}

/// Rewrite line texts in Unicode NFC, so precomposed and decomposed
/// spellings of the same heading compare equal. Spacing is left untouched.
pub fn normalize_lines(lines: &mut [Line]) {
    for line in lines {
        if !unicode_normalization::is_nfc(&line.text) {
            line.text = line.text.nfc().collect();
        }
    }
}

/// Assemble one line group. Returns `None` when the group has no text.
///
/// Size and font are the most common values over the group's spans, the
/// first one encountered winning ties.
pub fn assemble_line(group: &LineGroup, page: usize) -> Option<Line> {
    let text = group
        .spans
        .iter()
        .map(|span| span.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return None;
    }

    let size = freq::mode(group.spans.iter().map(|s| round_size(s.size))).unwrap_or(0);
    let font = freq::mode(group.spans.iter().map(|s| s.font.as_str())).unwrap_or_default();

    Some(Line::new(text, size, font, group.bbox, page))
}

/// Assemble all text lines of a document, ordered by page and then by the
/// top of their bounding box. Non-text blocks are ignored.
pub fn assemble_lines(pages: &[PageLayout]) -> Vec<Line> {
    let mut lines: Vec<Line> = pages
        .iter()
        .flat_map(|page| {
            page.text_blocks()
                .flat_map(|block| block.lines.iter())
                .filter_map(move |group| assemble_line(group, page.index))
        })
        .collect();

    // Stable: lines sharing a top keep extraction order.
    lines.sort_by(|a, b| a.page.cmp(&b.page).then(a.top().total_cmp(&b.top())));

    log::debug!(
        "Assembled {} lines from {} pages",
        lines.len(),
        pages.len()
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Block, Span, TextBlock};

    fn group(spans: Vec<Span>, top: f32) -> LineGroup {
        LineGroup::new(spans, BBox::new(72.0, top, 300.0, top + 12.0))
    }

    #[test]
    fn test_round_size_ties_even() {
        assert_eq!(round_size(10.5), 10);
        assert_eq!(round_size(11.5), 12);
        assert_eq!(round_size(11.4), 11);
        assert_eq!(round_size(15.96), 16);
    }

    #[test]
    fn test_assemble_line_joins_and_trims() {
        let line = assemble_line(
            &group(
                vec![
                    Span::new("  2.1 ", 14.2, "Arial-BoldMT"),
                    Span::new("", 9.0, "Arial"),
                    Span::new("Background ", 13.8, "Arial-BoldMT"),
                ],
                100.0,
            ),
            0,
        )
        .unwrap();

        assert_eq!(line.text, "2.1 Background");
        assert_eq!(line.size, 14);
        assert_eq!(line.font, "Arial-BoldMT");
        assert!(line.is_bold);
    }

    #[test]
    fn test_assemble_line_style_tie_first_span() {
        let line = assemble_line(
            &group(
                vec![
                    Span::new("Mixed", 12.0, "Times-Roman"),
                    Span::new("styles", 16.0, "Times-Bold"),
                ],
                0.0,
            ),
            0,
        )
        .unwrap();

        assert_eq!(line.size, 12);
        assert_eq!(line.font, "Times-Roman");
        assert!(!line.is_bold);
    }

    #[test]
    fn test_assemble_line_keeps_inner_spacing() {
        let line = assemble_line(
            &group(
                vec![
                    Span::new(" Terms  of  Use ", 12.0, "F"),
                    Span::new("caf\u{0065}\u{0301}", 12.0, "F"),
                ],
                0.0,
            ),
            0,
        )
        .unwrap();
        assert_eq!(line.text, "Terms  of  Use caf\u{0065}\u{0301}");
    }

    #[test]
    fn test_normalize_lines_nfc() {
        let mut lines = vec![
            assemble_line(&group(vec![Span::new("Caf\u{0065}\u{0301}  Menu", 12.0, "F")], 0.0), 0)
                .unwrap(),
        ];
        normalize_lines(&mut lines);
        assert_eq!(lines[0].text, "Caf\u{00E9}  Menu");
    }

    #[test]
    fn test_empty_groups_dropped() {
        assert!(assemble_line(&group(vec![Span::new("   ", 12.0, "F")], 0.0), 0).is_none());
        assert!(assemble_line(&group(vec![], 0.0), 0).is_none());
    }

    #[test]
    fn test_assemble_lines_ordering() {
        let mut page0 = PageLayout::letter(0);
        page0.add_text_block(TextBlock::new(vec![
            group(vec![Span::new("Lower", 12.0, "F")], 300.0),
            group(vec![Span::new("Upper", 12.0, "F")], 100.0),
        ]));
        page0.add_block(Block::NonText);
        page0.add_text_block(TextBlock::new(vec![group(
            vec![Span::new("Middle", 12.0, "F")],
            200.0,
        )]));

        let mut page1 = PageLayout::letter(1);
        page1.add_text_block(TextBlock::new(vec![group(
            vec![Span::new("Next page", 12.0, "F")],
            10.0,
        )]));

        // Pages passed out of order still come back sorted.
        let lines = assemble_lines(&[page1, page0]);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Upper", "Middle", "Lower", "Next page"]);
        assert_eq!(lines[3].page, 1);
    }
}
