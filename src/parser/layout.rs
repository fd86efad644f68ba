//! Layout analysis.
//!
//! Groups positioned text spans into lines and blocks and converts PDF
//! user-space coordinates (origin bottom-left, baselines) into top-down
//! bounding boxes.

use crate::model::{BBox, Block, LineGroup, PageLayout, Span, TextBlock};

use super::content::{is_spaceless_script_char, PageContent};

/// Baselines closer than this share of the font size are the same line.
const BASELINE_TOLERANCE: f32 = 0.3;

/// Horizontal gaps wider than this many ems split a baseline into separate
/// lines (columns, table cells).
const COLUMN_GAP_EMS: f32 = 2.0;

/// Ascender and descender as a share of the font size.
const ASCENT: f32 = 0.8;
const DESCENT: f32 = 0.2;

/// A text span with position and style information, in PDF user space.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Advance width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
}

impl TextSpan {
    /// Create a new text span. The width is estimated at half an em per
    /// character until the caller sets a measured one.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Approximate top edge (ascender).
    pub fn top(&self) -> f32 {
        self.y + self.font_size * ASCENT
    }

    /// Approximate bottom edge (descender).
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * DESCENT
    }

    fn same_style(&self, other: &TextSpan) -> bool {
        self.font_name == other.font_name && (self.font_size - other.font_size).abs() < 0.01
    }
}

/// Spans on one baseline, sorted left to right.
#[derive(Debug, Clone)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    /// Baseline
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Dominant font size, weighted by text length
    pub font_size: f32,
}

impl TextLine {
    /// Create a line from spans. `spans` must not be empty.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.total_cmp(&b.x));

        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted_size: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted_size / total_chars as f32
        } else {
            spans.first().map_or(0.0, |s| s.font_size)
        };

        let y = spans.first().map_or(0.0, |s| s.y);
        let x = spans.first().map_or(0.0, |s| s.x);

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Merge adjacent spans of the same font and size into style runs,
    /// inserting a space wherever the gap between two pieces is wide enough
    /// to be a word break.
    pub fn style_runs(&self) -> Vec<Span> {
        let mut runs: Vec<Span> = Vec::new();
        let mut prev: Option<&TextSpan> = None;

        for span in &self.spans {
            match (prev, runs.last_mut()) {
                (Some(prev_span), Some(run)) if prev_span.same_style(span) => {
                    if needs_space(prev_span, span) {
                        run.text.push(' ');
                    }
                    run.text.push_str(&span.text);
                }
                _ => runs.push(Span::new(
                    span.text.clone(),
                    span.font_size,
                    span.font_name.clone(),
                )),
            }
            prev = Some(span);
        }

        runs
    }

    /// Bounding box in page-local top-down coordinates, for a page whose
    /// upper-left corner is at (`page_left`, `page_top`) in user space.
    pub fn bbox(&self, page_left: f32, page_top: f32) -> BBox {
        let left = self.spans.iter().map(|s| s.x).fold(f32::INFINITY, f32::min);
        let right = self
            .spans
            .iter()
            .map(TextSpan::right)
            .fold(f32::NEG_INFINITY, f32::max);
        let top = self
            .spans
            .iter()
            .map(TextSpan::top)
            .fold(f32::NEG_INFINITY, f32::max);
        let bottom = self
            .spans
            .iter()
            .map(TextSpan::bottom)
            .fold(f32::INFINITY, f32::min);

        BBox::new(
            left - page_left,
            page_top - top,
            right - page_left,
            page_top - bottom,
        )
    }
}

/// Whether a word space belongs between two consecutive pieces of text.
///
/// A gap above 20% of the average character width is a space, except
/// between characters of scripts written without spaces.
fn needs_space(prev: &TextSpan, span: &TextSpan) -> bool {
    let gap = span.x - prev.right();

    let char_count = span.text.chars().count();
    let avg_char_width = if char_count > 0 && span.width > 0.0 {
        span.width / char_count as f32
    } else {
        span.font_size * 0.5
    };
    if gap <= avg_char_width * 0.2 {
        return false;
    }

    let prev_last = prev.text.chars().last();
    let curr_first = span.text.chars().next();
    if prev_last.is_some_and(is_spaceless_script_char)
        && curr_first.is_some_and(is_spaceless_script_char)
    {
        return false;
    }

    let prev_ends_with_space = prev.text.ends_with(' ') || prev.text.ends_with('\u{00A0}');
    let curr_starts_with_space = span.text.starts_with(' ') || span.text.starts_with('\u{00A0}');
    !prev_ends_with_space && !curr_starts_with_space
}

/// Turns the content of a page into a [`PageLayout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer;

impl LayoutAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Build the layout of page `index` from its normalized MediaBox
    /// `[x0, y0, x1, y1]`. Boxes are made relative to the upper-left corner
    /// of the MediaBox.
    pub fn analyze(&self, index: usize, media_box: [f32; 4], content: PageContent) -> PageLayout {
        let [x0, y0, x1, y1] = media_box;
        let mut page = PageLayout::new(index, x1 - x0, y1 - y0);

        let lines = self.group_spans_into_lines(content.spans);
        for block in self.group_lines_into_blocks(lines) {
            let groups = block
                .iter()
                .map(|line| LineGroup::new(line.style_runs(), line.bbox(x0, y1)))
                .collect();
            page.add_text_block(TextBlock::new(groups));
        }

        for _ in 0..content.xobjects {
            page.add_block(Block::NonText);
        }

        log::debug!(
            "Page {}: {} text blocks, {} lines, {} non-text",
            index + 1,
            page.text_blocks().count(),
            page.line_count(),
            content.xobjects
        );
        page
    }

    /// Group spans on the same baseline into lines, top to bottom, splitting
    /// a baseline wherever a wide gap separates its spans.
    pub fn group_spans_into_lines(&self, mut spans: Vec<TextSpan>) -> Vec<TextLine> {
        spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut baselines: Vec<Vec<TextSpan>> = Vec::new();
        let mut current_y: Option<f32> = None;
        for span in spans {
            let tolerance = span.font_size * BASELINE_TOLERANCE;
            match (current_y, baselines.last_mut()) {
                (Some(y), Some(current)) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    current_y = Some(span.y);
                    baselines.push(vec![span]);
                }
            }
        }

        baselines
            .into_iter()
            .flat_map(split_on_gaps)
            .map(TextLine::from_spans)
            .collect()
    }

    /// Group lines into blocks based on spacing, size and indentation.
    pub fn group_lines_into_blocks(&self, lines: Vec<TextLine>) -> Vec<Vec<TextLine>> {
        let avg_spacing = average_line_spacing(&lines);

        let mut blocks: Vec<Vec<TextLine>> = Vec::new();
        for line in lines {
            match blocks.last_mut() {
                Some(block)
                    if block
                        .last()
                        .is_some_and(|prev| !should_break_block(prev, &line, avg_spacing)) =>
                {
                    block.push(line)
                }
                _ => blocks.push(vec![line]),
            }
        }
        blocks
    }
}

/// Split one baseline's spans into runs separated by column-sized gaps.
fn split_on_gaps(mut spans: Vec<TextSpan>) -> Vec<Vec<TextSpan>> {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut parts: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        match parts.last_mut() {
            Some(part)
                if part.last().is_some_and(|prev| {
                    span.x - prev.right() <= COLUMN_GAP_EMS * prev.font_size.max(span.font_size)
                }) =>
            {
                part.push(span)
            }
            _ => parts.push(vec![span]),
        }
    }
    parts
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f32) -> bool {
    // Paragraph gap
    if (prev.y - curr.y).abs() > avg_spacing * 1.5 {
        return true;
    }

    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }

    // Indentation
    (prev.x - curr.x).abs() > 20.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32, font: &str) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, size, font.to_string())
    }

    #[test]
    fn test_span_geometry() {
        let s = span("abcd", 100.0, 700.0, 10.0, "Helvetica");
        assert_eq!(s.width, 20.0);
        assert_eq!(s.right(), 120.0);
        assert_eq!(s.top(), 708.0);
        assert_eq!(s.bottom(), 698.0);
    }

    #[test]
    fn test_group_by_baseline() {
        let analyzer = LayoutAnalyzer::new();
        let lines = analyzer.group_spans_into_lines(vec![
            span("second", 72.0, 686.0, 12.0, "Helvetica"),
            span("world", 102.0, 700.5, 12.0, "Helvetica"),
            span("hello", 72.0, 700.0, 12.0, "Helvetica"),
        ]);

        assert_eq!(lines.len(), 2);
        let first: Vec<&str> = lines[0].spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(first, vec!["hello", "world"]);
        assert_eq!(lines[1].spans[0].text, "second");
    }

    #[test]
    fn test_wide_gap_splits_columns() {
        let analyzer = LayoutAnalyzer::new();
        let lines = analyzer.group_spans_into_lines(vec![
            span("Left column", 72.0, 500.0, 10.0, "Times-Roman"),
            span("Right column", 320.0, 500.0, 10.0, "Times-Roman"),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].x, 72.0);
        assert_eq!(lines[1].x, 320.0);
    }

    #[test]
    fn test_style_runs_merge_and_space() {
        // "Hel" ends at 115; "lo" starts right after, "World" after a gap.
        let line = TextLine::from_spans(vec![
            span("Hel", 100.0, 500.0, 10.0, "Arial"),
            span("lo", 115.0, 500.0, 10.0, "Arial"),
            span("World", 130.0, 500.0, 10.0, "Arial"),
            span("Bold", 160.0, 500.0, 10.0, "Arial-Bold"),
        ]);

        let runs = line.style_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Hello World");
        assert_eq!(runs[0].font, "Arial");
        assert_eq!(runs[1].text, "Bold");
        assert_eq!(runs[1].size, 10.0);
    }

    #[test]
    fn test_no_space_between_cjk() {
        let line = TextLine::from_spans(vec![
            span("日本", 100.0, 500.0, 10.0, "MS-Mincho"),
            span("語", 112.0, 500.0, 10.0, "MS-Mincho"),
        ]);
        assert_eq!(line.style_runs()[0].text, "日本語");
    }

    #[test]
    fn test_bbox_top_down() {
        let line = TextLine::from_spans(vec![
            span("Title", 100.0, 700.0, 20.0, "Helvetica-Bold"),
            span("x", 160.0, 700.0, 10.0, "Helvetica"),
        ]);
        let bbox = line.bbox(0.0, 792.0);
        assert_eq!(bbox.left, 100.0);
        assert_eq!(bbox.right, 165.0);
        assert_eq!(bbox.top, 792.0 - 716.0);
        assert_eq!(bbox.bottom, 792.0 - 696.0);
    }

    #[test]
    fn test_bbox_relative_to_page_origin() {
        let line = TextLine::from_spans(vec![span("Title", 400.0, 700.0, 20.0, "Helvetica-Bold")]);
        let bbox = line.bbox(300.0, 842.0);
        assert_eq!(bbox.left, 100.0);
        assert_eq!(bbox.right, 150.0);
        assert_eq!(bbox.top, 842.0 - 716.0);
    }

    #[test]
    fn test_block_breaks() {
        let analyzer = LayoutAnalyzer::new();
        let lines = analyzer.group_spans_into_lines(vec![
            span("Heading", 72.0, 700.0, 16.0, "Helvetica-Bold"),
            span("body one", 72.0, 660.0, 10.0, "Helvetica"),
            span("body two", 72.0, 648.0, 10.0, "Helvetica"),
            span("indented", 110.0, 636.0, 10.0, "Helvetica"),
        ]);
        let blocks = analyzer.group_lines_into_blocks(lines);
        let sizes: Vec<usize> = blocks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 2, 1]);
    }

    #[test]
    fn test_analyze_page() {
        let content = PageContent {
            spans: vec![
                span("Report", 200.0, 720.0, 24.0, "Helvetica-Bold"),
                span("Body text here.", 72.0, 650.0, 11.0, "Helvetica"),
            ],
            xobjects: 1,
        };
        let page = LayoutAnalyzer::new().analyze(0, [0.0, 0.0, 612.0, 792.0], content);

        assert_eq!(page.line_count(), 2);
        assert_eq!(page.blocks.len(), 3);
        assert!(matches!(page.blocks.last(), Some(Block::NonText)));

        let first = &page.text_blocks().next().unwrap().lines[0];
        assert_eq!(first.spans[0].text, "Report");
        assert!((first.bbox.top - 52.8).abs() < 1e-3);
    }

    #[test]
    fn test_analyze_shifted_media_box() {
        let content = PageContent {
            spans: vec![span("Report", 500.0, 720.0, 24.0, "Helvetica-Bold")],
            xobjects: 0,
        };
        let page = LayoutAnalyzer::new().analyze(0, [300.0, 100.0, 912.0, 892.0], content);

        assert_eq!(page.width, 612.0);
        assert_eq!(page.height, 792.0);
        let bbox = page.text_blocks().next().unwrap().lines[0].bbox;
        assert_eq!(bbox.left, 200.0);
        assert!((bbox.top - (892.0 - 739.2)).abs() < 1e-3);
    }
}
