//! Outline inference scenarios on synthetic page layouts.

use pdfoutline::outline::{infer_from_pages, InferenceOptions};
use pdfoutline::render::{to_json, JsonFormat};
use pdfoutline::{BBox, Block, Heading, Level, LineGroup, OutlineResult, PageLayout, Span, TextBlock};

const PAGE_WIDTH: f32 = 612.0;

const BODY: &str = "The committee reviewed every proposal in detail and agreed that the plan should move forward this quarter.";

/// Builds a page one line per block, with boxes sized from the text.
struct PageBuilder {
    page: PageLayout,
}

impl PageBuilder {
    fn new(index: usize) -> Self {
        Self {
            page: PageLayout::letter(index),
        }
    }

    fn line(mut self, text: &str, size: f32, font: &str, left: f32, top: f32) -> Self {
        let width = text.chars().count() as f32 * size * 0.5;
        let group = LineGroup::new(
            vec![Span::new(text, size, font)],
            BBox::new(left, top, left + width, top + size),
        );
        self.page.add_text_block(TextBlock::new(vec![group]));
        self
    }

    fn centered(self, text: &str, size: f32, font: &str, top: f32) -> Self {
        let width = text.chars().count() as f32 * size * 0.5;
        self.line(text, size, font, (PAGE_WIDTH - width) / 2.0, top)
    }

    fn body(self, tops: &[f32]) -> Self {
        tops.iter()
            .fold(self, |page, &top| page.line(BODY, 11.0, "Times-Roman", 72.0, top))
    }

    fn image(mut self) -> Self {
        self.page.add_block(Block::NonText);
        self
    }

    fn build(self) -> PageLayout {
        self.page
    }
}

fn infer(pages: &[PageLayout]) -> OutlineResult {
    infer_from_pages(pages, &InferenceOptions::default())
}

#[test]
fn test_annual_report() {
    let pages = vec![PageBuilder::new(0)
        .centered("Annual Report 2024", 24.0, "Helvetica-Bold", 52.8)
        .line("1. Overview", 16.0, "Helvetica-Bold", 72.0, 129.2)
        .body(&[183.2, 197.2, 211.2])
        .build()];

    let result = infer(&pages);
    assert_eq!(result.title, "Annual Report 2024");
    assert_eq!(result.outline, vec![Heading::new(Level::H1, "1. Overview", 1)]);
}

#[test]
fn test_heading_text_kept_as_extracted() {
    let build = |heading: &str| {
        vec![PageBuilder::new(0)
            .centered("Annual Report 2024", 24.0, "Helvetica-Bold", 52.8)
            .line(heading, 16.0, "Helvetica-Bold", 72.0, 129.2)
            .body(&[183.2, 197.2, 211.2])
            .build()]
    };

    let result = infer(&build("Terms  of  Use"));
    assert_eq!(result.outline, vec![Heading::new(Level::H1, "Terms  of  Use", 1)]);

    let decomposed = build("Cafe\u{0301} Menu");
    assert_eq!(infer(&decomposed).outline[0].text, "Cafe\u{0301} Menu");

    let options = InferenceOptions::new().with_unicode_normalization();
    let result = infer_from_pages(&decomposed, &options);
    assert_eq!(result.outline, vec![Heading::new(Level::H1, "Caf\u{00E9} Menu", 1)]);
}

#[test]
fn test_numbered_document() {
    let pages = vec![
        PageBuilder::new(0)
            .centered("Design Document", 20.0, "Times-Bold", 60.0)
            .line("1. Introduction", 16.0, "Times-Bold", 72.0, 120.0)
            .body(&[140.0, 154.0, 168.0])
            .line("1.1 Purpose", 13.0, "Times-Bold", 72.0, 200.0)
            .body(&[220.0, 234.0])
            .line("Scope of Work", 13.0, "Times-Bold", 72.0, 270.0)
            .body(&[290.0])
            .build(),
        PageBuilder::new(1)
            .line("2. Architecture", 16.0, "Times-Bold", 72.0, 72.0)
            .body(&[90.0, 104.0])
            .line("2.1.1 Storage Layer", 12.0, "Times-Bold", 72.0, 140.0)
            .body(&[160.0])
            .image()
            .line("Appendix A", 16.0, "Times-Bold", 72.0, 300.0)
            .line("2", 14.0, "Times-Bold", 300.0, 750.0)
            .build(),
    ];

    let result = infer(&pages);
    assert_eq!(result.title, "Design Document");
    assert_eq!(
        result.outline,
        vec![
            Heading::new(Level::H1, "1. Introduction", 1),
            Heading::new(Level::H2, "1.1 Purpose", 1),
            Heading::new(Level::H2, "Scope of Work", 1),
            Heading::new(Level::H1, "2. Architecture", 2),
            Heading::new(Level::H3, "2.1.1 Storage Layer", 2),
            Heading::new(Level::H1, "Appendix A", 2),
        ]
    );
}

#[test]
fn test_running_header_kept_once() {
    let page = |index: usize, heading: &str| {
        PageBuilder::new(index)
            .line("Quarterly Review", 12.0, "Arial-Bold", 72.0, 30.0)
            .body(&[60.0, 74.0])
            .line(heading, 16.0, "Arial-Bold", 72.0, 250.0)
            .body(&[270.0, 284.0])
            .build()
    };
    let pages = vec![page(0, "Revenue"), page(1, "Expenses"), page(2, "Outlook")];

    let result = infer(&pages);
    assert_eq!(result.title, "");
    let texts: Vec<(&str, u32)> = result
        .outline
        .iter()
        .map(|h| (h.text.as_str(), h.page))
        .collect();

    // The first line of the document has no predecessor; later copies of
    // the header are one entry at their first page.
    assert_eq!(
        texts,
        vec![
            ("Revenue", 1),
            ("Quarterly Review", 2),
            ("Expenses", 2),
            ("Outlook", 3),
        ]
    );
    assert_eq!(result.outline[0].level, Level::H1);
    assert_eq!(result.outline[1].level, Level::H2);
}

#[test]
fn test_headings_ordered_by_page_then_top() {
    let pages = vec![
        PageBuilder::new(0)
            .body(&[400.0, 414.0])
            .line("Lower Section", 15.0, "Georgia-Bold", 72.0, 500.0)
            .line("Opening", 15.0, "Georgia-Bold", 72.0, 220.0)
            .body(&[40.0, 240.0])
            .build(),
        PageBuilder::new(1)
            .line("Closing", 15.0, "Georgia-Bold", 72.0, 80.0)
            .body(&[100.0])
            .build(),
    ];

    let result = infer(&pages);
    let texts: Vec<&str> = result.outline.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["Opening", "Lower Section", "Closing"]);
}

#[test]
fn test_noise_never_in_outline() {
    let pages = vec![PageBuilder::new(0)
        .body(&[72.0, 86.0])
        .line("Figure 3: Results", 14.0, "Helvetica-Bold", 72.0, 200.0)
        .line("- 3 -", 14.0, "Helvetica-Bold", 290.0, 740.0)
        .line("12", 14.0, "Helvetica-Bold", 290.0, 760.0)
        .build()];

    let result = infer(&pages);
    assert!(result.outline.is_empty());
}

#[test]
fn test_leading_heading_promoted_to_title() {
    let pages = vec![PageBuilder::new(0)
        .line("Confidential", 9.0, "Helvetica", 72.0, 30.0)
        .line("Project Kickoff", 16.0, "Helvetica-Bold", 72.0, 80.0)
        .body(&[110.0, 124.0])
        .line("Next Steps", 13.0, "Helvetica-Bold", 72.0, 300.0)
        .body(&[320.0])
        .build()];

    let result = infer(&pages);
    assert_eq!(result.title, "Project Kickoff");
    assert_eq!(result.outline, vec![Heading::new(Level::H2, "Next Steps", 1)]);
}

#[test]
fn test_long_line_never_title() {
    let long = "One two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone";
    let pages = vec![PageBuilder::new(0)
        .centered(long, 30.0, "Helvetica-Bold", 20.0)
        .body(&[100.0, 114.0])
        .build()];

    let result = infer(&pages);
    assert_eq!(result.title, "");
}

#[test]
fn test_image_only_document() {
    let pages = vec![PageBuilder::new(0).image().build(), PageBuilder::new(1).image().build()];
    assert_eq!(infer(&pages), OutlineResult::default());
    assert_eq!(infer(&[]), OutlineResult::default());
}

#[test]
fn test_deterministic_json() {
    let build = || {
        vec![PageBuilder::new(0)
            .centered("Annual Report 2024", 24.0, "Helvetica-Bold", 52.8)
            .line("Highlights", 14.0, "Palatino", 72.0, 130.0)
            .line("Summary", 14.0, "Garamond", 72.0, 150.0)
            .body(&[183.2, 197.2])
            .build()]
    };

    let first = to_json(&infer(&build()), JsonFormat::Pretty).unwrap();
    for _ in 0..5 {
        assert_eq!(to_json(&infer(&build()), JsonFormat::Pretty).unwrap(), first);
    }
}

#[test]
fn test_json_contract() {
    let pages = vec![PageBuilder::new(0)
        .centered("Annual Report 2024", 24.0, "Helvetica-Bold", 52.8)
        .line("1. Overview", 16.0, "Helvetica-Bold", 72.0, 129.2)
        .body(&[183.2])
        .build()];

    let json = to_json(&infer(&pages), JsonFormat::Compact).unwrap();
    assert_eq!(
        json,
        r#"{"title":"Annual Report 2024","outline":[{"level":"H1","text":"1. Overview","page":1}]}"#
    );
}
