//! Page-level extraction types.
//!
//! These types are the contract between the PDF extraction layer and the
//! outline inference engine: a page is a list of blocks, text blocks hold
//! line groups, and each line group holds styled spans plus a bounding box.

use serde::{Deserialize, Serialize};

/// A contiguous run of text with one font name and one font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
        }
    }
}

/// Axis-aligned box in page-local coordinates.
///
/// The origin is the top-left corner of the page and `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BBox {
    /// Create a bounding box from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// One visual line as grouped by the extraction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGroup {
    /// Spans in reading order
    pub spans: Vec<Span>,
    /// Bounding box of the whole line
    pub bbox: BBox,
}

impl LineGroup {
    /// Create a line group.
    pub fn new(spans: Vec<Span>, bbox: BBox) -> Self {
        Self { spans, bbox }
    }
}

/// A group of vertically adjacent lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<LineGroup>,
}

impl TextBlock {
    /// Create a text block from its lines.
    pub fn new(lines: Vec<LineGroup>) -> Self {
        Self { lines }
    }
}

/// A block of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Text content
    Text(TextBlock),
    /// Images, forms and other non-text content (ignored by inference)
    NonText,
}

/// Extracted layout of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page index (0-based)
    pub index: usize,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Content blocks in extraction order
    pub blocks: Vec<Block>,
}

impl PageLayout {
    /// Create an empty page with the given dimensions.
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty page with standard Letter size (8.5 x 11 inches).
    pub fn letter(index: usize) -> Self {
        Self::new(index, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a text block to the page.
    pub fn add_text_block(&mut self, block: TextBlock) {
        self.blocks.push(Block::Text(block));
    }

    /// Iterate over the text blocks, skipping non-text content.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Text(text) => Some(text),
            Block::NonText => None,
        })
    }

    /// Number of line groups on the page.
    pub fn line_count(&self) -> usize {
        self.text_blocks().map(|b| b.lines.len()).sum()
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
