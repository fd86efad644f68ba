//! Assembled lines and style keys.

use super::BBox;
use std::fmt;

/// Returns true if a font name marks a bold face.
pub fn is_bold_font(font: &str) -> bool {
    font.to_lowercase().contains("bold")
}

/// A (rounded size, font name) pair.
///
/// Used as the key of every style frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    pub size: i32,
    pub font: String,
}

impl StyleKey {
    /// Create a style key.
    pub fn new(size: i32, font: impl Into<String>) -> Self {
        Self {
            size,
            font: font.into(),
        }
    }

    /// Whether the font of this style is bold.
    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font)
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt {}", self.size, self.font)
    }
}

/// A positioned line of text with one representative style.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Trimmed, space-joined text (never empty)
    pub text: String,
    /// Representative font size, rounded
    pub size: i32,
    /// Representative font name
    pub font: String,
    /// Bounding box in page coordinates
    pub bbox: BBox,
    /// Page index (0-based)
    pub page: usize,
    /// Whether the representative font is bold
    pub is_bold: bool,
}

impl Line {
    /// Create a line, deriving the bold flag from the font name.
    pub fn new(
        text: impl Into<String>,
        size: i32,
        font: impl Into<String>,
        bbox: BBox,
        page: usize,
    ) -> Self {
        let font = font.into();
        let is_bold = is_bold_font(&font);
        Self {
            text: text.into(),
            size,
            font,
            bbox,
            page,
            is_bold,
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Top edge of the line.
    pub fn top(&self) -> f32 {
        self.bbox.top
    }

    /// The (size, font) style of the line.
    pub fn style(&self) -> StyleKey {
        StyleKey::new(self.size, self.font.clone())
    }
}

/// The style judged representative of ordinary body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStyle {
    pub size: i32,
    pub font: String,
    pub is_bold: bool,
}

impl BaseStyle {
    /// Build a base style from a style key.
    pub fn from_key(key: StyleKey) -> Self {
        let is_bold = key.is_bold();
        Self {
            size: key.size,
            font: key.font,
            is_bold,
        }
    }

    /// Fallback used when the document offers no usable body text.
    pub fn fallback(size: i32) -> Self {
        Self {
            size,
            font: "default".to_string(),
            is_bold: false,
        }
    }
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self::fallback(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_detection() {
        assert!(is_bold_font("Helvetica-Bold"));
        assert!(is_bold_font("ABCDEF+Arial,BOLD"));
        assert!(!is_bold_font("Helvetica-Oblique"));
    }

    #[test]
    fn test_line_word_count() {
        let line = Line::new("  Scope of  Work ", 12, "Times-Roman", BBox::default(), 0);
        assert_eq!(line.word_count(), 3);
        assert!(!line.is_bold);
    }

    #[test]
    fn test_default_base_style() {
        let base = BaseStyle::default();
        assert_eq!(base.size, 10);
        assert_eq!(base.font, "default");
        assert!(!base.is_bold);
    }
}
