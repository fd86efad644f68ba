//! Outline result types.
//!
//! The JSON shape of [`OutlineResult`] is relied upon by downstream tooling:
//! `{ "title": ..., "outline": [ { "level": "H1", "text": ..., "page": 1 } ] }`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading nesting depth, H1 being the shallowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    H1,
    H2,
    H3,
    H4,
}

impl Level {
    /// All levels, shallowest first.
    pub const ALL: [Level; 4] = [Level::H1, Level::H2, Level::H3, Level::H4];

    /// Map a zero-based depth to a level. Depths past the last level collapse
    /// to H4.
    pub fn from_depth(depth: usize) -> Self {
        Self::ALL[depth.min(Self::ALL.len() - 1)]
    }

    /// Zero-based depth (H1 = 0).
    pub fn depth(self) -> usize {
        self as usize
    }

    /// External string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::H1 => "H1",
            Level::H2 => "H2",
            Level::H3 => "H3",
            Level::H4 => "H4",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Nesting level
    pub level: Level,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a heading.
    pub fn new(level: Level, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline inferred for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title, empty when none was found
    pub title: String,
    /// Headings in page order
    pub outline: Vec<Heading>,
}

impl OutlineResult {
    /// Create a result.
    pub fn new(title: impl Into<String>, outline: Vec<Heading>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Result reported for a document that could not be processed: the title
    /// falls back to the given name and the outline is empty.
    pub fn degraded(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Number of headings.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }

    /// Check if neither a title nor headings were found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}
