//! Document-level extraction result.

use super::PageLayout;
use serde::{Deserialize, Serialize};

/// Page layouts extracted from one PDF document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Pages in document order
    pub pages: Vec<PageLayout>,

    /// Total number of pages in the file, including pages not extracted
    pub total_pages: u32,
}

impl ExtractedDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document directly from page layouts.
    pub fn from_pages(pages: Vec<PageLayout>) -> Self {
        let total_pages = pages.len() as u32;
        Self {
            pdf_version: String::new(),
            pages,
            total_pages,
        }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: PageLayout) {
        self.pages.push(page);
    }

    /// Number of extracted pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Width of the first page, used to judge title centering.
    pub fn first_page_width(&self) -> Option<f32> {
        self.pages.first().map(|p| p.width)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
