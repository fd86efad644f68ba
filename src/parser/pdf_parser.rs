//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::{pdf_version_from_bytes, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, PageLayout};

use super::content::{get_number, ContentInterpreter};
use super::layout::LayoutAnalyzer;
use super::options::{ErrorMode, ParseOptions};

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Inherited attributes are looked up at most this many levels up the page
/// tree.
const MAX_TREE_DEPTH: usize = 32;

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        pdf_version_from_path(path)?;

        let doc = LopdfDocument::load(path)?;

        Ok(Self::with_document(doc, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        pdf_version_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data)?;

        Ok(Self::with_document(doc, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn with_document(doc: LopdfDocument, options: ParseOptions) -> Self {
        if doc.is_encrypted() {
            log::debug!("Document is encrypted; text may not decode");
        }
        Self { doc, options }
    }

    /// Extract the layout of every page (up to the page limit), in page order.
    pub fn extract(&self) -> Result<ExtractedDocument> {
        let pages = self.doc.get_pages();
        let mut document = ExtractedDocument::new();
        document.pdf_version = self.version();
        document.total_pages = pages.len() as u32;

        for (&page_num, &page_id) in &pages {
            if !self.options.includes_page(page_num) {
                break;
            }

            match self.extract_page_by_id(page_num, page_id) {
                Ok(page) => document.add_page(page),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping content of page {}: {}", page_num, e);
                    let [x0, y0, x1, y1] = self.media_box(page_id);
                    document.add_page(PageLayout::new(
                        page_num as usize - 1,
                        x1 - x0,
                        y1 - y0,
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "Extracted {} of {} pages",
            document.pages.len(),
            document.total_pages
        );
        Ok(document)
    }

    /// Extract the layout of a single page (1-based).
    pub fn extract_page(&self, page_num: u32) -> Result<PageLayout> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        self.extract_page_by_id(page_num, *page_id)
    }

    fn extract_page_by_id(&self, page_num: u32, page_id: ObjectId) -> Result<PageLayout> {
        let media_box = self.media_box(page_id);

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.page_content(page_id)?;
        let page_content = ContentInterpreter::new(&self.doc, fonts)
            .run(&content)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;

        Ok(LayoutAnalyzer::new().analyze(page_num as usize - 1, media_box, page_content))
    }

    /// MediaBox of a page, inherited through the page tree.
    fn media_box(&self, page_id: ObjectId) -> [f32; 4] {
        let mut current = self.doc.get_dictionary(page_id).ok();

        for _ in 0..MAX_TREE_DEPTH {
            let Some(dict) = current else { break };

            if let Ok(media_box) = dict.get(b"MediaBox") {
                if let Some(rect) = self.rectangle(media_box) {
                    return rect;
                }
            }

            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|id| self.doc.get_dictionary(id))
                .ok();
        }

        DEFAULT_MEDIA_BOX
    }

    fn rectangle(&self, obj: &Object) -> Option<[f32; 4]> {
        let obj = match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            _ => obj,
        };
        let array = obj.as_array().ok()?;
        if array.len() < 4 {
            return None;
        }

        let mut values = [0.0; 4];
        for (value, item) in values.iter_mut().zip(array) {
            *value = get_number(item)?;
        }
        let [x0, y0, x1, y1] = values;

        // Normalize corners
        let rect = [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)];
        (rect[2] > rect[0] && rect[3] > rect[1]).then_some(rect)
    }

    /// Get the decoded page content stream, concatenating content arrays.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content is blank, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Array(arr)) => self.concat_streams(arr),
                _ => self.stream_content(*r),
            },
            Object::Array(arr) => self.concat_streams(arr),
            Object::Stream(s) => Ok(s.decompressed_content().unwrap_or_else(|_| s.content.clone())),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                content.extend(self.stream_content(*r)?);
                content.push(b'\n');
            }
        }
        Ok(content)
    }

    fn stream_content(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id) {
            // Unfiltered streams fail to "decompress"; use them as is.
            Ok(Object::Stream(s)) => Ok(s.decompressed_content().unwrap_or_else(|_| s.content.clone())),
            Ok(_) => Err(Error::PdfParse("Invalid content stream".to_string())),
            Err(e) => Err(Error::PdfParse(e.to_string())),
        }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}
