//! Content stream interpretation.
//!
//! Walks the operators of a page content stream and records every shown
//! string as a [`TextSpan`] at its baseline origin in user space, tracking
//! the text matrix, the current transformation matrix and the text state
//! needed to position consecutive strings.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use super::layout::TextSpan;
use crate::error::{Error, Result};

/// Glyph width assumed when a font carries no width table, in thousandths
/// of the font size.
const DEFAULT_GLYPH_WIDTH: f32 = 500.0;

/// TJ adjustments larger than this (thousandths of an em) read as a word
/// break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Spans and non-text objects found on one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub spans: Vec<TextSpan>,
    /// Number of XObjects painted (images, forms)
    pub xobjects: usize,
}

/// 2D affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        if operands.len() < 6 {
            return None;
        }
        Some(Matrix {
            a: get_number(&operands[0])?,
            b: get_number(&operands[1])?,
            c: get_number(&operands[2])?,
            d: get_number(&operands[3])?,
            e: get_number(&operands[4])?,
            f: get_number(&operands[5])?,
        })
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Widths of a simple font, used to advance the text position.
#[derive(Debug, Clone)]
struct FontMetrics {
    base_font: String,
    first_char: i64,
    widths: Vec<f32>,
    /// Two-byte codes (Type0 fonts)
    composite: bool,
}

impl FontMetrics {
    fn from_dict(doc: &LopdfDocument, font: &Dictionary) -> Self {
        let base_font = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let composite = font
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .is_some_and(|n| n == b"Type0");

        let first_char = font
            .get(b"FirstChar")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);

        let widths = font
            .get(b"Widths")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|w| get_number(resolve(doc, w)).unwrap_or(DEFAULT_GLYPH_WIDTH))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            base_font,
            first_char,
            widths,
            composite,
        }
    }

    fn unknown(name: &[u8]) -> Self {
        Self {
            base_font: String::from_utf8_lossy(name).to_string(),
            first_char: 0,
            widths: Vec::new(),
            composite: false,
        }
    }

    /// Glyph widths (thousandths of an em) and whether each code is a space.
    fn glyphs(&self, bytes: &[u8]) -> Vec<(f32, bool)> {
        if self.composite {
            return bytes
                .chunks(2)
                .map(|code| (DEFAULT_GLYPH_WIDTH, code == [0, 32]))
                .collect();
        }
        bytes
            .iter()
            .map(|&code| {
                let width = usize::try_from(i64::from(code) - self.first_char)
                    .ok()
                    .and_then(|i| self.widths.get(i).copied())
                    .filter(|w| *w > 0.0)
                    .unwrap_or(DEFAULT_GLYPH_WIDTH);
                (width, code == b' ')
            })
            .collect()
    }
}

/// Text state parameters (PDF 32000-1, 9.3).
#[derive(Debug, Clone)]
struct TextState {
    font_key: Vec<u8>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scaling: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_key: Vec::new(),
            font_size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            leading: 0.0,
        }
    }
}

/// Interprets the content stream of one page.
pub struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    metrics: HashMap<Vec<u8>, FontMetrics>,
}

impl<'a> ContentInterpreter<'a> {
    /// Create an interpreter for a page whose font resources are `fonts`.
    pub fn new(doc: &'a LopdfDocument, fonts: BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        let metrics = fonts
            .iter()
            .map(|(name, dict)| (name.clone(), FontMetrics::from_dict(doc, dict)))
            .collect();
        Self {
            doc,
            fonts,
            metrics,
        }
    }

    /// Decode and run a content stream.
    pub fn run(&self, content: &[u8]) -> Result<PageContent> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut page = PageContent::default();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut text_matrix = Matrix::IDENTITY;
        let mut line_matrix = Matrix::IDENTITY;
        let mut state = TextState::default();
        let mut in_text_block = false;

        for op in &content.operations {
            let operands = op.operands.as_slice();
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    text_matrix = Matrix::IDENTITY;
                    line_matrix = Matrix::IDENTITY;
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands {
                        state.font_key = name.clone();
                        state.font_size = get_number(size).unwrap_or(12.0);
                    }
                }
                "Tc" => set_number(operands, &mut state.char_spacing),
                "Tw" => set_number(operands, &mut state.word_spacing),
                "TL" => set_number(operands, &mut state.leading),
                "Tz" => {
                    if let Some(scale) = operands.first().and_then(get_number) {
                        state.horizontal_scaling = scale / 100.0;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        line_matrix = Matrix::translation(tx, ty).then(&line_matrix);
                        text_matrix = line_matrix;
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(operands) {
                        line_matrix = m;
                        text_matrix = m;
                    }
                }
                "T*" => {
                    line_matrix = Matrix::translation(0.0, -state.leading).then(&line_matrix);
                    text_matrix = line_matrix;
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        if op.operator == "\"" {
                            if let [aw, ac, ..] = operands {
                                state.word_spacing = get_number(aw).unwrap_or(0.0);
                                state.char_spacing = get_number(ac).unwrap_or(0.0);
                            }
                        }
                        line_matrix = Matrix::translation(0.0, -state.leading).then(&line_matrix);
                        text_matrix = line_matrix;
                    }
                    if !in_text_block {
                        continue;
                    }
                    let shown = match op.operator.as_str() {
                        "TJ" => operands.first(),
                        "\"" => operands.get(2),
                        _ => operands.first(),
                    };
                    if let Some(obj) = shown {
                        if let Some(span) = self.show(obj, &state, &mut text_matrix, &ctm) {
                            page.spans.push(span);
                        }
                    }
                }
                "Do" => page.xobjects += 1,
                _ => {}
            }
        }

        Ok(page)
    }

    /// Show a string or TJ array, advancing the text matrix.
    fn show(
        &self,
        obj: &Object,
        state: &TextState,
        text_matrix: &mut Matrix,
        ctm: &Matrix,
    ) -> Option<TextSpan> {
        let metrics = self
            .metrics
            .get(&state.font_key)
            .cloned()
            .unwrap_or_else(|| FontMetrics::unknown(&state.font_key));

        let start = text_matrix.then(ctm);
        let mut text = String::new();
        let mut advance = 0.0;

        let items: Vec<&Object> = match obj {
            Object::Array(arr) => arr.iter().collect(),
            other => vec![other],
        };

        for item in items {
            match item {
                Object::String(bytes, _) => {
                    text.push_str(&self.decode(&state.font_key, bytes));
                    for (width, is_space) in metrics.glyphs(bytes) {
                        let mut tx = width / 1000.0 * state.font_size + state.char_spacing;
                        if is_space {
                            tx += state.word_spacing;
                        }
                        advance += tx * state.horizontal_scaling;
                    }
                }
                Object::Integer(_) | Object::Real(_) => {
                    let adjustment = -get_number(item).unwrap_or(0.0);
                    advance += adjustment / 1000.0 * state.font_size * state.horizontal_scaling;
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !text.is_empty()
                        && !text.ends_with(' ')
                        && !text.ends_with('\u{00A0}')
                        && !text.chars().last().is_some_and(is_spaceless_script_char)
                    {
                        text.push(' ');
                    }
                }
                _ => {}
            }
        }

        *text_matrix = Matrix::translation(advance, 0.0).then(text_matrix);

        if text.trim().is_empty() {
            return None;
        }

        let font_size = state.font_size * start.vertical_scale();
        let mut span = TextSpan::new(text, start.e, start.f, font_size, metrics.base_font);
        span.width = advance * start.horizontal_scale();
        Some(span)
    }

    /// Decode a string with the font's encoding, falling back to simple
    /// decoding when the font or its encoding is unavailable.
    fn decode(&self, font_key: &[u8], bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }
}

/// Follow a reference, returning the object itself if it is not one or the
/// target is missing.
fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

fn set_number(operands: &[Object], target: &mut f32) {
    if let Some(value) = operands.first().and_then(get_number) {
        *target = value;
    }
}

/// Helper to extract number from PDF object.
pub(crate) fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if a character belongs to a script written without word spaces
/// (Chinese, Japanese). Hangul is excluded: Korean uses spaces.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback: UTF-16BE with BOM, then UTF-8, then
/// Latin-1.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
