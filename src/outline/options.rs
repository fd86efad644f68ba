//! Tunable constants of the inference heuristics.

/// Thresholds used by the outline inference engine.
///
/// Every field can be overridden with the builder methods.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOptions {
    /// Lines with more words than this that end in '.' count as prose
    pub prose_min_words: usize,

    /// Fallback body pool: lines with more words than this
    pub fallback_min_words: usize,

    /// Body size assumed when the document has no usable body text
    pub default_body_size: i32,

    /// Minimum words in a title candidate
    pub title_min_words: usize,

    /// Maximum words in a title candidate
    pub title_max_words: usize,

    /// A title is only accepted when its score exceeds this value
    pub title_threshold: f64,

    /// Max distance of a centered title from the page center, as a fraction
    /// of the page width
    pub title_center_tolerance: f64,

    /// Minimum whitespace above a heading, in layout units
    pub min_gap: f32,

    /// Headings have fewer words than this
    pub max_heading_words: usize,

    /// Lines ending in sentence punctuation are still headings below this
    /// many words
    pub short_fragment_words: usize,

    /// Number of un-numbered font styles that receive a level; candidates
    /// in lower-ranked styles are dropped
    pub max_ranked_styles: usize,

    /// A leading H1 within this distance of the page top becomes the title
    /// when no title was found
    pub title_promotion_band: f32,

    /// NFC-normalize line text before inference (off: text is kept as
    /// extracted)
    pub normalize_unicode: bool,
}

impl InferenceOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title score threshold.
    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.title_threshold = threshold;
        self
    }

    /// Set the minimum gap above a heading.
    pub fn with_min_gap(mut self, gap: f32) -> Self {
        self.min_gap = gap;
        self
    }

    /// Set how many un-numbered styles receive a level.
    pub fn with_max_ranked_styles(mut self, count: usize) -> Self {
        self.max_ranked_styles = count;
        self
    }

    /// Set the band in which a leading H1 is promoted to title.
    pub fn with_title_promotion_band(mut self, band: f32) -> Self {
        self.title_promotion_band = band;
        self
    }

    /// Never promote the first heading to title.
    pub fn without_title_promotion(mut self) -> Self {
        self.title_promotion_band = f32::NEG_INFINITY;
        self
    }

    /// NFC-normalize line text before inference.
    pub fn with_unicode_normalization(mut self) -> Self {
        self.normalize_unicode = true;
        self
    }

    /// Set the body size assumed for documents without body text.
    pub fn with_default_body_size(mut self, size: i32) -> Self {
        self.default_body_size = size;
        self
    }
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            prose_min_words: 15,
            fallback_min_words: 10,
            default_body_size: 10,
            title_min_words: 2,
            title_max_words: 20,
            title_threshold: 35.0,
            title_center_tolerance: 0.2,
            min_gap: 4.0,
            max_heading_words: 25,
            short_fragment_words: 5,
            max_ranked_styles: 3,
            title_promotion_band: 200.0,
            normalize_unicode: false,
        }
    }
}
