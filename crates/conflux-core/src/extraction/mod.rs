pub mod pdftotext;
pub mod words;

use crate::error::ScheduleError;

/// A positioned word as reported by the text-extraction backend.
///
/// Coordinates are in PDF points with the origin at the top-left corner
/// of the page, so `top` grows downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f32,
    pub x1: f32,
    pub top: f32,
    pub bottom: f32,
    /// Glyph box height; the closest thing to a font size the backend exposes.
    pub size: Option<f32>,
}

impl Word {
    /// Build a word from its left edge and top only, with a zero-width box.
    pub fn at(text: &str, x0: f32, top: f32) -> Self {
        Word {
            text: text.to_string(),
            x0,
            x1: x0,
            top,
            bottom: top,
            size: None,
        }
    }
}

/// All words found on a single page, in no particular order.
#[derive(Debug, Clone)]
pub struct PageWords {
    pub page_number: usize,
    pub words: Vec<Word>,
}

/// Tolerances used when merging adjacent backend words into tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordOptions {
    /// Maximum horizontal gap between two words that still belong to one token.
    pub x_tolerance: f32,
    /// Maximum vertical offset between two words on the same row.
    pub y_tolerance: f32,
}

impl Default for WordOptions {
    fn default() -> Self {
        WordOptions {
            x_tolerance: 3.0,
            y_tolerance: 3.0,
        }
    }
}

/// Trait for PDF text extraction backends.
pub trait WordExtractor: Send + Sync {
    /// Extract positioned words from PDF bytes, returning one PageWords per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, ScheduleError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
