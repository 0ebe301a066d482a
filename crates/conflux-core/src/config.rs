use crate::extraction::WordOptions;
use crate::layout::columns::{COLUMN_TOLERANCE, FALLBACK_COLUMNS, LEFTMOST_COLUMN};
use crate::layout::lines::LINE_TOLERANCE;

/// Tolerances and fallbacks for one parse session.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Vertical distance that still counts as the same visual line.
    pub line_tolerance: f32,
    /// Maximum distance between a period token and its day column.
    pub column_tolerance: f32,
    /// Assumed Monday position when extrapolating missing leading headers.
    pub leftmost_column: f32,
    /// Column positions used when the first page has no weekday headers.
    pub fallback_columns: [f32; 5],
    /// Word merging used when looking for weekday headers.
    pub header_words: WordOptions,
    /// Word merging used for schedule rows.
    pub body_words: WordOptions,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            line_tolerance: LINE_TOLERANCE,
            column_tolerance: COLUMN_TOLERANCE,
            leftmost_column: LEFTMOST_COLUMN,
            fallback_columns: FALLBACK_COLUMNS,
            header_words: WordOptions {
                x_tolerance: 3.0,
                y_tolerance: 3.0,
            },
            body_words: WordOptions {
                x_tolerance: 5.0,
                y_tolerance: 3.0,
            },
        }
    }
}
