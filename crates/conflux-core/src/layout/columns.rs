use crate::extraction::Word;
use crate::schedule::model::Weekday;

/// Column centers used when no weekday header is found at all.
pub const FALLBACK_COLUMNS: [f32; 5] = [150.0, 250.0, 350.0, 450.0, 550.0];

/// Assumed x of the Monday column when headers left of the first found one are missing.
pub const LEFTMOST_COLUMN: f32 = 150.0;

/// Maximum distance between a period token and the column it is assigned to.
pub const COLUMN_TOLERANCE: f32 = 100.0;

/// Calibrated x-coordinates of the five weekday columns, Monday first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayColumns([f32; 5]);

impl DayColumns {
    pub fn new(xs: [f32; 5]) -> Self {
        DayColumns(xs)
    }

    pub fn positions(&self) -> [f32; 5] {
        self.0
    }

    pub fn x(&self, day: Weekday) -> f32 {
        self.0[day.index()]
    }

    /// The column closest to `x`, provided it lies strictly within `tolerance`.
    /// On a tie the leftmost column wins.
    pub fn nearest(&self, x: f32, tolerance: f32) -> Option<Weekday> {
        let mut best: Option<(Weekday, f32)> = None;
        for day in Weekday::ALL {
            let distance = (x - self.x(day)).abs();
            if !distance.is_finite() || distance >= tolerance {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((day, distance));
            }
        }
        best.map(|(day, _)| day)
    }
}

impl Default for DayColumns {
    fn default() -> Self {
        DayColumns(FALLBACK_COLUMNS)
    }
}

/// Locate weekday headers on a page and derive the five column positions.
///
/// A word is a header candidate when its lowercased text contains a weekday
/// name. Candidates are visited left to right; slots skipped before a
/// candidate are interpolated from the previous filled slot, or extrapolated
/// back from `leftmost` when nothing has been filled yet. Slots after the last
/// candidate continue the spacing of the last two filled slots. With no
/// candidates at all the fallback positions are returned.
pub fn calibrate(words: &[Word], leftmost: f32, fallback: [f32; 5]) -> DayColumns {
    let mut candidates: Vec<(Weekday, f32)> = Vec::new();
    for word in words {
        let lower = word.text.to_lowercase();
        for day in Weekday::ALL {
            if lower.contains(&day.name().to_lowercase()) {
                tracing::debug!(day = %day, x = word.x0, "found day header");
                candidates.push((day, word.x0));
            }
        }
    }

    if candidates.is_empty() {
        tracing::warn!("no day headers found, using fixed column positions");
        return DayColumns(fallback);
    }

    // Stable, so candidates sharing an x keep their scan order.
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut filled: Vec<f32> = Vec::with_capacity(5);
    for (day, x) in candidates {
        let idx = day.index();
        if idx < filled.len() {
            // Slot already taken by an earlier (further left) header.
            tracing::debug!(day = %day, x, "ignoring repeated or out-of-order day header");
            continue;
        }
        while filled.len() < idx {
            let next = match filled.last() {
                Some(&prev) => {
                    let step = (x - prev) / (idx - filled.len() + 1) as f32;
                    prev + step
                }
                None => {
                    let step = (x - leftmost) / idx as f32;
                    x - step * (idx - filled.len()) as f32
                }
            };
            filled.push(next);
        }
        filled.push(x);
    }

    while filled.len() < 5 {
        let step = match filled.as_slice() {
            [.., a, b] => b - a,
            _ => fallback[1] - fallback[0],
        };
        let last = filled[filled.len() - 1];
        filled.push(last + step);
    }

    let mut xs = [0.0; 5];
    xs.copy_from_slice(&filled[..5]);
    DayColumns(xs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(entries: &[(&str, f32)]) -> Vec<Word> {
        entries.iter().map(|(t, x)| Word::at(t, *x, 40.0)).collect()
    }

    fn calibrate_default(words: &[Word]) -> [f32; 5] {
        calibrate(words, LEFTMOST_COLUMN, FALLBACK_COLUMNS).positions()
    }

    #[test]
    fn test_no_headers_uses_fallback() {
        let words = headers(&[("001", 20.0), ("PK207", 60.0)]);
        assert_eq!(calibrate_default(&words), FALLBACK_COLUMNS);
        assert_eq!(calibrate_default(&[]), FALLBACK_COLUMNS);
    }

    #[test]
    fn test_all_headers_used_literally() {
        let words = headers(&[
            ("Friday", 612.5),
            ("Monday", 140.25),
            ("Wednesday", 377.0),
            ("Tuesday", 261.0),
            ("Thursday", 498.75),
        ]);
        assert_eq!(
            calibrate_default(&words),
            [140.25, 261.0, 377.0, 498.75, 612.5]
        );
    }

    #[test]
    fn test_headers_matched_case_insensitively_as_substring() {
        let words = headers(&[
            ("MONDAY", 150.0),
            ("Tuesday:", 250.0),
            ("wednesday", 350.0),
            ("(Thursday)", 450.0),
            ("Friday", 550.0),
        ]);
        assert_eq!(calibrate_default(&words), FALLBACK_COLUMNS);
    }

    #[test]
    fn test_missing_middle_header_is_interpolated() {
        let words = headers(&[
            ("Monday", 100.0),
            ("Tuesday", 200.0),
            ("Thursday", 400.0),
            ("Friday", 500.0),
        ]);
        assert_eq!(
            calibrate_default(&words),
            [100.0, 200.0, 300.0, 400.0, 500.0]
        );
    }

    #[test]
    fn test_missing_leading_headers_extrapolated_from_leftmost() {
        let words = headers(&[
            ("Wednesday", 350.0),
            ("Thursday", 450.0),
            ("Friday", 550.0),
        ]);
        assert_eq!(
            calibrate_default(&words),
            [150.0, 250.0, 350.0, 450.0, 550.0]
        );
    }

    #[test]
    fn test_missing_trailing_headers_extrapolated_forward() {
        let words = headers(&[("Monday", 120.0), ("Tuesday", 230.0)]);
        assert_eq!(
            calibrate_default(&words),
            [120.0, 230.0, 340.0, 450.0, 560.0]
        );
    }

    #[test]
    fn test_single_monday_header_uses_fallback_spacing() {
        let words = headers(&[("Monday", 160.0)]);
        assert_eq!(
            calibrate_default(&words),
            [160.0, 260.0, 360.0, 460.0, 560.0]
        );
    }

    #[test]
    fn test_repeated_header_does_not_shift_slots() {
        let words = headers(&[
            ("Monday", 150.0),
            ("Tuesday", 250.0),
            ("Tuesday", 260.0),
            ("Wednesday", 350.0),
            ("Thursday", 450.0),
            ("Friday", 550.0),
        ]);
        assert_eq!(calibrate_default(&words), FALLBACK_COLUMNS);
    }

    #[test]
    fn test_nearest_column_within_tolerance() {
        let columns = DayColumns::default();
        assert_eq!(
            columns.nearest(252.0, COLUMN_TOLERANCE),
            Some(Weekday::Tuesday)
        );
        assert_eq!(columns.nearest(10.0, COLUMN_TOLERANCE), None);
        assert_eq!(columns.nearest(50.0, COLUMN_TOLERANCE), None);
        assert_eq!(columns.nearest(700.0, COLUMN_TOLERANCE), None);
        // Equidistant between Monday and Tuesday.
        assert_eq!(
            columns.nearest(200.0, COLUMN_TOLERANCE),
            Some(Weekday::Monday)
        );
    }

    #[test]
    fn test_non_finite_position_matches_no_column() {
        let columns = DayColumns::default();
        assert_eq!(columns.nearest(f32::NAN, COLUMN_TOLERANCE), None);
        assert_eq!(columns.nearest(f32::INFINITY, COLUMN_TOLERANCE), None);
    }
}
