use crate::error::ValidationError;
use crate::layout::columns::DayColumns;
use crate::layout::lines::Line;
use crate::schedule::model::{ClassRecord, Weekday};

/// Number of tokens before a period marker searched for its subject.
const SUBJECT_LOOKBACK: usize = 2;

/// A period marker that was mapped to a day column.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictHit {
    pub day: Weekday,
    pub period: u32,
    pub subject: Option<String>,
    /// False when the record already had this (day, period).
    pub is_new: bool,
}

/// A period marker too far from every day column.
#[derive(Debug, Clone, PartialEq)]
pub struct UnplacedToken {
    pub text: String,
    pub x0: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineConflicts {
    pub hits: Vec<ConflictHit>,
    pub unplaced: Vec<UnplacedToken>,
}

/// The period number carried by a token: its first digit in `1..=8`.
pub fn period_digit(text: &str) -> Option<u32> {
    text.chars()
        .find(|c| ('1'..='8').contains(c))
        .and_then(|c| c.to_digit(10))
}

/// Best-effort subject label for the period marker at `index`: the nearest of
/// the previous two tokens (never before `start`) that is not purely numeric,
/// lowercased.
pub fn subject_before(line: &Line, index: usize, start: usize) -> Option<String> {
    let from = start.max(index.saturating_sub(SUBJECT_LOOKBACK));
    (from..index).rev().find_map(|j| {
        let text = line.get(j)?.text.to_lowercase();
        let numeric = !text.is_empty() && text.chars().all(|c| c.is_ascii_digit());
        (!numeric).then_some(text)
    })
}

/// Scan a line for period markers and record them on `record`.
///
/// The line that opened the record starts at its third token (class number
/// and identifier are skipped); continuation lines are scanned in full.
/// Markers with no day column within `tolerance` are skipped, not errors.
/// The subject lookup is informational and never decides whether a
/// conflict is recorded.
pub fn extract_conflicts(
    line: &Line,
    record: &mut ClassRecord,
    continuation: bool,
    columns: &DayColumns,
    tolerance: f32,
) -> Result<LineConflicts, ValidationError> {
    let start = if continuation { 0 } else { 2 };
    let mut out = LineConflicts::default();

    for (i, word) in line.iter().enumerate().skip(start) {
        let Some(period) = period_digit(&word.text) else {
            continue;
        };

        let Some(day) = columns.nearest(word.x0, tolerance) else {
            tracing::trace!(text = %word.text, x = word.x0, "period token matches no day column");
            out.unplaced.push(UnplacedToken {
                text: word.text.clone(),
                x0: word.x0,
            });
            continue;
        };

        let subject = subject_before(line, i, start);
        let is_new = record.add_conflict(day, period)?;
        match &subject {
            Some(s) => tracing::debug!(
                class_id = %record.class_id(), %day, period, subject = %s,
                "found conflict with subject"
            ),
            None => tracing::debug!(
                class_id = %record.class_id(), %day, period,
                "found conflict without subject"
            ),
        }

        out.hits.push(ConflictHit {
            day,
            period,
            subject,
            is_new,
        });
    }

    Ok(out)
}
