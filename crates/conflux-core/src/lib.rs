pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod schedule;

use config::ParserConfig;
use diagnostics::{ConflictTrace, ParseDiagnostics, SkippedToken};
use error::ScheduleError;
use extraction::words::merge_words;
use extraction::{PageWords, WordExtractor};
use layout::columns::{calibrate, DayColumns};
use layout::lines::group_into_lines;
use schedule::conflicts::extract_conflicts;
use schedule::detect::detect_record;
use schedule::model::{ClassRecord, Weekday};
use schedule::output::ScheduleOutput;
use schedule::validate::validate_document;

/// Validated result of parsing one master schedule.
#[derive(Debug, Clone)]
pub struct ParsedSchedule {
    /// Class records in the order their rows appear in the document.
    pub records: Vec<ClassRecord>,
    pub diagnostics: ParseDiagnostics,
}

impl ParsedSchedule {
    pub fn get(&self, class_id: &str) -> Option<&ClassRecord> {
        self.records
            .iter()
            .find(|r| r.class_id().as_str() == class_id)
    }

    pub fn to_output(&self) -> ScheduleOutput {
        ScheduleOutput {
            classes: self.records.iter().map(ClassRecord::to_output).collect(),
        }
    }
}

/// Main API entry point: extract words from a PDF and parse the schedule.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn WordExtractor,
    config: &ParserConfig,
) -> Result<ParsedSchedule, ScheduleError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted words"
    );
    parse_pages(&pages, config)
}

/// Parse already-extracted pages, in document order.
pub fn parse_pages(
    pages: &[PageWords],
    config: &ParserConfig,
) -> Result<ParsedSchedule, ScheduleError> {
    let mut parser = ScheduleParser::new(config.clone());
    for page in pages {
        parser.feed_page(page)?;
    }
    parser.finish()
}

/// State of one document parse.
///
/// Day columns are calibrated from the first page fed in and reused for
/// every later page. Records accumulate across pages; identifier
/// uniqueness is only checked by [`ScheduleParser::finish`].
pub struct ScheduleParser {
    config: ParserConfig,
    columns: Option<DayColumns>,
    records: Vec<ClassRecord>,
    diagnostics: ParseDiagnostics,
}

impl ScheduleParser {
    pub fn new(config: ParserConfig) -> Self {
        ScheduleParser {
            config,
            columns: None,
            records: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Calibrated columns, once the first page has been fed in.
    pub fn columns(&self) -> Option<DayColumns> {
        self.columns
    }

    fn columns_for(&mut self, page: &PageWords) -> DayColumns {
        if let Some(columns) = self.columns {
            return columns;
        }

        let words = merge_words(&page.words, &self.config.header_words);
        let columns = calibrate(
            &words,
            self.config.leftmost_column,
            self.config.fallback_columns,
        );
        for day in Weekday::ALL {
            tracing::debug!(%day, x = columns.x(day), "calibrated day column");
        }
        self.columns = Some(columns);
        columns
    }

    /// Process one page: group its words into lines, open a record for each
    /// class row and collect conflicts into the active record.
    ///
    /// The active record does not carry over from the previous page.
    pub fn feed_page(&mut self, page: &PageWords) -> Result<(), ScheduleError> {
        let columns = self.columns_for(page);
        let words = merge_words(&page.words, &self.config.body_words);
        let lines = group_into_lines(&words, self.config.line_tolerance);

        let mut current: Option<usize> = None;
        for line in &lines {
            let continuation = match detect_record(line) {
                Some(record) => {
                    tracing::debug!(
                        page = page.page_number,
                        class_id = %record.class_id(),
                        grade = %record.grade_level(),
                        "new class record"
                    );
                    self.records.push(record);
                    current = Some(self.records.len() - 1);
                    false
                }
                None => true,
            };

            let Some(idx) = current else {
                self.diagnostics.orphan_lines += 1;
                continue;
            };

            let record = &mut self.records[idx];
            let found = extract_conflicts(
                line,
                record,
                continuation,
                &columns,
                self.config.column_tolerance,
            )?;

            let class_id = record.class_id().to_string();
            self.diagnostics
                .conflicts
                .extend(found.hits.into_iter().map(|hit| ConflictTrace {
                    page_number: page.page_number,
                    class_id: class_id.clone(),
                    day: hit.day.to_string(),
                    period: hit.period,
                    subject: hit.subject,
                    is_new: hit.is_new,
                }));
            self.diagnostics
                .skipped_tokens
                .extend(found.unplaced.into_iter().map(|token| SkippedToken {
                    page_number: page.page_number,
                    class_id: class_id.clone(),
                    text: token.text,
                    x0: token.x0,
                }));
        }

        Ok(())
    }

    /// Validate every record and the document as a whole.
    pub fn finish(self) -> Result<ParsedSchedule, ScheduleError> {
        let grade_histogram = validate_document(&self.records)?;

        let columns = self
            .columns
            .unwrap_or_else(|| DayColumns::new(self.config.fallback_columns));
        let diagnostics = ParseDiagnostics {
            columns: columns.positions(),
            grade_histogram,
            ..self.diagnostics
        };

        Ok(ParsedSchedule {
            records: self.records,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::Word;

    fn page(number: usize, words: &[(&str, f32, f32)]) -> PageWords {
        PageWords {
            page_number: number,
            words: words.iter().map(|(t, x, y)| Word::at(t, *x, *y)).collect(),
        }
    }

    #[test]
    fn test_calibration_happens_once() {
        let mut parser = ScheduleParser::new(ParserConfig::default());
        assert!(parser.columns().is_none());

        parser
            .feed_page(&page(
                1,
                &[("Monday", 100.0, 40.0), ("Tuesday", 200.0, 40.0)],
            ))
            .unwrap();
        let first = parser.columns().unwrap();
        assert_eq!(first.positions(), [100.0, 200.0, 300.0, 400.0, 500.0]);

        parser
            .feed_page(&page(
                2,
                &[("Monday", 180.0, 40.0), ("Tuesday", 290.0, 40.0)],
            ))
            .unwrap();
        assert_eq!(parser.columns(), Some(first));
    }

    #[test]
    fn test_active_record_resets_each_page() {
        let mut parser = ScheduleParser::new(ParserConfig::default());
        parser
            .feed_page(&page(
                1,
                &[
                    ("001", 20.0, 100.0),
                    ("PK207", 60.0, 100.0),
                    ("Tech", 225.0, 100.0),
                    ("2", 250.0, 100.0),
                ],
            ))
            .unwrap();
        parser
            .feed_page(&page(2, &[("Lib", 120.0, 60.0), ("3", 150.0, 60.0)]))
            .unwrap();

        let parsed = parser.finish().unwrap();
        let record = parsed.get("PK207").unwrap();
        assert!(record.conflicts().periods_on(Weekday::Monday).is_empty());
        assert_eq!(parsed.diagnostics.orphan_lines, 1);
    }

    #[test]
    fn test_no_pages_reports_fallback_columns() {
        let parsed = parse_pages(&[], &ParserConfig::default()).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(
            parsed.diagnostics.columns,
            ParserConfig::default().fallback_columns
        );
    }
}
