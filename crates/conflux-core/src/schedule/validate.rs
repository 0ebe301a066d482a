use crate::error::ValidationError;
use crate::schedule::model::{ClassRecord, GradeLevel, Weekday, MAX_PERIOD};
use std::collections::{BTreeMap, HashSet};

/// Grade implied by the part of a class identifier before its first `-`.
///
/// Unlike detection, this range-checks what it finds: every component of a
/// multi-grade prefix must be `K` or `1`..`5`, and a single-grade digit may
/// not exceed 5. Returns `Ok(None)` when the prefix implies nothing.
pub fn expected_grade(class_id: &str) -> Result<Option<GradeLevel>, ValidationError> {
    let prefix = class_id.split('-').next().unwrap_or(class_id);

    if prefix.starts_with("PK") {
        return Ok(Some(GradeLevel::PreK));
    }
    if prefix == "K" {
        return Ok(Some(GradeLevel::Kindergarten));
    }
    if prefix.contains('/') {
        for grade in prefix.split('/') {
            if !matches!(grade, "K" | "1" | "2" | "3" | "4" | "5") {
                return Err(ValidationError::InvalidGradeComponent {
                    class_id: class_id.to_string(),
                    grade: grade.to_string(),
                });
            }
        }
        return Ok(Some(GradeLevel::Multiple));
    }

    match prefix.chars().next().and_then(|c| c.to_digit(10)) {
        Some(digit) if digit > 5 => Err(ValidationError::GradeOutOfRange {
            class_id: class_id.to_string(),
            grade: digit,
        }),
        Some(digit) => Ok(digit.to_string().parse().ok()),
        None => Ok(None),
    }
}

/// Final checks on one record once the whole document has been read.
pub fn finalize_record(record: &ClassRecord) -> Result<(), ValidationError> {
    let class_id = record.class_id().as_str();

    if expected_grade(class_id)? != Some(record.grade_level()) {
        return Err(ValidationError::GradeMismatch {
            class_id: class_id.to_string(),
            grade: record.grade_level().to_string(),
        });
    }

    if record.conflicts().is_empty() {
        return Err(ValidationError::NoConflicts(class_id.to_string()));
    }

    for day in Weekday::ALL {
        let count = record.conflicts().periods_on(day).len();
        if count > MAX_PERIOD as usize {
            return Err(ValidationError::TooManyPeriods {
                class_id: class_id.to_string(),
                day: day.to_string(),
                count,
            });
        }
    }

    Ok(())
}

/// Cross-record checks: identifiers must be unique, then every record must
/// pass [`finalize_record`]. Returns the grade-level histogram.
pub fn validate_document(
    records: &[ClassRecord],
) -> Result<BTreeMap<GradeLevel, usize>, ValidationError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.class_id()) {
            return Err(ValidationError::DuplicateClassId(
                record.class_id().to_string(),
            ));
        }
    }

    for record in records {
        finalize_record(record)?;
    }

    let mut histogram = BTreeMap::new();
    for record in records {
        *histogram.entry(record.grade_level()).or_insert(0) += 1;
    }

    for (grade, count) in &histogram {
        tracing::info!(%grade, count, "grade level distribution");
    }

    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(class_id: &str, grade: &str, conflicts: &[(Weekday, u32)]) -> ClassRecord {
        let mut record = ClassRecord::new(class_id, grade).unwrap();
        for &(day, period) in conflicts {
            record.add_conflict(day, period).unwrap();
        }
        record
    }

    #[test]
    fn test_expected_grade() {
        assert_eq!(expected_grade("PK207").unwrap(), Some(GradeLevel::PreK));
        assert_eq!(
            expected_grade("K-104").unwrap(),
            Some(GradeLevel::Kindergarten)
        );
        assert_eq!(expected_grade("4-312").unwrap(), Some(GradeLevel::Fourth));
        assert_eq!(
            expected_grade("K/1/2-115").unwrap(),
            Some(GradeLevel::Multiple)
        );
    }

    #[test]
    fn test_expected_grade_rejects_bad_components() {
        assert!(matches!(
            expected_grade("K/1/7-115"),
            Err(ValidationError::InvalidGradeComponent { grade, .. }) if grade == "7"
        ));
        assert!(matches!(
            expected_grade("6-101"),
            Err(ValidationError::GradeOutOfRange { grade: 6, .. })
        ));
    }

    #[test]
    fn test_finalize_accepts_valid_record() {
        let record = record_with("3-210", "3", &[(Weekday::Friday, 8)]);
        assert!(finalize_record(&record).is_ok());
    }

    #[test]
    fn test_finalize_rejects_grade_mismatch() {
        let record = record_with("PK207", "K", &[(Weekday::Monday, 1)]);
        assert!(matches!(
            finalize_record(&record),
            Err(ValidationError::GradeMismatch { .. })
        ));
    }

    #[test]
    fn test_finalize_rejects_multi_grade_with_bad_component() {
        // "0" is a digit but not a grade.
        let record = record_with("K/0/1-115", "multiple", &[(Weekday::Monday, 1)]);
        assert!(matches!(
            finalize_record(&record),
            Err(ValidationError::InvalidGradeComponent { .. })
        ));
    }

    #[test]
    fn test_finalize_rejects_empty_conflicts() {
        let record = record_with("PK207", "Pre-K", &[]);
        assert_eq!(
            finalize_record(&record),
            Err(ValidationError::NoConflicts("PK207".into()))
        );
    }

    #[test]
    fn test_full_day_is_allowed() {
        let all: Vec<(Weekday, u32)> = (1..=8).map(|p| (Weekday::Monday, p)).collect();
        let record = record_with("1-101", "1", &all);
        assert!(finalize_record(&record).is_ok());
    }

    #[test]
    fn test_duplicate_class_ids_rejected() {
        let records = vec![
            record_with("PK207", "Pre-K", &[(Weekday::Monday, 1)]),
            record_with("K-104", "K", &[(Weekday::Monday, 2)]),
            record_with("PK207", "Pre-K", &[(Weekday::Tuesday, 3)]),
        ];
        assert_eq!(
            validate_document(&records),
            Err(ValidationError::DuplicateClassId("PK207".into()))
        );
    }

    #[test]
    fn test_histogram() {
        let records = vec![
            record_with("PK207", "Pre-K", &[(Weekday::Monday, 1)]),
            record_with("PK208", "Pre-K", &[(Weekday::Monday, 1)]),
            record_with("2-114", "2", &[(Weekday::Monday, 2)]),
        ];
        let histogram = validate_document(&records).unwrap();
        assert_eq!(histogram.get(&GradeLevel::PreK), Some(&2));
        assert_eq!(histogram.get(&GradeLevel::Second), Some(&1));
        assert_eq!(histogram.len(), 2);
    }

    #[test]
    fn test_document_validation_surfaces_record_errors() {
        let records = vec![record_with("PK207", "Pre-K", &[])];
        assert!(matches!(
            validate_document(&records),
            Err(ValidationError::NoConflicts(_))
        ));
    }
}
