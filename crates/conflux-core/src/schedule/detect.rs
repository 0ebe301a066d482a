use crate::layout::lines::Line;
use crate::schedule::model::{ClassId, ClassIdKind, ClassRecord};

/// Grade label implied by the layout of a class identifier.
///
/// The label is not range-checked here: `9-999` yields `"9"`, which record
/// construction then rejects.
pub fn grade_label_for(class_id: &str, kind: ClassIdKind) -> String {
    match kind {
        ClassIdKind::PreK => "Pre-K".into(),
        ClassIdKind::Kindergarten => "K".into(),
        ClassIdKind::MultiGrade => "multiple".into(),
        ClassIdKind::SingleGrade => class_id.chars().take(1).collect(),
    }
}

/// Try to read a line as the first line of a class row: class number in the
/// first token, class identifier in the second.
///
/// Returns None for anything that doesn't fully check out; the caller then
/// treats the line as a continuation of the current record.
pub fn detect_record(line: &Line) -> Option<ClassRecord> {
    if line.len() < 2 {
        return None;
    }

    let class_id = line[1].text.trim();
    let kind = ClassId::kind_of(class_id)?;
    let grade = grade_label_for(class_id, kind);

    match ClassRecord::new(class_id, &grade) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!(class_id, error = %e, "rejected class record candidate");
            None
        }
    }
}
