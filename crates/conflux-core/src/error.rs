/// A parsed record or document that breaks one of the schedule rules.
///
/// Every variant is fatal to the whole run. Heuristic misses during
/// extraction (no matching column, no subject, undetermined grade) are
/// not errors and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid class identifier format: {0}")]
    InvalidClassId(String),

    #[error("Invalid grade level: {0}")]
    InvalidGradeLevel(String),

    #[error("Invalid period number: {0}")]
    InvalidPeriod(u32),

    #[error("Invalid grade {grade} in multiple-grade class {class_id}")]
    InvalidGradeComponent { class_id: String, grade: String },

    #[error("Invalid grade number {grade} in class {class_id}")]
    GradeOutOfRange { class_id: String, grade: u32 },

    #[error("Grade level {grade} doesn't match class identifier format {class_id}")]
    GradeMismatch { class_id: String, grade: String },

    #[error("Class {0} has no conflicts")]
    NoConflicts(String),

    #[error("Class {class_id} has {count} conflicts on {day}, maximum is 8")]
    TooManyPeriods {
        class_id: String,
        day: String,
        count: usize,
    },

    #[error("Duplicate class identifier: {0}")]
    DuplicateClassId(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
