use crate::schedule::model::GradeLevel;
use serde::Serialize;
use std::collections::BTreeMap;

/// One conflict as it was read off the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictTrace {
    pub page_number: usize,
    pub class_id: String,
    pub day: String,
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// False when the conflict had already been recorded for this class.
    pub is_new: bool,
}

/// A period-looking token that matched no day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedToken {
    pub page_number: usize,
    pub class_id: String,
    pub text: String,
    pub x0: f32,
}

/// Informational side channel of a parse. Never part of the output payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseDiagnostics {
    /// Day column x-positions, Monday first.
    pub columns: [f32; 5],
    pub conflicts: Vec<ConflictTrace>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_tokens: Vec<SkippedToken>,
    /// Lines seen before any class row on their page.
    pub orphan_lines: usize,
    pub grade_histogram: BTreeMap<GradeLevel, usize>,
}
