use crate::schedule::model::{ClassRecord, GradeLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictOutput {
    pub day_of_week: u8,
    pub period: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOutput {
    pub class_number: String,
    pub grade: GradeLevel,
    pub default_conflicts: Vec<ConflictOutput>,
    pub active: bool,
}

/// The payload handed to the scheduling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub classes: Vec<ClassOutput>,
}

impl ClassRecord {
    pub fn to_output(&self) -> ClassOutput {
        ClassOutput {
            class_number: self.class_id().to_string(),
            grade: self.grade_level(),
            default_conflicts: self
                .conflicts()
                .iter()
                .map(|(day, period)| ConflictOutput {
                    day_of_week: day.day_of_week(),
                    period: period.get(),
                })
                .collect(),
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::model::Weekday;

    #[test]
    fn test_class_output_shape() {
        let mut record = ClassRecord::new("K/1/2-115", "multiple").unwrap();
        record.add_conflict(Weekday::Thursday, 6).unwrap();
        record.add_conflict(Weekday::Monday, 4).unwrap();
        record.add_conflict(Weekday::Monday, 1).unwrap();

        let json = serde_json::to_value(record.to_output()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "classNumber": "K/1/2-115",
                "grade": "multiple",
                "defaultConflicts": [
                    { "dayOfWeek": 1, "period": 1 },
                    { "dayOfWeek": 1, "period": 4 },
                    { "dayOfWeek": 4, "period": 6 }
                ],
                "active": true
            })
        );
    }
}
