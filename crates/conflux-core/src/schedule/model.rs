use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Highest period number on a school day.
pub const MAX_PERIOD: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// Canonical column order, left to right.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Zero-based column index (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day number used in the output payload (Monday = 1).
    pub fn day_of_week(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A period number in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(u8);

impl Period {
    pub fn new(n: u32) -> Result<Period, ValidationError> {
        if (1..=MAX_PERIOD).contains(&n) {
            Ok(Period(n as u8))
        } else {
            Err(ValidationError::InvalidPeriod(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "Pre-K")]
    PreK,
    #[serde(rename = "K")]
    Kindergarten,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "multiple")]
    Multiple,
}

impl GradeLevel {
    pub fn label(self) -> &'static str {
        match self {
            GradeLevel::PreK => "Pre-K",
            GradeLevel::Kindergarten => "K",
            GradeLevel::First => "1",
            GradeLevel::Second => "2",
            GradeLevel::Third => "3",
            GradeLevel::Fourth => "4",
            GradeLevel::Fifth => "5",
            GradeLevel::Multiple => "multiple",
        }
    }
}

impl FromStr for GradeLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pre-K" => Ok(GradeLevel::PreK),
            "K" => Ok(GradeLevel::Kindergarten),
            "1" => Ok(GradeLevel::First),
            "2" => Ok(GradeLevel::Second),
            "3" => Ok(GradeLevel::Third),
            "4" => Ok(GradeLevel::Fourth),
            "5" => Ok(GradeLevel::Fifth),
            "multiple" => Ok(GradeLevel::Multiple),
            other => Err(ValidationError::InvalidGradeLevel(other.to_string())),
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which room-number layout a class identifier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassIdKind {
    /// `PK207`
    PreK,
    /// `K-104`
    Kindergarten,
    /// `3-210`
    SingleGrade,
    /// `K/1/2-115`
    MultiGrade,
}

static CLASS_ID_PATTERNS: LazyLock<Vec<(ClassIdKind, Regex)>> = LazyLock::new(|| {
    vec![
        (ClassIdKind::PreK, Regex::new(r"^PK[0-9]{3}$").unwrap()),
        (
            ClassIdKind::Kindergarten,
            Regex::new(r"^K-[0-9]{3}$").unwrap(),
        ),
        (
            ClassIdKind::SingleGrade,
            Regex::new(r"^[0-9]-[0-9]{3}$").unwrap(),
        ),
        (
            ClassIdKind::MultiGrade,
            Regex::new(r"^[K0-9]/[K0-9]/[K0-9]-[0-9]{3}$").unwrap(),
        ),
    ]
});

/// A class identifier that matches one of the four room-number layouts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(String);

impl ClassId {
    pub fn parse(s: &str) -> Result<ClassId, ValidationError> {
        match Self::kind_of(s) {
            Some(_) => Ok(ClassId(s.to_string())),
            None => Err(ValidationError::InvalidClassId(s.to_string())),
        }
    }

    /// The layout `s` matches, if any.
    pub fn kind_of(s: &str) -> Option<ClassIdKind> {
        CLASS_ID_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(s))
            .map(|(kind, _)| *kind)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of (day, period) conflicts of one class.
///
/// Backed by a single ordered set, so iteration is always day-then-period
/// ascending and re-inserting a pair is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet(BTreeSet<(Weekday, Period)>);

impl ConflictSet {
    /// Returns false if the pair was already present.
    pub fn insert(&mut self, day: Weekday, period: Period) -> bool {
        self.0.insert((day, period))
    }

    /// Periods recorded on `day`, strictly ascending.
    pub fn periods_on(&self, day: Weekday) -> Vec<u8> {
        self.0
            .iter()
            .filter(|(d, _)| *d == day)
            .map(|(_, p)| p.get())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Period)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One class row of the master schedule and the conflicts found for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRecord {
    class_id: ClassId,
    grade_level: GradeLevel,
    conflicts: ConflictSet,
}

impl ClassRecord {
    /// Validates the identifier layout and the grade label. Whether the two
    /// agree is only checked when the record is finalized.
    pub fn new(class_id: &str, grade_level: &str) -> Result<ClassRecord, ValidationError> {
        let class_id = ClassId::parse(class_id)?;
        let grade_level = grade_level.parse::<GradeLevel>()?;
        Ok(ClassRecord {
            class_id,
            grade_level,
            conflicts: ConflictSet::default(),
        })
    }

    /// Record a conflict. Duplicates are ignored and reported as `Ok(false)`.
    pub fn add_conflict(&mut self, day: Weekday, period: u32) -> Result<bool, ValidationError> {
        let period = Period::new(period)?;
        Ok(self.conflicts.insert(day, period))
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn grade_level(&self) -> GradeLevel {
        self.grade_level
    }

    pub fn conflicts(&self) -> &ConflictSet {
        &self.conflicts
    }
}
