use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type SectionNumber = u32;

pub const DEFAULT_SECTION_CAPACITY: u32 = 40;
pub const UNTITLED_COURSE: &str = "Untitled Course";

/// Which slot universe a program draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramCategory {
    Standard,
    /// Evening and weekend heavy programs (MBA).
    #[serde(alias = "evening")]
    EveningWeekendHeavy,
}

impl ProgramCategory {
    pub fn from_program_name(program: &str) -> Self {
        if program.to_lowercase().contains("mba") {
            ProgramCategory::EveningWeekendHeavy
        } else {
            ProgramCategory::Standard
        }
    }
}

/// Which course attribute keys the per-course usage ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupingKey {
    #[default]
    Title,
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const WEEKEND: [Weekday; 2] = [Weekday::Saturday, Weekday::Sunday];

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// Day label of a slot: a single day, or a pair of weekdays meeting at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPattern {
    Single(Weekday),
    Paired(Weekday, Weekday),
}

impl DayPattern {
    /// The weekend day this pattern falls on, if any.
    pub fn weekend_day(self) -> Option<Weekday> {
        match self {
            DayPattern::Single(day) if day.is_weekend() => Some(day),
            _ => None,
        }
    }

    pub fn is_weekend(self) -> bool {
        self.weekend_day().is_some()
    }
}

impl fmt::Display for DayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPattern::Single(day) => write!(f, "{}", day.name()),
            DayPattern::Paired(first, second) => write!(f, "{} / {}", first.name(), second.name()),
        }
    }
}

impl Serialize for DayPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    pub start: &'static str,
    pub end: &'static str,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// A recurring weekly meeting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    pub day: DayPattern,
    pub time: TimeRange,
}

impl Slot {
    pub fn is_weekend(&self) -> bool {
        self.day.is_weekend()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

/// Raw catalog entry as handed over by the upload layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub program: String,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
}

/// One normalised catalog row that needs sections scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRow {
    pub course_code: String,
    pub course_title: String,
    pub program: String,
    pub semester: String,
    pub student_count: u32,
    pub required_sections: u32,
}

impl CourseRow {
    pub fn key(&self, grouping: GroupingKey) -> &str {
        match grouping {
            GroupingKey::Title => &self.course_title,
            GroupingKey::Code => &self.course_code,
        }
    }
}

/// A slot given to one section of one course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Index of the course row in the assigner input.
    pub course_index: usize,
    pub section: SectionNumber,
    pub slot: Slot,
}

/// Raised when no collision-free slot existed and a random one was forced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotWarning {
    pub course_title: String,
    pub course_code: String,
    pub section: SectionNumber,
    pub description: String,
}

impl fmt::Display for SlotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Slot Exhaustion] {}", self.description)
    }
}

/// One exported row of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub program: String,
    pub section: SectionNumber,
    pub course_code: String,
    pub course_title: String,
    pub day: String,
    pub time: String,
    pub student_count: u32,
    pub required_sections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub section: SectionNumber,
    pub weekday_count: usize,
    pub weekend_count: usize,
    pub total_count: usize,
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> u32 {
    DEFAULT_SECTION_CAPACITY
}

/// Knobs shared by the single-program and batch requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptions {
    pub semester: String,
    pub catalog: Vec<CatalogEntry>,
    /// Program name -> number of students.
    pub student_counts: HashMap<String, i64>,
    #[serde(default = "default_true")]
    pub weekends_allowed: bool,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub grouping_key: GroupingKey,
    #[serde(default)]
    pub catalog_id: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub program: String,
    #[serde(flatten)]
    pub options: ScheduleOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(flatten)]
    pub options: ScheduleOptions,
}

/// The generated schedule for one program and semester.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub program: String,
    pub semester: String,
    pub category: ProgramCategory,
    pub file_name: String,
    pub rows: Vec<ScheduleRow>,
    pub summary: Vec<SectionSummary>,
    pub warnings: Vec<SlotWarning>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedProgram {
    pub program: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub reports: Vec<ScheduleReport>,
    pub skipped: Vec<SkippedProgram>,
}
