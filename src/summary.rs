use crate::data::{ScheduleRow, SectionSummary, Weekday};
use itertools::Itertools;

fn is_weekend_label(day: &str) -> bool {
    Weekday::WEEKEND.iter().any(|d| day.contains(d.name()))
}

/// Weekday/weekend meeting counts per section number, ascending by section.
pub fn summarize(rows: &[ScheduleRow]) -> Vec<SectionSummary> {
    rows.iter()
        .into_group_map_by(|row| row.section)
        .into_iter()
        .map(|(section, rows)| {
            let weekend_count = rows.iter().filter(|r| is_weekend_label(&r.day)).count();
            SectionSummary {
                section,
                weekday_count: rows.len() - weekend_count,
                weekend_count,
                total_count: rows.len(),
            }
        })
        .sorted_by_key(|s| s.section)
        .collect()
}
