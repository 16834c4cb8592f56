use crate::error::{Result, ScheduleError};

/// Upper bound on sections per course in one report.
pub const MAX_SECTIONS: u32 = 200;

/// Number of sections needed to seat `student_count` students at `capacity` per section.
pub fn required_sections(student_count: i64, capacity: u32) -> Result<u32> {
    if student_count < 1 {
        return Err(ScheduleError::InvalidInput(format!(
            "student count must be at least 1, got {}",
            student_count
        )));
    }
    if capacity < 1 {
        return Err(ScheduleError::InvalidInput(
            "section capacity must be at least 1".to_string(),
        ));
    }
    let sections = (student_count as u64).div_ceil(capacity as u64);
    if sections > MAX_SECTIONS as u64 {
        return Err(ScheduleError::InvalidInput(format!(
            "{} students at capacity {} needs {} sections, more than the limit of {}",
            student_count, capacity, sections, MAX_SECTIONS
        )));
    }
    Ok(sections as u32)
}
