use crate::data::{
    Assignment, BatchReport, BatchRequest, CatalogEntry, CourseRow, DayPattern, GroupingKey,
    ProgramCategory, ScheduleOptions, ScheduleReport, ScheduleRequest, ScheduleRow,
    SectionNumber, SkippedProgram, Slot, SlotWarning, UNTITLED_COURSE, Weekday,
};
use crate::demand::required_sections;
use crate::error::{Result, ScheduleError};
use crate::slots::build_slot_catalog;
use crate::summary::summarize;
use itertools::Itertools;
use log::{debug, info, trace, warn};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

const WEEKEND_PREFERENCE_PROBABILITY: f64 = 0.3;
const MAX_WEEKEND_MEETINGS: usize = 2;
const MAX_WEEKDAY_MEETINGS: usize = 6;

/// Result of one greedy assignment run.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
    pub warnings: Vec<SlotWarning>,
}

/// Occupancy and usage ledgers for a single `assign_schedule` call.
#[derive(Debug, Default)]
pub struct SchedulerState {
    section_occupied: HashMap<SectionNumber, HashSet<Slot>>,
    section_weekend_day: HashMap<SectionNumber, Weekday>,
    prefers_weekend: HashMap<SectionNumber, bool>,
    course_slot_count: HashMap<String, HashMap<Slot, u32>>,
    course_used_slots: HashMap<String, HashSet<Slot>>,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_occupied(&self, section: SectionNumber, slot: &Slot) -> bool {
        self.section_occupied
            .get(&section)
            .is_some_and(|slots| slots.contains(slot))
    }

    fn course_used(&self, course: &str, slot: &Slot) -> bool {
        self.course_used_slots
            .get(course)
            .is_some_and(|slots| slots.contains(slot))
    }

    fn usage_count(&self, course: &str, slot: &Slot) -> u32 {
        self.course_slot_count
            .get(course)
            .and_then(|counts| counts.get(slot))
            .copied()
            .unwrap_or(0)
    }

    /// (weekend, weekday) meetings already held by a section.
    fn section_load(&self, section: SectionNumber) -> (usize, usize) {
        self.section_occupied
            .get(&section)
            .map(|slots| {
                let weekend = slots.iter().filter(|s| s.is_weekend()).count();
                (weekend, slots.len() - weekend)
            })
            .unwrap_or((0, 0))
    }

    fn prefers_weekend<R: Rng + ?Sized>(&mut self, section: SectionNumber, rng: &mut R) -> bool {
        *self
            .prefers_weekend
            .entry(section)
            .or_insert_with(|| rng.random_bool(WEEKEND_PREFERENCE_PROBABILITY))
    }

    /// Orders the slot universe for one section of one course.
    fn candidates<R: Rng + ?Sized>(
        &mut self,
        universe: &[Slot],
        category: ProgramCategory,
        weekends_allowed: bool,
        course: &str,
        section: SectionNumber,
        rng: &mut R,
    ) -> Vec<Slot> {
        if category == ProgramCategory::EveningWeekendHeavy {
            return universe.to_vec();
        }

        let (weekend_used, weekday_used) = self.section_load(section);
        let prefers_weekend = self.prefers_weekend(section, rng);
        let (weekend, weekday): (Vec<Slot>, Vec<Slot>) =
            universe.iter().partition(|slot| slot.is_weekend());

        let weekend_first = if !weekends_allowed || weekend_used >= MAX_WEEKEND_MEETINGS {
            false
        } else if weekday_used >= MAX_WEEKDAY_MEETINGS {
            true
        } else {
            prefers_weekend
        };

        let mut candidates = if weekend_first {
            weekend.into_iter().chain(weekday).collect_vec()
        } else if weekends_allowed {
            weekday.into_iter().chain(weekend).collect_vec()
        } else {
            weekday
        };
        candidates.sort_by_key(|slot| self.usage_count(course, slot));
        candidates
    }

    /// First candidate free for the section, unused by the course, and on the
    /// section's committed weekend day.
    fn strict_pick(&self, candidates: &[Slot], course: &str, section: SectionNumber) -> Option<Slot> {
        for slot in candidates {
            if self.is_occupied(section, slot) || self.course_used(course, slot) {
                continue;
            }
            let committed = self.section_weekend_day.get(&section).copied();
            match (slot.day.weekend_day(), committed) {
                (Some(day), Some(committed)) if day != committed => {
                    let remapped = Slot {
                        day: DayPattern::Single(committed),
                        time: slot.time,
                    };
                    if self.is_occupied(section, &remapped) {
                        continue;
                    }
                    return Some(remapped);
                }
                _ => return Some(*slot),
            }
        }
        None
    }

    fn relaxed_pick(&self, candidates: &[Slot], section: SectionNumber) -> Option<Slot> {
        candidates
            .iter()
            .find(|slot| !self.is_occupied(section, slot))
            .copied()
    }

    fn record(&mut self, course: &str, section: SectionNumber, slot: Slot) {
        self.section_occupied.entry(section).or_default().insert(slot);
        if let Some(day) = slot.day.weekend_day() {
            self.section_weekend_day.entry(section).or_insert(day);
        }
        *self
            .course_slot_count
            .entry(course.to_string())
            .or_default()
            .entry(slot)
            .or_insert(0) += 1;
        self.course_used_slots
            .entry(course.to_string())
            .or_default()
            .insert(slot);
    }
}

/// Greedily gives every section of every course row one slot.
///
/// Rows are processed in order and sections ascending, so the assignments come
/// back in that order. Section numbers are shared by all rows: section `n` of
/// every course competes for the same occupancy ledger. When no slot avoids a
/// clash the section still gets a random slot and a warning is recorded.
pub fn assign_schedule<R: Rng + ?Sized>(
    rows: &[CourseRow],
    category: ProgramCategory,
    weekends_allowed: bool,
    grouping: GroupingKey,
    rng: &mut R,
) -> Allocation {
    let universe = build_slot_catalog(category, weekends_allowed);
    let mut state = SchedulerState::new();
    let mut allocation = Allocation::default();

    if universe.is_empty() {
        return allocation;
    }

    for (course_index, row) in rows.iter().enumerate() {
        let course = row.key(grouping);
        for section in 1..=row.required_sections {
            let candidates =
                state.candidates(&universe, category, weekends_allowed, course, section, rng);

            let slot = match state
                .strict_pick(&candidates, course, section)
                .or_else(|| state.relaxed_pick(&candidates, section))
            {
                Some(slot) => slot,
                None => {
                    let slot = universe[rng.random_range(0..universe.len())];
                    let warning = SlotWarning {
                        course_title: row.course_title.clone(),
                        course_code: row.course_code.clone(),
                        section,
                        description: format!(
                            "No free slot left for section {} of '{}'; assigned {} at random.",
                            section, row.course_title, slot
                        ),
                    };
                    warn!("{}", warning);
                    allocation.warnings.push(warning);
                    slot
                }
            };

            state.record(course, section, slot);
            trace!("Section {} of '{}' -> {}", section, row.course_title, slot);
            allocation.assignments.push(Assignment {
                course_index,
                section,
                slot,
            });
        }
    }

    allocation
}

struct NormalizedEntry {
    program: String,
    semester: String,
    course_code: String,
    course_title: String,
}

fn normalize_catalog(catalog: &[CatalogEntry]) -> impl Iterator<Item = NormalizedEntry> + '_ {
    catalog.iter().filter_map(|entry| {
        let semester = entry.semester.as_deref().map(str::trim).unwrap_or_default();
        if semester.is_empty() {
            return None;
        }
        let course_title = entry
            .course_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED_COURSE);
        Some(NormalizedEntry {
            program: entry.program.trim().to_string(),
            semester: semester.to_string(),
            course_code: entry.course_code.as_deref().map(str::trim).unwrap_or_default().to_string(),
            course_title: course_title.to_string(),
        })
    })
}

fn student_count_for(options: &ScheduleOptions, program: &str) -> Result<i64> {
    options
        .student_counts
        .iter()
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(program))
        .map(|(_, count)| *count)
        .ok_or_else(|| {
            ScheduleError::InvalidInput(format!("no student count given for program '{}'", program))
        })
}

/// Derived export name, e.g. `BBA_Fall_2024_cat1_schedule.csv`.
pub fn report_file_name(program: &str, semester: &str, catalog_id: Option<&str>) -> String {
    let clean = |part: &str| -> String {
        part.trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    match catalog_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => format!("{}_{}_{}_schedule.csv", clean(program), clean(semester), clean(id)),
        None => format!("{}_{}_schedule.csv", clean(program), clean(semester)),
    }
}

fn schedule_program<R: Rng + ?Sized>(
    program: &str,
    options: &ScheduleOptions,
    rng: &mut R,
) -> Result<ScheduleReport> {
    let start_time = Instant::now();
    let program = program.trim();
    let semester = options.semester.trim();

    let student_count = student_count_for(options, program)?;
    let sections = required_sections(student_count, options.capacity)?;
    let student_count = u32::try_from(student_count).map_err(|_| {
        ScheduleError::InvalidInput(format!("student count {} is too large", student_count))
    })?;

    let rows: Vec<CourseRow> = normalize_catalog(&options.catalog)
        .filter(|e| e.program.eq_ignore_ascii_case(program) && e.semester.eq_ignore_ascii_case(semester))
        .map(|e| CourseRow {
            course_code: e.course_code,
            course_title: e.course_title,
            program: e.program,
            semester: e.semester,
            student_count,
            required_sections: sections,
        })
        .collect();

    if rows.is_empty() {
        return Err(ScheduleError::EmptyCatalog {
            program: program.to_string(),
            semester: semester.to_string(),
        });
    }

    let category = ProgramCategory::from_program_name(program);
    info!(
        "Scheduling {} courses x {} sections for '{}' ({:?}, weekends allowed: {})...",
        rows.len(),
        sections,
        program,
        category,
        options.weekends_allowed
    );

    let allocation = assign_schedule(
        &rows,
        category,
        options.weekends_allowed,
        options.grouping_key,
        rng,
    );

    let schedule_rows: Vec<ScheduleRow> = allocation
        .assignments
        .iter()
        .map(|a| {
            let course = &rows[a.course_index];
            ScheduleRow {
                program: course.program.clone(),
                section: a.section,
                course_code: course.course_code.clone(),
                course_title: course.course_title.clone(),
                day: a.slot.day.to_string(),
                time: a.slot.time.to_string(),
                student_count: course.student_count,
                required_sections: course.required_sections,
            }
        })
        .collect();
    let summary = summarize(&schedule_rows);

    info!(
        "Assigned {} section meetings for '{}' in {:.2?} ({} warnings)",
        schedule_rows.len(),
        program,
        start_time.elapsed(),
        allocation.warnings.len()
    );

    Ok(ScheduleReport {
        program: program.to_string(),
        semester: semester.to_string(),
        category,
        file_name: report_file_name(program, semester, options.catalog_id.as_deref()),
        rows: schedule_rows,
        summary,
        warnings: allocation.warnings,
    })
}

/// Builds the schedule report for the requested program and semester.
pub fn solve<R: Rng + ?Sized>(request: &ScheduleRequest, rng: &mut R) -> Result<ScheduleReport> {
    schedule_program(&request.program, &request.options, rng)
}

/// Schedules every program that has courses in the requested semester.
///
/// Each program gets its own fresh ledgers. Programs that cannot be scheduled
/// because of bad input are listed in `skipped`.
pub fn solve_all_programs<R: Rng + ?Sized>(request: &BatchRequest, rng: &mut R) -> Result<BatchReport> {
    let options = &request.options;
    if options.capacity < 1 {
        return Err(ScheduleError::InvalidInput(
            "section capacity must be at least 1".to_string(),
        ));
    }
    let semester = options.semester.trim();

    let programs: Vec<String> = normalize_catalog(&options.catalog)
        .filter(|e| e.semester.eq_ignore_ascii_case(semester))
        .map(|e| e.program)
        .unique_by(|p| p.to_lowercase())
        .collect();

    if programs.is_empty() {
        return Err(ScheduleError::EmptyCatalog {
            program: "*".to_string(),
            semester: semester.to_string(),
        });
    }

    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    for program in programs {
        match schedule_program(&program, options, rng) {
            Ok(report) => reports.push(report),
            Err(e) => {
                debug!("Skipping program '{}': {}", program, e);
                skipped.push(SkippedProgram {
                    program,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(BatchReport { reports, skipped })
}
