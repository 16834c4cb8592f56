use crate::data::{DayPattern, ProgramCategory, Slot, TimeRange, Weekday};

const WEEKDAY_TIMES: [TimeRange; 4] = [
    TimeRange { start: "8:30 AM", end: "10:00 AM" },
    TimeRange { start: "10:00 AM", end: "11:30 AM" },
    TimeRange { start: "11:30 AM", end: "1:00 PM" },
    TimeRange { start: "2:00 PM", end: "3:30 PM" },
];

const WEEKEND_TIMES: [TimeRange; 2] = [
    TimeRange { start: "9:00 AM", end: "12:00 PM" },
    TimeRange { start: "2:00 PM", end: "5:00 PM" },
];

const EVENING_TIME: TimeRange = TimeRange { start: "6:30 PM", end: "9:30 PM" };

const PAIRED_WEEKDAYS: [DayPattern; 2] = [
    DayPattern::Paired(Weekday::Monday, Weekday::Wednesday),
    DayPattern::Paired(Weekday::Tuesday, Weekday::Thursday),
];

const EVENING_WEEKDAYS: [Weekday; 4] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
];

fn weekend_slots() -> impl Iterator<Item = Slot> {
    Weekday::WEEKEND.into_iter().flat_map(|day| {
        WEEKEND_TIMES.into_iter().map(move |time| Slot {
            day: DayPattern::Single(day),
            time,
        })
    })
}

/// Builds the ordered slot universe for a program category.
///
/// The evening category always gets its fixed eight slots; `weekends_allowed`
/// only narrows the standard universe.
pub fn build_slot_catalog(category: ProgramCategory, weekends_allowed: bool) -> Vec<Slot> {
    match category {
        ProgramCategory::Standard => {
            let mut slots: Vec<Slot> = PAIRED_WEEKDAYS
                .into_iter()
                .flat_map(|day| WEEKDAY_TIMES.into_iter().map(move |time| Slot { day, time }))
                .collect();
            if weekends_allowed {
                slots.extend(weekend_slots());
            }
            slots
        }
        ProgramCategory::EveningWeekendHeavy => weekend_slots()
            .chain(EVENING_WEEKDAYS.into_iter().map(|day| Slot {
                day: DayPattern::Single(day),
                time: EVENING_TIME,
            }))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_universe_sizes() {
        let with_weekends = build_slot_catalog(ProgramCategory::Standard, true);
        assert_eq!(with_weekends.len(), 12);
        assert_eq!(with_weekends.iter().filter(|s| s.is_weekend()).count(), 4);

        let weekdays_only = build_slot_catalog(ProgramCategory::Standard, false);
        assert_eq!(weekdays_only.len(), 8);
        assert!(weekdays_only.iter().all(|s| !s.is_weekend()));
    }

    #[test]
    fn evening_universe_ignores_weekend_flag() {
        for weekends in [true, false] {
            let slots = build_slot_catalog(ProgramCategory::EveningWeekendHeavy, weekends);
            assert_eq!(slots.len(), 8);
            assert_eq!(slots.iter().filter(|s| s.is_weekend()).count(), 4);
            assert!(
                slots
                    .iter()
                    .filter(|s| !s.is_weekend())
                    .all(|s| s.time == EVENING_TIME)
            );
        }
    }

    #[test]
    fn slots_are_distinct() {
        for category in [ProgramCategory::Standard, ProgramCategory::EveningWeekendHeavy] {
            let slots = build_slot_catalog(category, true);
            let unique: HashSet<_> = slots.iter().collect();
            assert_eq!(unique.len(), slots.len());
        }
    }
}
