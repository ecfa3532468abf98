//! Property-based tests for calendar invariants
//!
//! These tests use property-based testing to verify that the bucketing
//! invariants hold for arbitrary start dates, durations and work-week
//! lengths.

use chrono::{Datelike, Months, NaiveDate, TimeDelta, Weekday};
use proptest::prelude::*;
use report_tree::domain::{
    ApprenticeshipInterval, BucketGenerator, DurationYears, PartNumber, Segment, StartDate,
    WeekSegment, WorkDaysPerWeek, YearSegment,
};
use report_tree::period_calculator::{day_offset, end_date};

// Property test generators
pub mod generators {
    use super::*;

    /// Dates between 2000 and 2030
    pub fn start_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..365 * 30).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + TimeDelta::days(offset)
        })
    }

    /// Durations of whole or half years in `[1, 10]`
    pub fn duration() -> impl Strategy<Value = DurationYears> {
        (2u32..=20).prop_map(|halves| DurationYears::try_new(f64::from(halves) / 2.0).unwrap())
    }

    /// Short durations keep the generator-driven properties fast
    pub fn short_duration() -> impl Strategy<Value = DurationYears> {
        (2u32..=7).prop_map(|halves| DurationYears::try_new(f64::from(halves) / 2.0).unwrap())
    }

    pub fn work_days() -> impl Strategy<Value = WorkDaysPerWeek> {
        (1u8..=7).prop_map(|days| WorkDaysPerWeek::try_new(days).unwrap())
    }

    pub fn weekday() -> impl Strategy<Value = Weekday> {
        (0u8..7).prop_map(|index| Weekday::try_from(index).unwrap())
    }
}

fn interval(
    start: NaiveDate,
    duration: DurationYears,
    work_days: WorkDaysPerWeek,
) -> ApprenticeshipInterval {
    ApprenticeshipInterval::new(StartDate::try_new(start).unwrap(), duration, work_days).unwrap()
}

/// Week segments grouped by the year segment they belong to
fn generate(interval: ApprenticeshipInterval) -> Vec<(YearSegment, Vec<WeekSegment>)> {
    let mut years: Vec<(YearSegment, Vec<WeekSegment>)> = Vec::new();
    for segment in BucketGenerator::new(interval) {
        match segment.unwrap() {
            Segment::Year(year) => years.push((year, Vec::new())),
            Segment::Week(week) => years.last_mut().unwrap().1.push(week),
        }
    }
    years
}

fn all_weeks(years: &[(YearSegment, Vec<WeekSegment>)]) -> Vec<WeekSegment> {
    years.iter().flat_map(|(_, weeks)| weeks.iter().copied()).collect()
}

/// Last cursor position before `boundary` inside the year starting at `year_start`
fn last_cursor_before(year_start: NaiveDate, boundary: NaiveDate) -> NaiveDate {
    let mut cursor = year_start;
    loop {
        let next = cursor + TimeDelta::days(day_offset(cursor.weekday(), Weekday::Mon));
        if next >= boundary {
            return cursor;
        }
        cursor = next;
    }
}

proptest! {
    #[test]
    fn whole_year_end_date_has_no_drift(
        start in generators::start_date(),
        years in 1u32..=10,
    ) {
        let duration = DurationYears::try_new(f64::from(years)).unwrap();
        let expected = start.checked_add_months(Months::new(12 * years)).unwrap();

        prop_assert_eq!(end_date(start, duration).unwrap(), expected);
        if start.month() != 2 || start.day() != 29 {
            prop_assert_eq!(expected.day(), start.day());
            prop_assert_eq!(expected.year(), start.year() + years as i32);
        }
    }

    #[test]
    fn half_year_end_date_adds_six_months(
        start in generators::start_date(),
        duration in generators::duration(),
    ) {
        prop_assume!(duration.has_half_year());
        let whole = start
            .checked_add_months(Months::new(12 * duration.whole_years()))
            .unwrap();
        let expected = whole.checked_add_months(Months::new(6)).unwrap();

        prop_assert_eq!(end_date(start, duration).unwrap(), expected);
    }

    #[test]
    fn day_offset_is_a_positive_partial_cycle(
        current in generators::weekday(),
        desired in generators::weekday(),
    ) {
        let offset = day_offset(current, desired);

        prop_assert!((1..=7).contains(&offset));
        prop_assert_eq!(day_offset(current, current), 7);
        let reached = NaiveDate::from_isoywd_opt(2024, 10, current).unwrap()
            + TimeDelta::days(offset);
        prop_assert_eq!(reached.weekday(), desired);
    }

    #[test]
    fn single_day_weeks_never_split_and_count_up_by_one(
        start in generators::start_date(),
        duration in generators::short_duration(),
    ) {
        let work_days = WorkDaysPerWeek::try_new(1).unwrap();
        let weeks = all_weeks(&generate(interval(start, duration, work_days)));

        for (index, week) in weeks.iter().enumerate() {
            prop_assert!(week.single_day);
            prop_assert_eq!(week.start, week.end);
            prop_assert_eq!(week.part, PartNumber::Whole);
            prop_assert_eq!(week.week_number as usize, index + 1);
        }
    }

    #[test]
    fn week_segments_stay_inside_their_year(
        start in generators::start_date(),
        duration in generators::short_duration(),
        work_days in generators::work_days(),
    ) {
        let interval = interval(start, duration, work_days);
        let years = generate(interval);

        prop_assert_eq!(years.len() as u32, duration.year_count());
        prop_assert_eq!(years[0].0.start, start);
        prop_assert_eq!(years.last().unwrap().0.end, interval.end_date());
        for pair in years.windows(2) {
            prop_assert_eq!(pair[0].0.end, pair[1].0.start);
        }

        for (year, weeks) in &years {
            prop_assert!(!weeks.is_empty());
            prop_assert_eq!(weeks[0].start, year.start);
            for week in weeks {
                prop_assert!(week.start >= year.start);
                prop_assert!(week.end < year.end);
                prop_assert!(week.start <= week.end);
                prop_assert!(week.days() <= work_days.days());
            }
        }
    }

    #[test]
    fn week_numbers_increase_by_at_most_one(
        start in generators::start_date(),
        duration in generators::short_duration(),
        work_days in generators::work_days(),
    ) {
        let weeks = all_weeks(&generate(interval(start, duration, work_days)));

        prop_assert_eq!(weeks[0].week_number, 1);
        for pair in weeks.windows(2) {
            let step = pair[1].week_number - pair[0].week_number;
            if pair[1].part == PartNumber::Second {
                prop_assert_eq!(step, 0);
            } else {
                prop_assert_eq!(step, 1);
            }
        }
    }

    #[test]
    fn split_weeks_pair_up_and_cover_one_work_week(
        start in generators::start_date(),
        duration in generators::short_duration(),
        work_days in generators::work_days(),
    ) {
        let weeks = all_weeks(&generate(interval(start, duration, work_days)));

        for (index, week) in weeks.iter().enumerate() {
            match week.part {
                PartNumber::First => {
                    let second = weeks[index + 1];
                    prop_assert_eq!(second.part, PartNumber::Second);
                    prop_assert_eq!(second.week_number, week.week_number);
                    prop_assert_eq!(second.start, week.end + TimeDelta::days(1));
                    prop_assert_eq!(week.days() + second.days(), work_days.days());
                }
                PartNumber::Second => {
                    prop_assert_eq!(weeks[index - 1].part, PartNumber::First);
                }
                PartNumber::Whole => {}
            }
        }
    }

    #[test]
    fn boundary_inside_a_work_week_splits_exactly_once(
        start in generators::start_date(),
        duration in generators::short_duration(),
        work_days in generators::work_days(),
    ) {
        let interval = interval(start, duration, work_days);
        let years = generate(interval);

        for (year, weeks) in &years {
            let boundary = year.end;
            let cursor = last_cursor_before(year.start, boundary);
            let crosses = boundary < interval.end_date()
                && (boundary - cursor).num_days() < work_days.days();
            let first_parts = weeks.iter().filter(|week| week.part == PartNumber::First).count();

            prop_assert_eq!(first_parts, usize::from(crosses));
            if crosses {
                prop_assert_eq!(weeks.last().unwrap().part, PartNumber::First);
                prop_assert_eq!(weeks.last().unwrap().start, cursor);
            }
        }
    }

    #[test]
    fn counters_account_for_every_week_segment(
        start in generators::start_date(),
        duration in generators::short_duration(),
        work_days in generators::work_days(),
    ) {
        let mut generator = BucketGenerator::new(interval(start, duration, work_days));
        let mut week_segments = 0u32;
        let mut split_firsts = 0u32;
        for segment in generator.by_ref() {
            if let Segment::Week(week) = segment.unwrap() {
                week_segments += 1;
                if week.part == PartNumber::First {
                    split_firsts += 1;
                }
            }
        }

        let state = generator.state();
        prop_assert_eq!(state.week_segments_emitted(), week_segments);
        prop_assert_eq!(state.no_increment_counter, split_firsts);
        prop_assert_eq!(state.overlap_part_counter, 0);
    }
}
