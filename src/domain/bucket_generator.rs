//! Year/week bucketing of an apprenticeship interval
//!
//! The generator walks the interval year by year. Within a year the cursor
//! starts on the year's first day and then moves in Monday-aligned steps;
//! each step emits the work-week that starts at the cursor. A work-week that
//! runs into the next year is emitted as part 1 up to the boundary and
//! finished as part 2 at the start of the next year, both under the same
//! week number.
//!
//! All mutable state lives in [`GeneratorState`], which [`next_week`] takes
//! and returns by value so single steps can be tested in isolation.

use crate::domain::interval::ApprenticeshipInterval;
use crate::domain::period_calculator::{self, WeekAdvance};
use crate::domain::segments::{PartNumber, Segment, WeekSegment, YearSegment};
use crate::error::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

/// Second half of a work-week still owed to the next year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSplit {
    pub week_number: u32,
    pub remaining_days: i64,
}

/// Cursor and counters of one generation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorState {
    pub cursor: NaiveDate,
    /// Next week number to assign
    pub week_counter: u32,
    /// 1 while a split work-week waits for its second part, otherwise 0
    pub overlap_part_counter: u8,
    /// Steps that emitted a segment without finishing a work-week
    pub no_increment_counter: u32,
    pub pending_split: Option<PendingSplit>,
    pub initial_year_passed: bool,
}

impl GeneratorState {
    pub fn new(interval: &ApprenticeshipInterval) -> Self {
        Self {
            cursor: interval.start_date(),
            week_counter: 1,
            overlap_part_counter: 0,
            no_increment_counter: 0,
            pending_split: None,
            initial_year_passed: false,
        }
    }

    /// Week segments emitted so far
    pub fn week_segments_emitted(&self) -> u32 {
        self.week_counter - 1 + self.no_increment_counter
    }

    /// Position the cursor on the first day of a new year segment
    pub fn enter_year(self, year: &YearSegment) -> Self {
        Self {
            cursor: year.start,
            initial_year_passed: self.initial_year_passed || year.index > 1,
            ..self
        }
    }
}

/// Outcome of a single week step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekStep {
    pub segment: WeekSegment,
    pub state: GeneratorState,
    /// No further week of this year segment follows
    pub year_finished: bool,
}

/// Emit the work-week at the cursor and advance the state by one step
pub fn next_week(
    interval: &ApprenticeshipInterval,
    year: &YearSegment,
    state: GeneratorState,
) -> Result<WeekStep> {
    let work_days = interval.work_days();
    let cursor = state.cursor;
    let increment_days = period_calculator::day_offset(cursor.weekday(), Weekday::Mon);
    let mut next = state;

    let segment = match state.pending_split {
        Some(pending) if state.initial_year_passed && cursor == year.start => {
            let natural_end = period_calculator::shift_days(cursor, pending.remaining_days - 1)?;
            next.pending_split = None;
            next.overlap_part_counter = 0;
            WeekSegment {
                week_number: pending.week_number,
                start: cursor,
                end: natural_end.min(year.last_day()?),
                part: PartNumber::Second,
                single_day: false,
            }
        }
        _ if period_calculator::crosses_year_boundary(
            cursor,
            work_days,
            year.end,
            interval.end_date(),
        ) =>
        {
            let first = WeekSegment {
                week_number: state.week_counter,
                start: cursor,
                end: year.last_day()?,
                part: PartNumber::First,
                single_day: false,
            };
            debug!(
                week = state.week_counter,
                boundary = %year.end,
                "Work-week crosses the year boundary, splitting"
            );
            next.pending_split = Some(PendingSplit {
                week_number: state.week_counter,
                remaining_days: work_days.days() - first.days(),
            });
            next.overlap_part_counter = 1;
            first
        }
        _ => {
            let natural_end = period_calculator::shift_days(cursor, work_days.days() - 1)?;
            WeekSegment {
                week_number: state.week_counter,
                start: cursor,
                end: natural_end.min(year.last_day()?),
                part: PartNumber::Whole,
                single_day: work_days.is_single_day(),
            }
        }
    };

    let advance = period_calculator::advance_week_counter(
        cursor,
        state.week_counter,
        increment_days,
        year.end,
        interval.end_date(),
        work_days,
    );
    match advance {
        WeekAdvance::Completed(counter) => next.week_counter = counter,
        WeekAdvance::Held(counter) => {
            debug!(week = counter, "Step finished no work-week, holding week counter");
            next.week_counter = counter;
            next.no_increment_counter += 1;
        }
    }

    next.cursor = period_calculator::shift_days(cursor, increment_days)?;
    let year_finished = segment.part == PartNumber::First || next.cursor >= year.end;

    Ok(WeekStep {
        segment,
        state: next,
        year_finished,
    })
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Year(u32),
    Weeks(YearSegment),
    Done,
}

/// Lazily yields every year and week segment of an interval, in order
#[derive(Debug, Clone)]
pub struct BucketGenerator {
    interval: ApprenticeshipInterval,
    state: GeneratorState,
    phase: Phase,
}

impl BucketGenerator {
    pub fn new(interval: ApprenticeshipInterval) -> Self {
        Self {
            state: GeneratorState::new(&interval),
            interval,
            phase: Phase::Year(1),
        }
    }

    pub fn interval(&self) -> &ApprenticeshipInterval {
        &self.interval
    }

    /// Counters as of the last emitted segment
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    fn advance(&mut self) -> Result<Option<Segment>> {
        loop {
            match self.phase {
                Phase::Done => return Ok(None),
                Phase::Year(index) if index > self.interval.year_count() => {
                    self.phase = Phase::Done;
                }
                Phase::Year(index) => {
                    let year = YearSegment::for_index(&self.interval, index)?;
                    self.state = self.state.enter_year(&year);
                    self.phase = Phase::Weeks(year);
                    return Ok(Some(Segment::Year(year)));
                }
                Phase::Weeks(year) if self.state.cursor >= year.end => {
                    self.phase = Phase::Year(year.index + 1);
                }
                Phase::Weeks(year) => {
                    let step = next_week(&self.interval, &year, self.state)?;
                    self.state = step.state;
                    if step.year_finished {
                        self.phase = Phase::Year(year.index + 1);
                    }
                    return Ok(Some(Segment::Week(step.segment)));
                }
            }
        }
    }
}

impl Iterator for BucketGenerator {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(segment) => segment.map(Ok),
            Err(error) => {
                self.phase = Phase::Done;
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interval::{DurationYears, StartDate, WorkDaysPerWeek};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(start: NaiveDate, years: f64, work_days: u8) -> ApprenticeshipInterval {
        ApprenticeshipInterval::new(
            StartDate::try_new(start).unwrap(),
            DurationYears::try_new(years).unwrap(),
            WorkDaysPerWeek::try_new(work_days).unwrap(),
        )
        .unwrap()
    }

    fn collect(interval: ApprenticeshipInterval) -> (Vec<YearSegment>, Vec<WeekSegment>) {
        let mut years = Vec::new();
        let mut weeks = Vec::new();
        for segment in BucketGenerator::new(interval) {
            match segment.unwrap() {
                Segment::Year(year) => years.push(year),
                Segment::Week(week) => weeks.push(week),
            }
        }
        (years, weeks)
    }

    #[test]
    fn test_first_week_starts_at_cursor_and_spans_work_days() {
        let (years, weeks) = collect(interval(date(2023, 9, 1), 1.0, 5));

        assert_eq!(years.len(), 1);
        assert_eq!(years[0].start, date(2023, 9, 1));
        assert_eq!(years[0].last_day().unwrap(), date(2024, 8, 31));

        assert_eq!(weeks[0].label(), "2023-09-01 .. 2023-09-05, Week 1");
        assert_eq!(weeks[1].label(), "2023-09-04 .. 2023-09-08, Week 2");
    }

    #[test]
    fn test_single_step_advances_to_monday() {
        let interval = interval(date(2023, 9, 1), 1.0, 5);
        let year = YearSegment::for_index(&interval, 1).unwrap();
        let state = GeneratorState::new(&interval).enter_year(&year);

        let step = next_week(&interval, &year, state).unwrap();

        assert_eq!(step.state.cursor, date(2023, 9, 4));
        assert_eq!(step.state.week_counter, 2);
        assert_eq!(step.state.no_increment_counter, 0);
        assert!(!step.year_finished);
    }

    #[test]
    fn test_fractional_duration_produces_partial_last_year() {
        let (years, weeks) = collect(interval(date(2023, 1, 1), 2.5, 7));

        assert_eq!(years.len(), 3);
        assert_eq!(years[2].start, date(2025, 1, 1));
        assert_eq!(years[2].end, date(2025, 7, 1));

        let last = weeks.last().unwrap();
        assert_eq!(last.end, date(2025, 6, 30));
        assert!(weeks.iter().all(|week| week.end < date(2025, 7, 1)));
    }

    #[test]
    fn test_mid_week_boundary_splits_into_two_parts() {
        // Year 2 starts on Wednesday 2024-09-04; the Monday work-week before it splits.
        let (_, weeks) = collect(interval(date(2023, 9, 4), 2.0, 5));

        let split: Vec<_> = weeks.iter().filter(|week| week.part.is_split()).collect();
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].week_number, split[1].week_number);
        assert_eq!(split[0].part, PartNumber::First);
        assert_eq!(split[0].start, date(2024, 9, 2));
        assert_eq!(split[0].end, date(2024, 9, 3));
        assert_eq!(split[1].part, PartNumber::Second);
        assert_eq!(split[1].start, date(2024, 9, 4));
        assert_eq!(split[1].end, date(2024, 9, 6));
        assert_eq!(split[0].days() + split[1].days(), 5);
    }

    #[test]
    fn test_week_after_split_takes_next_number() {
        let (_, weeks) = collect(interval(date(2023, 9, 4), 2.0, 5));

        let second_part = weeks
            .iter()
            .position(|week| week.part == PartNumber::Second)
            .unwrap();
        let after = weeks[second_part + 1];
        assert_eq!(after.week_number, weeks[second_part].week_number + 1);
        assert_eq!(after.start, date(2024, 9, 9));
    }

    #[test]
    fn test_monday_boundary_never_splits() {
        // Year 2 starts on Monday 2024-01-01; full weeks end the Sunday before.
        let (_, weeks) = collect(interval(date(2023, 1, 1), 1.5, 7));
        assert!(weeks.iter().all(|week| !week.part.is_split()));
    }

    #[test]
    fn test_terminal_year_clips_instead_of_splitting() {
        // Last day is Wednesday 2025-09-03: the final work-week is cut to Mon..Wed.
        let (_, weeks) = collect(interval(date(2023, 9, 4), 2.0, 5));

        let last = weeks.last().unwrap();
        assert_eq!(last.part, PartNumber::Whole);
        assert_eq!(last.start, date(2025, 9, 1));
        assert_eq!(last.end, date(2025, 9, 3));
    }

    #[test]
    fn test_split_step_holds_counter() {
        let interval = interval(date(2023, 9, 4), 2.0, 5);
        let year = YearSegment::for_index(&interval, 1).unwrap();
        let state = GeneratorState {
            cursor: date(2024, 9, 2),
            week_counter: 53,
            ..GeneratorState::new(&interval)
        };

        let step = next_week(&interval, &year, state).unwrap();

        assert_eq!(step.segment.part, PartNumber::First);
        assert_eq!(step.state.week_counter, 53);
        assert_eq!(step.state.no_increment_counter, 1);
        assert_eq!(step.state.overlap_part_counter, 1);
        assert_eq!(
            step.state.pending_split,
            Some(PendingSplit {
                week_number: 53,
                remaining_days: 3
            })
        );
        assert!(step.year_finished);
    }

    #[test]
    fn test_counters_account_for_every_week_segment() {
        let mut generator = BucketGenerator::new(interval(date(2023, 9, 4), 3.0, 5));
        let weeks = generator
            .by_ref()
            .filter(|segment| matches!(segment, Ok(Segment::Week(_))))
            .count();

        assert_eq!(generator.state().week_segments_emitted() as usize, weeks);
        assert_eq!(generator.state().overlap_part_counter, 0);
        assert!(generator.state().pending_split.is_none());
    }
}
