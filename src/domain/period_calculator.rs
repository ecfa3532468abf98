//! Calendar arithmetic behind the report tree
//!
//! Stateless functions: end-date computation, week-end-day lookup,
//! weekday offsets and the week-counter advance decision. Nothing here
//! touches the filesystem or keeps state between calls.

use crate::domain::interval::{DurationYears, WorkDaysPerWeek};
use crate::domain::validation_constants::{duration, work_days};
use crate::error::{Error, Result};
use chrono::{Months, NaiveDate, TimeDelta, Weekday};

/// End of the apprenticeship: whole years first, then six months for a half year
pub fn end_date(start: NaiveDate, duration: DurationYears) -> Result<NaiveDate> {
    let end = add_years(start, duration.whole_years())?;
    if duration.has_half_year() {
        add_months(end, duration::HALF_YEAR_MONTHS)
    } else {
        Ok(end)
    }
}

/// Calendar years added to a date; Feb 29 lands on Feb 28 in common years
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    add_months(date, years.saturating_mul(12))
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| Error::date_out_of_range(date, format!("{months} months")))
}

/// Date shifted by a signed number of days
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| Error::date_out_of_range(date, format!("{days} days")))
}

/// Last working day of a work-week that starts on Monday
///
/// `1` maps to Monday, `7` to Sunday.
pub fn week_end_day(work_days: WorkDaysPerWeek) -> Weekday {
    (1..work_days.into_inner()).fold(Weekday::Mon, |day, _| day.succ())
}

/// Days to move forward from `current` until `desired` is reached
///
/// Always in `1..=7`: reaching the same weekday again counts as a full cycle.
pub fn day_offset(current: Weekday, desired: Weekday) -> i64 {
    let current = i64::from(current.num_days_from_monday());
    let desired = i64::from(desired.num_days_from_monday());
    let offset = (work_days::DAYS_PER_CYCLE - current + desired) % work_days::DAYS_PER_CYCLE;
    if offset == 0 {
        work_days::DAYS_PER_CYCLE
    } else {
        offset
    }
}

/// Whether the work-week starting at `cursor` runs into `year_boundary`
///
/// True when the boundary falls strictly after the cursor and no later than
/// the work-week's last day, and the boundary is not the end of the whole
/// interval: the terminal year never splits, it is clipped instead.
pub fn crosses_year_boundary(
    cursor: NaiveDate,
    work_days: WorkDaysPerWeek,
    year_boundary: NaiveDate,
    interval_end: NaiveDate,
) -> bool {
    let days_to_boundary = (year_boundary - cursor).num_days();
    !work_days.is_single_day()
        && year_boundary < interval_end
        && days_to_boundary > 0
        && days_to_boundary < work_days.days()
}

/// Result of a week-counter advance decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekAdvance {
    /// The step finished a work-week; carries the next week number
    Completed(u32),
    /// The step only consumed part of a work-week split at a year boundary
    Held(u32),
}

impl WeekAdvance {
    pub fn week_counter(self) -> u32 {
        match self {
            Self::Completed(counter) | Self::Held(counter) => counter,
        }
    }

    pub fn is_held(self) -> bool {
        matches!(self, Self::Held(_))
    }
}

/// Decide whether moving the cursor by `increment_days` finishes a work-week
pub fn advance_week_counter(
    cursor: NaiveDate,
    week_counter: u32,
    increment_days: i64,
    year_boundary: NaiveDate,
    interval_end: NaiveDate,
    work_days: WorkDaysPerWeek,
) -> WeekAdvance {
    let completed = WeekAdvance::Completed(week_counter.saturating_add(1));

    if work_days.is_single_day() {
        return completed;
    }

    let reaches_boundary = (year_boundary - cursor).num_days() <= increment_days;
    if reaches_boundary && crosses_year_boundary(cursor, work_days, year_boundary, interval_end)
    {
        // The work-week continues as part 2 in the next year.
        return WeekAdvance::Held(week_counter);
    }

    completed
}
