//! Apprenticeship interval parameters
//!
//! Raw parameter values are validated once at the boundary into newtypes,
//! so the calendar algorithms downstream never see an out-of-range value.

use crate::domain::period_calculator;
use crate::domain::validation_constants::{duration, start_date, work_days};
use crate::error::{Error, Result};
use chrono::{Datelike, Local, Months, NaiveDate, Weekday};
use nutype::nutype;
#[allow(unused_imports)] // These are used by nutype derive macros
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Apprenticeship duration in years: a multiple of half a year in `[1, 10]`
#[nutype(
    validate(predicate = is_supported_duration),
    derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)
)]
pub struct DurationYears(f64);

fn is_supported_duration(years: &f64) -> bool {
    let fraction = years.fract();
    years.is_finite()
        && (duration::MIN_YEARS..=duration::MAX_YEARS).contains(years)
        && (fraction == 0.0 || fraction == duration::HALF_YEAR)
}

impl DurationYears {
    /// Parse user input, accepting `,` as well as `.` as decimal separator
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().replace(',', ".");
        let years: f64 = normalized.parse().map_err(|_| {
            Error::invalid_input("duration_years", format!("[{input}] is not a number"))
        })?;
        Self::try_new(years).map_err(|_| {
            Error::invalid_input(
                "duration_years",
                format!(
                    "[{input}] must be between {} and {} years in steps of half a year",
                    duration::MIN_YEARS,
                    duration::MAX_YEARS
                ),
            )
        })
    }

    /// Whole years of the duration
    pub fn whole_years(&self) -> u32 {
        // Validation bounds the value to [1, 10], so the cast is lossless.
        self.into_inner().trunc() as u32
    }

    /// Whether the duration carries an extra half year
    pub fn has_half_year(&self) -> bool {
        self.into_inner().fract() == duration::HALF_YEAR
    }

    /// Number of (possibly partial) apprenticeship years
    pub fn year_count(&self) -> u32 {
        self.whole_years() + u32::from(self.has_half_year())
    }
}

/// Number of consecutive calendar days a work-week spans
#[nutype(
    validate(greater_or_equal = 1, less_or_equal = 7),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        Display
    )
)]
pub struct WorkDaysPerWeek(u8);

impl WorkDaysPerWeek {
    /// Parse user input
    pub fn parse(input: &str) -> Result<Self> {
        let days: u8 = input.trim().parse().map_err(|_| {
            Error::invalid_input("work_days_per_week", format!("[{input}] is not a whole number"))
        })?;
        Self::try_new(days).map_err(|_| {
            Error::invalid_input(
                "work_days_per_week",
                format!("[{input}] must be between {} and {}", work_days::MIN, work_days::MAX),
            )
        })
    }

    /// Length of the work-week in days
    pub fn days(&self) -> i64 {
        i64::from(self.into_inner())
    }

    /// A one-day work-week is labelled with a bare date and never splits
    pub fn is_single_day(&self) -> bool {
        self.into_inner() == work_days::MIN
    }

    /// The weekday a Monday-started work-week of this length ends on
    pub fn last_weekday(&self) -> Weekday {
        period_calculator::week_end_day(*self)
    }
}

/// First day of the apprenticeship, at most 100 years away from today
#[nutype(
    validate(predicate = is_supported_start_date),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        Display
    )
)]
pub struct StartDate(NaiveDate);

fn is_supported_start_date(date: &NaiveDate) -> bool {
    let today = Local::now().date_naive();
    let span = Months::new(12 * start_date::MAX_YEARS_FROM_TODAY);
    match (today.checked_sub_months(span), today.checked_add_months(span)) {
        (Some(earliest), Some(latest)) => *date > earliest && *date < latest,
        _ => false,
    }
}

impl StartDate {
    /// Parse user input in any of the accepted date formats
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let date = start_date::ACCEPTED_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .ok_or_else(|| {
                Error::invalid_input(
                    "start_date",
                    format!("[{input}] is not a date, use YYYY-MM-DD or an equivalent"),
                )
            })?;
        Self::try_new(date).map_err(|_| {
            Error::invalid_input(
                "start_date",
                format!(
                    "[{input}] lies more than {} years in the past or future",
                    start_date::MAX_YEARS_FROM_TODAY
                ),
            )
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.into_inner()
    }
}

/// Existing directory the report tree is written into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRoot(PathBuf);

impl OutputRoot {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.is_dir() {
            Ok(Self(path))
        } else {
            Err(Error::invalid_input(
                "output_root",
                format!("[{}] is not an existing directory", path.display()),
            ))
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// The full period being bucketed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApprenticeshipInterval {
    start_date: NaiveDate,
    duration: DurationYears,
    work_days: WorkDaysPerWeek,
    end_date: NaiveDate,
}

impl ApprenticeshipInterval {
    pub fn new(
        start_date: StartDate,
        duration: DurationYears,
        work_days: WorkDaysPerWeek,
    ) -> Result<Self> {
        let start_date = start_date.date();
        let end_date = period_calculator::end_date(start_date, duration)?;
        Ok(Self {
            start_date,
            duration,
            work_days,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn duration(&self) -> DurationYears {
        self.duration
    }

    pub fn work_days(&self) -> WorkDaysPerWeek {
        self.work_days
    }

    /// Exclusive end of the interval
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of year segments, `ceil(duration)`
    pub fn year_count(&self) -> u32 {
        self.duration.year_count()
    }

    /// Start of the given 1-based apprenticeship year
    pub fn year_start(&self, index: u32) -> Result<NaiveDate> {
        period_calculator::add_years(self.start_date, index.saturating_sub(1))
    }

    /// Whether the interval starts on a Monday, i.e. is already phase-aligned
    pub fn starts_on_monday(&self) -> bool {
        self.start_date.weekday() == Weekday::Mon
    }
}
