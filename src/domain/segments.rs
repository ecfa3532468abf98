//! Year and week segments and their directory labels

use crate::domain::interval::ApprenticeshipInterval;
use crate::domain::period_calculator;
use crate::domain::validation_constants::{labels, start_date};
use crate::error::Result;
use chrono::NaiveDate;
use derive_more::Display;
use std::fmt;

/// One apprenticeship year, half-open `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSegment {
    pub index: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl YearSegment {
    /// Segment for the 1-based `index`, clipped to the interval end
    pub fn for_index(interval: &ApprenticeshipInterval, index: u32) -> Result<Self> {
        let start = interval.year_start(index)?;
        let next_start = period_calculator::add_years(interval.start_date(), index)?;
        Ok(Self {
            index,
            start,
            end: next_start.min(interval.end_date()),
        })
    }

    /// Last calendar day belonging to the segment
    pub fn last_day(&self) -> Result<NaiveDate> {
        period_calculator::shift_days(self.end, -1)
    }

    /// The terminal segment ends with the interval and never splits a week
    pub fn is_terminal(&self, interval: &ApprenticeshipInterval) -> bool {
        self.end >= interval.end_date()
    }

    pub fn label(&self) -> String {
        year_label(self.index)
    }
}

/// Directory name of the 1-based apprenticeship year
pub fn year_label(index: u32) -> String {
    format!("{} {}", labels::YEAR_PREFIX, index)
}

/// Which part of a boundary-split work-week a segment is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PartNumber {
    #[display("0")]
    Whole,
    #[display("1")]
    First,
    #[display("2")]
    Second,
}

impl PartNumber {
    pub fn number(self) -> u8 {
        match self {
            Self::Whole => 0,
            Self::First => 1,
            Self::Second => 2,
        }
    }

    pub fn is_split(self) -> bool {
        self != Self::Whole
    }
}

/// One work-week's directory within a year segment; dates are inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSegment {
    pub week_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub part: PartNumber,
    pub single_day: bool,
}

impl WeekSegment {
    /// Calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WeekSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start.format(start_date::LABEL_FORMAT))?;
        if !self.single_day {
            write!(
                f,
                "{}{}",
                labels::RANGE_SEPARATOR,
                self.end.format(start_date::LABEL_FORMAT)
            )?;
        }
        write!(
            f,
            "{}{} {}",
            labels::FIELD_SEPARATOR,
            labels::WEEK,
            self.week_number
        )?;
        if self.part.is_split() {
            write!(f, "{}{} {}", labels::FIELD_SEPARATOR, labels::PART, self.part)?;
        }
        Ok(())
    }
}

/// Whether a directory label marks the first half of a split work-week
pub fn is_open_first_part(label: &str) -> bool {
    label.ends_with(&format!("{} {}", labels::PART, PartNumber::First))
}

/// Everything the generator emits, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Year(YearSegment),
    Week(WeekSegment),
}
