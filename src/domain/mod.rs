//! Domain types and calendar logic for the report tree
//!
//! This module contains the pure part of the system: validated interval
//! parameters, the period calculator and the bucket generator. Nothing in
//! here performs IO.

pub mod bucket_generator;
pub mod config_types;
pub mod interval;
pub mod period_calculator;
pub mod segments;
pub mod validation_constants;

pub use bucket_generator::{BucketGenerator, GeneratorState};
pub use interval::{ApprenticeshipInterval, DurationYears, OutputRoot, StartDate, WorkDaysPerWeek};
pub use segments::{PartNumber, Segment, WeekSegment, YearSegment};
