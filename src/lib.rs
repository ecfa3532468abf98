//! Report tree - scaffolding for apprenticeship report books
//!
//! Partitions an apprenticeship into year and work-week segments aligned to
//! calendar Mondays, and materializes them as a directory tree seeded with
//! template documents.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{Application, RunSummary};
pub use domain::{bucket_generator, period_calculator};
pub use error::{Error, Result};
