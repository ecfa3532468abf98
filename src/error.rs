use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Report tree error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Directory [{}] could not be created: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory [{}] could not be read: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Template [{}] could not be copied to [{}]: {source}",
        from.display(),
        to.display()
    )]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid template document found in [{}]", dir.display())]
    NoTemplates { dir: PathBuf },

    #[error("Date out of range: {date} shifted by {amount}")]
    DateOutOfRange { date: NaiveDate, amount: String },
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn date_out_of_range(date: NaiveDate, amount: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            date,
            amount: amount.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
