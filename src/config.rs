use crate::domain::config_types::{LogFormat, LogLevel};
use crate::domain::interval::{
    ApprenticeshipInterval, DurationYears, OutputRoot, StartDate, WorkDaysPerWeek,
};
use crate::infrastructure::filesystem::TemplateSource;
use config::{Config, Environment, File};
pub use config::ConfigError;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming an extra configuration file
pub const CONFIG_FILE_ENV: &str = "REPORT_TREE_CONFIG";

/// Prefix of environment variable overrides, e.g. `REPORT_TREE__INTERVAL__START_DATE`
pub const ENV_PREFIX: &str = "REPORT_TREE";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub interval: IntervalSettings,
    pub output: OutputSettings,
    pub templates: TemplateSettings,
    pub logging: LoggingSettings,
}

/// Raw interval parameters, validated by [`Settings::interval`]
#[derive(Debug, Deserialize, Clone)]
pub struct IntervalSettings {
    pub start_date: String,
    pub duration_years: String,
    pub work_days_per_week: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub root_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSettings {
    pub dir: PathBuf,
    pub create_if_missing: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let extra_file = env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
        Self::load(extra_file.as_deref())
    }

    /// Layered load: defaults, `config/default`, `config/local`, an optional
    /// extra file, then environment variables
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Start with default values
            .set_default("interval.work_days_per_week", "5")?
            .set_default("output.root_dir", ".")?
            .set_default("templates.dir", "template")?
            .set_default("templates.create_if_missing", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            // Add configuration files if they exist
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Validated apprenticeship interval
    pub fn interval(&self) -> crate::Result<ApprenticeshipInterval> {
        ApprenticeshipInterval::new(
            StartDate::parse(&self.interval.start_date)?,
            DurationYears::parse(&self.interval.duration_years)?,
            WorkDaysPerWeek::parse(&self.interval.work_days_per_week)?,
        )
    }

    pub fn output_root(&self) -> crate::Result<OutputRoot> {
        OutputRoot::try_new(&self.output.root_dir)
    }

    pub fn template_source(&self) -> TemplateSource {
        TemplateSource::new(&self.templates.dir, self.templates.create_if_missing)
    }
}
