use crate::config::Settings;
use crate::domain::bucket_generator::BucketGenerator;
use crate::domain::interval::{ApprenticeshipInterval, OutputRoot};
use crate::domain::segments::{year_label, Segment, YearSegment};
use crate::infrastructure::filesystem::{
    detect_resume_point, CopyReport, DirectoryMaterializer, DirectoryOutcome, FileCopier,
    FsMaterializer, ResumePoint, TemplateSource,
};
use crate::infrastructure::log_messages::application;
use crate::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Counts of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub years_created: usize,
    pub years_existing: usize,
    pub weeks_created: usize,
    pub weeks_existing: usize,
    pub files_copied: usize,
    pub files_skipped: usize,
    /// Week segments emitted by the generator, split halves counted separately
    pub week_segments: u32,
    /// Generator steps that did not finish a work-week
    pub no_increment_steps: u32,
    pub resumed_from: Option<ResumePoint>,
}

impl RunSummary {
    fn record_year(&mut self, outcome: DirectoryOutcome) {
        match outcome {
            DirectoryOutcome::Created => self.years_created += 1,
            DirectoryOutcome::AlreadyExists => self.years_existing += 1,
        }
    }

    fn record_week(&mut self, outcome: DirectoryOutcome, copies: CopyReport) {
        match outcome {
            DirectoryOutcome::Created => self.weeks_created += 1,
            DirectoryOutcome::AlreadyExists => self.weeks_existing += 1,
        }
        self.files_copied += copies.copied;
        self.files_skipped += copies.skipped;
    }

    /// Nothing was created or copied, everything already existed
    pub fn is_noop(&self) -> bool {
        self.years_created == 0 && self.weeks_created == 0 && self.files_copied == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Year directories created:   {:>5}", self.years_created)?;
        writeln!(f, "Week directories created:   {:>5}", self.weeks_created)?;
        writeln!(f, "Directories already present:{:>5}", self.years_existing + self.weeks_existing)?;
        writeln!(f, "Templates copied:           {:>5}", self.files_copied)?;
        write!(f, "Templates already present:  {:>5}", self.files_skipped)
    }
}

/// Main application struct that coordinates all components
pub struct Application<M = FsMaterializer> {
    interval: ApprenticeshipInterval,
    output_root: OutputRoot,
    templates: TemplateSource,
    materializer: M,
    copier: FileCopier,
}

impl Application<FsMaterializer> {
    /// Application configured from files and environment
    #[instrument]
    pub fn new() -> Result<Self> {
        let settings = Settings::new()?;
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::with_materializer(
            settings.interval()?,
            settings.output_root()?,
            settings.template_source(),
            FsMaterializer,
        ))
    }
}

impl<M: DirectoryMaterializer> Application<M> {
    pub fn with_materializer(
        interval: ApprenticeshipInterval,
        output_root: OutputRoot,
        templates: TemplateSource,
        materializer: M,
    ) -> Self {
        Self {
            interval,
            output_root,
            templates,
            materializer,
            copier: FileCopier,
        }
    }

    pub fn interval(&self) -> &ApprenticeshipInterval {
        &self.interval
    }

    pub fn output_root(&self) -> &Path {
        self.output_root.path()
    }

    /// Directory of the given year segment
    pub fn year_dir(&self, year: &YearSegment) -> PathBuf {
        self.output_root.path().join(year.label())
    }

    /// Generate the whole tree; the first failure aborts the run
    #[instrument(skip(self), fields(root = %self.output_root.path().display()))]
    pub fn run(&self) -> Result<RunSummary> {
        info!(
            start = %self.interval.start_date(),
            end = %self.interval.end_date(),
            duration_years = %self.interval.duration(),
            work_days = %self.interval.work_days(),
            week_ends_on = ?self.interval.work_days().last_weekday(),
            monday_aligned = self.interval.starts_on_monday(),
            "{}",
            application::INTERVAL
        );

        let templates = self.templates.list_templates()?;

        let mut summary = RunSummary {
            resumed_from: self.resume_point()?,
            ..RunSummary::default()
        };
        if let Some(point) = &summary.resumed_from {
            info!(
                year = point.year_index,
                latest_week = %point.latest_week,
                open_split = point.open_split,
                "{}",
                application::RESUMING
            );
        }

        let mut generator = BucketGenerator::new(self.interval);
        let mut year_dir = self.output_root.path().to_path_buf();
        for segment in generator.by_ref() {
            match segment? {
                Segment::Year(year) => {
                    year_dir = self.year_dir(&year);
                    summary.record_year(self.materializer.ensure_directory(&year_dir)?);
                }
                Segment::Week(week) => {
                    let week_dir = year_dir.join(week.label());
                    let outcome = self.materializer.ensure_directory(&week_dir)?;
                    let copies = self.copier.copy_templates(&templates, &week_dir)?;
                    summary.record_week(outcome, copies);
                }
            }
        }

        summary.week_segments = generator.state().week_segments_emitted();
        summary.no_increment_steps = generator.state().no_increment_counter;
        info!(
            years_created = summary.years_created,
            weeks_created = summary.weeks_created,
            files_copied = summary.files_copied,
            week_segments = summary.week_segments,
            "{}",
            application::FINISHED
        );
        Ok(summary)
    }

    fn resume_point(&self) -> Result<Option<ResumePoint>> {
        let year_dirs = (1..=self.interval.year_count())
            .map(|index| (index, self.output_root.path().join(year_label(index))));
        detect_resume_point(&self.materializer, year_dirs)
    }
}
