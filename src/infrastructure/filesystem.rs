//! Filesystem collaborators of the generator
//!
//! Directory creation, template discovery and template copying. All
//! operations are idempotent: existing directories and files are reported
//! and skipped, never overwritten.

use crate::domain::segments::is_open_first_part;
use crate::domain::validation_constants::templates::ALLOWED_EXTENSIONS;
use crate::error::{Error, Result};
use crate::infrastructure::log_messages::{directories, templates as template_log};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{error, info, warn};

/// What `ensure_directory` found or did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryOutcome {
    Created,
    AlreadyExists,
}

/// Creates the directories of the report tree
pub trait DirectoryMaterializer {
    /// Create `path` unless it already exists
    fn ensure_directory(&self, path: &Path) -> Result<DirectoryOutcome>;

    /// Name of the most recently modified subdirectory of `dir`, if any
    fn latest_subdirectory(&self, dir: &Path) -> Result<Option<String>>;
}

/// [`DirectoryMaterializer`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMaterializer;

impl DirectoryMaterializer for FsMaterializer {
    fn ensure_directory(&self, path: &Path) -> Result<DirectoryOutcome> {
        if path.is_dir() {
            info!(path = %path.display(), "{}", directories::ALREADY_EXISTS);
            return Ok(DirectoryOutcome::AlreadyExists);
        }

        fs::create_dir_all(path).map_err(|source| {
            error!(path = %path.display(), %source, "{}", directories::CREATION_FAILED);
            Error::DirectoryCreation {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(path = %path.display(), "{}", directories::CREATED);
        Ok(DirectoryOutcome::Created)
    }

    fn latest_subdirectory(&self, dir: &Path) -> Result<Option<String>> {
        let read_error = |source: std::io::Error| Error::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut latest: Option<(SystemTime, String)> = None;
        for entry in fs::read_dir(dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let metadata = entry.metadata().map_err(read_error)?;
            if !metadata.is_dir() {
                continue;
            }
            let modified = metadata.modified().map_err(read_error)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let newer = match &latest {
                None => true,
                Some((time, current)) => (modified, &name) > (*time, current),
            };
            if newer {
                latest = Some((modified, name));
            }
        }
        Ok(latest.map(|(_, name)| name))
    }
}

/// Where a previous, possibly interrupted run stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    pub year_index: u32,
    pub latest_week: String,
    /// The latest week directory is the first half of a split work-week
    pub open_split: bool,
}

/// Find the latest week directory of the highest existing year directory
pub fn detect_resume_point<M: DirectoryMaterializer>(
    materializer: &M,
    year_dirs: impl IntoIterator<Item = (u32, PathBuf)>,
) -> Result<Option<ResumePoint>> {
    let mut existing: Vec<_> = year_dirs
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .collect();
    existing.sort_by_key(|(index, _)| *index);

    while let Some((year_index, path)) = existing.pop() {
        if let Some(latest_week) = materializer.latest_subdirectory(&path)? {
            return Ok(Some(ResumePoint {
                year_index,
                open_split: is_open_first_part(&latest_week),
                latest_week,
            }));
        }
    }
    Ok(None)
}

/// Lists template documents with a supported extension
#[derive(Debug, Clone)]
pub struct TemplateSource {
    dir: PathBuf,
    create_if_missing: bool,
}

impl TemplateSource {
    pub fn new(dir: impl Into<PathBuf>, create_if_missing: bool) -> Self {
        Self {
            dir: dir.into(),
            create_if_missing,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Template files sorted by name; an empty result is an error
    pub fn list_templates(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() && self.create_if_missing {
            warn!(path = %self.dir.display(), "{}", template_log::DIRECTORY_MISSING);
            fs::create_dir_all(&self.dir).map_err(|source| Error::DirectoryCreation {
                path: self.dir.clone(),
                source,
            })?;
        }

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(self.no_templates());
            }
            Err(source) => {
                return Err(Error::DirectoryRead {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| Error::DirectoryRead {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if path.is_file() && has_allowed_extension(&path) {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(self.no_templates());
        }
        info!(count = files.len(), path = %self.dir.display(), "{}", template_log::FOUND);
        Ok(files)
    }

    fn no_templates(&self) -> Error {
        error!(path = %self.dir.display(), "{}", template_log::NONE_FOUND);
        Error::NoTemplates {
            dir: self.dir.clone(),
        }
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Files copied and skipped for one week directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped: usize,
}

/// Copies templates into week directories, named after the directory
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCopier;

impl FileCopier {
    /// Destination of each template inside `week_dir`
    ///
    /// The first template with a given extension is named after the week
    /// directory; further ones get a ` (n)` suffix, counting from 2.
    pub fn destinations(&self, templates: &[PathBuf], week_dir: &Path) -> Vec<PathBuf> {
        let base = week_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut seen: HashMap<String, usize> = HashMap::new();

        templates
            .iter()
            .map(|template| {
                let ext = template
                    .extension()
                    .map(|ext| ext.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let count = seen.entry(ext.to_lowercase()).or_insert(0);
                *count += 1;
                let stem = if *count == 1 {
                    base.clone()
                } else {
                    format!("{base} ({count})")
                };
                week_dir.join(format!("{stem}.{ext}"))
            })
            .collect()
    }

    pub fn copy_templates(&self, templates: &[PathBuf], week_dir: &Path) -> Result<CopyReport> {
        let mut report = CopyReport::default();

        for (template, destination) in templates.iter().zip(self.destinations(templates, week_dir))
        {
            if destination.exists() {
                info!(path = %destination.display(), "{}", template_log::SKIPPED);
                report.skipped += 1;
                continue;
            }

            fs::copy(template, &destination).map_err(|source| {
                error!(
                    from = %template.display(),
                    to = %destination.display(),
                    %source,
                    "{}",
                    template_log::COPY_FAILED
                );
                Error::FileCopy {
                    from: template.clone(),
                    to: destination.clone(),
                    source,
                }
            })?;
            info!(
                from = %template.display(),
                to = %destination.display(),
                "{}",
                template_log::COPIED
            );
            report.copied += 1;
        }

        Ok(report)
    }
}
