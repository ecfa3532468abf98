//! Log message constants for infrastructure components
//!
//! This module centralizes all log messages used throughout the infrastructure
//! layer to ensure consistency and enable easy modification.

/// Application startup and lifecycle messages
pub mod application {
    pub const STARTING: &str = "Starting report tree generation";
    pub const FINISHED: &str = "Report tree generation finished";
    pub const INTERVAL: &str = "Apprenticeship interval resolved";
    pub const RESUMING: &str = "Existing report tree found, resuming";
    pub const SUMMARY: &str = "Run summary";
}

/// Directory materialization messages
pub mod directories {
    pub const CREATED: &str = "Directory created";
    pub const ALREADY_EXISTS: &str = "Directory already exists";
    pub const CREATION_FAILED: &str = "Directory could not be created";
}

/// Template handling messages
pub mod templates {
    pub const FOUND: &str = "Template documents found";
    pub const NONE_FOUND: &str = "No valid template document found";
    pub const DIRECTORY_MISSING: &str = "Template directory missing, creating it";
    pub const COPIED: &str = "Template copied";
    pub const SKIPPED: &str = "Template already present, skipping";
    pub const COPY_FAILED: &str = "Template could not be copied";
}

/// Configuration messages
pub mod configuration {
    pub const LOADING_CONFIG: &str = "Loading configuration";
    pub const CONFIG_LOADED: &str = "Configuration loaded successfully";
}
