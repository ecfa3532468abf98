//! Validation constants for domain types
//!
//! This module centralizes all validation constants, limits, and magic numbers
//! used throughout the domain layer to ensure consistency and maintainability.

/// Apprenticeship duration limits
pub mod duration {
    /// Shortest supported apprenticeship in years
    pub const MIN_YEARS: f64 = 1.0;

    /// Longest supported apprenticeship in years
    pub const MAX_YEARS: f64 = 10.0;

    /// The only non-zero fractional part a duration may carry
    pub const HALF_YEAR: f64 = 0.5;

    /// Months added to the end date for a half year
    pub const HALF_YEAR_MONTHS: u32 = 6;
}

/// Work-week length limits
pub mod work_days {
    /// At least one working day per week
    pub const MIN: u8 = 1;

    /// At most a full calendar week
    pub const MAX: u8 = 7;

    /// Length of the weekly cycle the cursor is aligned to
    pub const DAYS_PER_CYCLE: i64 = 7;
}

/// Start date limits
pub mod start_date {
    /// How far from today (in years, both directions) a start date may lie
    pub const MAX_YEARS_FROM_TODAY: u32 = 100;

    /// Accepted input formats, tried in order
    pub const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

    /// Format used in directory labels
    pub const LABEL_FORMAT: &str = "%Y-%m-%d";
}

/// Template document limits
pub mod templates {
    /// Extensions (lower case, without dot) a template may carry
    pub const ALLOWED_EXTENSIONS: &[&str] = &[
        "doc", "docx", "pdf", "txt", "ppt", "pptx", "htm", "html", "xls", "xlsx",
    ];
}

/// Directory label fragments
pub mod labels {
    /// Prefix of every year directory
    pub const YEAR_PREFIX: &str = "Apprenticeship Year";

    /// Word preceding the week number
    pub const WEEK: &str = "Week";

    /// Word preceding the part number of a split week
    pub const PART: &str = "Part";

    /// Separator between the two dates of a range
    pub const RANGE_SEPARATOR: &str = " .. ";

    /// Separator between label fields
    pub const FIELD_SEPARATOR: &str = ", ";
}
