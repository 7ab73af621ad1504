//! Constants used throughout the ivrx core crate.
//!
//! Defaults for a blank prescription and the fixed strings of the printed form
//! live here so the editor, projector and renderer agree on them.

/// Department prefilled on a blank prescription when none is configured.
pub const DEFAULT_DEPARTMENT: &str = "中西医结合科/中医科";

/// Title printed at the top of the page when none is configured.
pub const DEFAULT_HOSPITAL_TITLE: &str = "注射处方签";

/// Drip rate of the standard dose method, in drops per minute.
pub const STANDARD_DRIP_RATE: u32 = 30;

/// Duration of the standard dose method, in days.
pub const STANDARD_DAYS: u32 = 1;

/// Unit prefilled for the per-dose amount.
pub const DEFAULT_DOSE_UNIT: &str = "ml";

/// Per-dose units offered by the form. The field itself accepts any text.
pub const DOSE_UNITS: [&str; 5] = ["ml", "l", "g", "kg", "万"];

/// Fixed unit of the drip rate.
pub const RATE_UNIT: &str = "滴/分";

/// Suffix printed after the duration.
pub const DAYS_SUFFIX: &str = "天";

/// Prefix printed before the per-dose amount.
pub const PER_DOSE_PREFIX: &str = "每次";

/// Full-width comma joining diagnosis texts.
pub const DIAGNOSIS_SEPARATOR: &str = "，";

/// `yyyy-MM-dd`.
pub const ISSUE_DATE_FORMAT: &str = "%Y-%m-%d";
