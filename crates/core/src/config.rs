//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the editor
//! session. Nothing in this crate reads environment variables; the binary does
//! that and hands the raw values to the helpers below.

use crate::constants::{DEFAULT_DEPARTMENT, DEFAULT_HOSPITAL_TITLE};
use crate::{PrescriptionError, PrescriptionResult};
use ivrx_types::NonEmptyText;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    hospital_title: String,
    default_department: String,
    catalog_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PrescriptionError::InvalidInput` if the title or department is blank.
    pub fn new(
        hospital_title: &str,
        default_department: &str,
        catalog_path: Option<PathBuf>,
    ) -> PrescriptionResult<Self> {
        let hospital_title = NonEmptyText::new(hospital_title).map_err(|_| {
            PrescriptionError::InvalidInput("hospital_title cannot be empty".into())
        })?;
        let default_department = NonEmptyText::new(default_department).map_err(|_| {
            PrescriptionError::InvalidInput("default_department cannot be empty".into())
        })?;

        Ok(Self {
            hospital_title: hospital_title.to_string(),
            default_department: default_department.to_string(),
            catalog_path,
        })
    }

    pub fn hospital_title(&self) -> &str {
        &self.hospital_title
    }

    pub fn default_department(&self) -> &str {
        &self.default_department
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            hospital_title: DEFAULT_HOSPITAL_TITLE.to_string(),
            default_department: DEFAULT_DEPARTMENT.to_string(),
            catalog_path: None,
        }
    }
}

/// Resolve a core configuration from optional raw values (typically environment
/// variables read by the binary).
///
/// Missing or whitespace-only values fall back to the built-in defaults.
pub fn core_config_from_env_values(
    hospital_title: Option<String>,
    default_department: Option<String>,
    catalog_path: Option<String>,
) -> PrescriptionResult<CoreConfig> {
    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    let title = non_blank(hospital_title).unwrap_or_else(|| DEFAULT_HOSPITAL_TITLE.into());
    let department = non_blank(default_department).unwrap_or_else(|| DEFAULT_DEPARTMENT.into());
    let catalog_path = non_blank(catalog_path).map(PathBuf::from);

    CoreConfig::new(&title, &department, catalog_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_blank_title() {
        let err = CoreConfig::new("  ", DEFAULT_DEPARTMENT, None).expect_err("blank title");
        assert!(matches!(err, PrescriptionError::InvalidInput(msg) if msg.contains("hospital_title")));
    }

    #[test]
    fn test_new_rejects_blank_department() {
        let err = CoreConfig::new("处方签", "", None).expect_err("blank department");
        assert!(
            matches!(err, PrescriptionError::InvalidInput(msg) if msg.contains("default_department"))
        );
    }

    #[test]
    fn test_env_values_fall_back_to_defaults() {
        let cfg = core_config_from_env_values(None, Some("   ".into()), Some("".into()))
            .expect("defaults should be valid");
        assert_eq!(cfg.hospital_title(), DEFAULT_HOSPITAL_TITLE);
        assert_eq!(cfg.default_department(), DEFAULT_DEPARTMENT);
        assert!(cfg.catalog_path().is_none());
    }

    #[test]
    fn test_env_values_override_defaults() {
        let cfg = core_config_from_env_values(
            Some(" 荣县佛都医院处方签 ".into()),
            Some("内科".into()),
            Some("/etc/ivrx/catalog.yaml".into()),
        )
        .expect("explicit values should be valid");
        assert_eq!(cfg.hospital_title(), "荣县佛都医院处方签");
        assert_eq!(cfg.default_department(), "内科");
        assert_eq!(
            cfg.catalog_path(),
            Some(Path::new("/etc/ivrx/catalog.yaml"))
        );
    }

    #[test]
    fn test_default_matches_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.hospital_title(), DEFAULT_HOSPITAL_TITLE);
        assert_eq!(cfg.default_department(), DEFAULT_DEPARTMENT);
    }
}
