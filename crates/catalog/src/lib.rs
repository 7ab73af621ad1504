//! Medicine catalog and canned-diagnosis reference data.
//!
//! This crate provides the read-only lists that feed the prescription editor's
//! selection fields:
//! - medicines, each offered as a composite `"<name>-<specification>"` reference
//! - canned prescriptions (predefined diagnosis texts)
//!
//! Both lists are grouped by their "system" tag (medical department or category).
//! Where the entries come from is abstracted behind [`CatalogSource`]; a strict
//! YAML file source is included. Loading degrades to empty lists on any source
//! failure so the editor never sees a catalog error.

pub mod catalog;
pub mod source;

pub use catalog::{Catalog, CatalogLoader, CannedPrescriptionGroup, MedicineGroup};
pub use source::{
    CannedPrescription, CatalogEntries, CatalogSource, MedicineEntry, StaticCatalogSource,
    YamlCatalogSource,
};

/// Errors returned by catalog sources.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}", path = path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("translation error: {0}")]
    Translation(String),

    /// A remote or host-provided source could not be reached.
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;
