//! Catalog sources and the on-disk catalog wire model.
//!
//! A catalog file is a single YAML mapping with two lists:
//!
//! ```yaml
//! medicines:
//!   - name: 头孢曲松钠
//!     specification: 1g
//!     system: 抗感染
//! canned_prescriptions:
//!   - name: 上感
//!     content: 急性上呼吸道感染
//!     system: 呼吸系统
//! ```
//!
//! Unknown keys are rejected. Schema mismatches are reported with the path of
//! the failing field (for example `medicines[2].specification`).

use crate::{CatalogError, CatalogResult};
use ivrx_types::MedicineRef;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One medicine as listed in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MedicineEntry {
    pub name: String,
    pub specification: String,
    /// Department or category tag. Entries without one group under `""`.
    #[serde(default)]
    pub system: String,
}

impl MedicineEntry {
    /// The value a selection list stores for this medicine.
    pub fn reference(&self) -> MedicineRef {
        MedicineRef::from_parts(&self.name, &self.specification)
    }
}

/// A predefined diagnosis text.
///
/// `name` is what the selection list shows; `content` is what gets stored on the
/// prescription and printed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CannedPrescription {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub system: String,
}

/// Both reference lists as fetched together.
pub type CatalogEntries = (Vec<MedicineEntry>, Vec<CannedPrescription>);

/// Anything that can supply the two reference lists.
///
/// Implementations may fail freely; [`crate::CatalogLoader`] absorbs the error.
pub trait CatalogSource {
    fn medicines(&self) -> CatalogResult<Vec<MedicineEntry>>;

    fn canned_prescriptions(&self) -> CatalogResult<Vec<CannedPrescription>>;

    /// Fetches both lists in one go. Sources backed by a single document
    /// override this so both lists come from the same read.
    fn fetch(&self) -> CatalogResult<CatalogEntries> {
        Ok((self.medicines()?, self.canned_prescriptions()?))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    #[serde(default)]
    medicines: Vec<MedicineEntry>,

    #[serde(default)]
    canned_prescriptions: Vec<CannedPrescription>,
}

/// A catalog stored as one YAML file.
///
/// Each call reads the file afresh. [`CatalogSource::fetch`] reads it once for
/// both lists.
#[derive(Clone, Debug)]
pub struct YamlCatalogSource {
    path: PathBuf,
}

impl YamlCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse catalog YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Translation`] naming the failing path when the text
    /// does not match the catalog schema.
    pub fn parse(yaml_text: &str) -> CatalogResult<CatalogEntries> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CatalogError::Translation(format!(
                    "catalog schema mismatch at {path}: {source}"
                )));
            }
        };

        Ok((wire.medicines, wire.canned_prescriptions))
    }

    fn read(&self) -> CatalogResult<CatalogEntries> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        Self::parse(&text)
    }
}

impl CatalogSource for YamlCatalogSource {
    fn medicines(&self) -> CatalogResult<Vec<MedicineEntry>> {
        self.read().map(|(medicines, _)| medicines)
    }

    fn canned_prescriptions(&self) -> CatalogResult<Vec<CannedPrescription>> {
        self.read().map(|(_, canned)| canned)
    }

    fn fetch(&self) -> CatalogResult<CatalogEntries> {
        self.read()
    }
}

/// Entries held in memory, for hosts that fetch reference data themselves.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalogSource {
    pub medicines: Vec<MedicineEntry>,
    pub canned_prescriptions: Vec<CannedPrescription>,
}

impl CatalogSource for StaticCatalogSource {
    fn medicines(&self) -> CatalogResult<Vec<MedicineEntry>> {
        Ok(self.medicines.clone())
    }

    fn canned_prescriptions(&self) -> CatalogResult<Vec<CannedPrescription>> {
        Ok(self.canned_prescriptions.clone())
    }
}
