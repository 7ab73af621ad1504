//! Grouped, read-only catalog consumed by the editor's selection fields.

use crate::source::{CannedPrescription, CatalogSource, MedicineEntry};
use ivrx_types::MedicineRef;
use serde::Serialize;

/// Medicines sharing one system tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MedicineGroup {
    pub system: String,
    pub medicines: Vec<MedicineEntry>,
}

/// Canned prescriptions sharing one system tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CannedPrescriptionGroup {
    pub system: String,
    pub prescriptions: Vec<CannedPrescription>,
}

/// Reference data for one editing session.
///
/// Groups keep the order in which each system first appears in the source, and
/// entries keep their source order within a group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    medicine_groups: Vec<MedicineGroup>,
    canned_groups: Vec<CannedPrescriptionGroup>,
}

impl Catalog {
    /// A catalog with no entries, as seen after a failed load.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(
        medicines: Vec<MedicineEntry>,
        canned_prescriptions: Vec<CannedPrescription>,
    ) -> Self {
        let medicine_groups = group_by_system(medicines, |m| &m.system)
            .into_iter()
            .map(|(system, medicines)| MedicineGroup { system, medicines })
            .collect();
        let canned_groups = group_by_system(canned_prescriptions, |p| &p.system)
            .into_iter()
            .map(|(system, prescriptions)| CannedPrescriptionGroup {
                system,
                prescriptions,
            })
            .collect();

        Self {
            medicine_groups,
            canned_groups,
        }
    }

    pub fn medicine_groups(&self) -> &[MedicineGroup] {
        &self.medicine_groups
    }

    pub fn canned_groups(&self) -> &[CannedPrescriptionGroup] {
        &self.canned_groups
    }

    pub fn is_empty(&self) -> bool {
        self.medicine_groups.is_empty() && self.canned_groups.is_empty()
    }

    /// Selection values for the medicine picker, as `(system, reference)` pairs.
    pub fn medicine_options(&self) -> impl Iterator<Item = (&str, MedicineRef)> + '_ {
        self.medicine_groups.iter().flat_map(|group| {
            group
                .medicines
                .iter()
                .map(move |m| (group.system.as_str(), m.reference()))
        })
    }

    /// Looks up the stored diagnosis text for a canned prescription by its display name.
    pub fn canned_content(&self, name: &str) -> Option<&str> {
        self.canned_groups
            .iter()
            .flat_map(|g| g.prescriptions.iter())
            .find(|p| p.name == name)
            .map(|p| p.content.as_str())
    }
}

fn group_by_system<T>(items: Vec<T>, system: impl Fn(&T) -> &String) -> Vec<(String, Vec<T>)> {
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    for item in items {
        let tag = system(&item);
        match groups.iter().position(|(s, _)| s == tag) {
            Some(i) => groups[i].1.push(item),
            None => groups.push((tag.clone(), vec![item])),
        }
    }
    groups
}

/// Performs the one catalog fetch of a session.
#[derive(Debug, Default, Clone)]
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn new() -> Self {
        Self
    }

    /// Fetches both lists and groups them.
    ///
    /// Any source error is logged and yields [`Catalog::empty`]; a failure of
    /// either list discards both, so the editor never sees a half-loaded catalog.
    pub fn load(&self, source: &dyn CatalogSource) -> Catalog {
        match source.fetch() {
            Ok((medicines, canned)) => {
                let catalog = Catalog::from_entries(medicines, canned);
                tracing::debug!(
                    medicine_groups = catalog.medicine_groups.len(),
                    canned_groups = catalog.canned_groups.len(),
                    "catalog loaded"
                );
                catalog
            }
            Err(err) => {
                tracing::warn!("catalog unavailable, selection lists will be empty: {}", err);
                Catalog::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CatalogEntries, CatalogError, CatalogResult, StaticCatalogSource, YamlCatalogSource,
    };
    use std::cell::Cell;
    use tempfile::TempDir;

    fn med(name: &str, spec: &str, system: &str) -> MedicineEntry {
        MedicineEntry {
            name: name.into(),
            specification: spec.into(),
            system: system.into(),
        }
    }

    fn canned(name: &str, content: &str, system: &str) -> CannedPrescription {
        CannedPrescription {
            name: name.into(),
            content: content.into(),
            system: system.into(),
        }
    }

    struct FailingCanned;

    impl CatalogSource for FailingCanned {
        fn medicines(&self) -> CatalogResult<Vec<MedicineEntry>> {
            Ok(vec![med("头孢曲松钠", "1g", "抗感染")])
        }

        fn canned_prescriptions(&self) -> CatalogResult<Vec<CannedPrescription>> {
            Err(CatalogError::Unavailable("connection refused".into()))
        }
    }

    /// Serves both lists only through `fetch`, counting the calls.
    struct SingleFetch {
        fetches: Cell<usize>,
    }

    impl CatalogSource for SingleFetch {
        fn medicines(&self) -> CatalogResult<Vec<MedicineEntry>> {
            Err(CatalogError::Unavailable("per-list read".into()))
        }

        fn canned_prescriptions(&self) -> CatalogResult<Vec<CannedPrescription>> {
            Err(CatalogError::Unavailable("per-list read".into()))
        }

        fn fetch(&self) -> CatalogResult<CatalogEntries> {
            self.fetches.set(self.fetches.get() + 1);
            Ok((
                vec![med("头孢曲松钠", "1g", "抗感染")],
                vec![canned("上感", "急性上呼吸道感染", "呼吸系统")],
            ))
        }
    }

    #[test]
    fn test_groups_keep_first_appearance_order() {
        let catalog = Catalog::from_entries(
            vec![
                med("氯化钠注射液", "250ml", "基础输液"),
                med("头孢曲松钠", "1g", "抗感染"),
                med("葡萄糖注射液", "250ml", "基础输液"),
            ],
            vec![],
        );

        let systems: Vec<&str> = catalog
            .medicine_groups()
            .iter()
            .map(|g| g.system.as_str())
            .collect();
        assert_eq!(systems, vec!["基础输液", "抗感染"]);
        assert_eq!(catalog.medicine_groups()[0].medicines.len(), 2);
        assert_eq!(
            catalog.medicine_groups()[0].medicines[1].name,
            "葡萄糖注射液"
        );
    }

    #[test]
    fn test_medicine_options_yield_composite_references() {
        let catalog = Catalog::from_entries(
            vec![
                med("头孢曲松钠", "1g", "抗感染"),
                med("氯化钠注射液", "250ml", "基础输液"),
            ],
            vec![],
        );
        let options: Vec<(&str, MedicineRef)> = catalog.medicine_options().collect();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].0, "抗感染");
        assert_eq!(options[0].1.as_str(), "头孢曲松钠-1g");
    }

    #[test]
    fn test_canned_content_by_name() {
        let catalog = Catalog::from_entries(
            vec![],
            vec![
                canned("上感", "急性上呼吸道感染", "呼吸系统"),
                canned("胃炎", "慢性胃炎", "消化系统"),
            ],
        );
        assert_eq!(catalog.canned_groups().len(), 2);
        assert_eq!(catalog.canned_content("胃炎"), Some("慢性胃炎"));
        assert_eq!(catalog.canned_content("肺炎"), None);
    }

    #[test]
    fn test_loader_groups_static_source() {
        let source = StaticCatalogSource {
            medicines: vec![med("头孢曲松钠", "1g", "抗感染")],
            canned_prescriptions: vec![canned("上感", "急性上呼吸道感染", "呼吸系统")],
        };
        let catalog = CatalogLoader::new().load(&source);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.medicine_groups()[0].system, "抗感染");
    }

    #[test]
    fn test_loader_failure_degrades_to_empty_lists() {
        let catalog = CatalogLoader::new().load(&FailingCanned);
        assert!(catalog.is_empty());
        assert!(catalog.medicine_groups().is_empty());
        assert!(catalog.canned_groups().is_empty());
    }

    #[test]
    fn test_loader_fetches_once() {
        let source = SingleFetch {
            fetches: Cell::new(0),
        };
        let catalog = CatalogLoader::new().load(&source);
        assert_eq!(source.fetches.get(), 1);
        assert_eq!(catalog.medicine_groups().len(), 1);
        assert_eq!(catalog.canned_groups().len(), 1);
    }

    #[test]
    fn test_loader_malformed_file_degrades_to_empty_lists() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("catalog.yaml");
        std::fs::write(&path, "medicines:\n  - name: 头孢曲松钠\n    dosage: 1g\n")
            .expect("write catalog");

        let catalog = CatalogLoader::new().load(&YamlCatalogSource::new(&path));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_loader_missing_file_degrades_to_empty_lists() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = YamlCatalogSource::new(temp_dir.path().join("absent.yaml"));

        let catalog = CatalogLoader::new().load(&source);
        assert!(catalog.is_empty());
    }
}
