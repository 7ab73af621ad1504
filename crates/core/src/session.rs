//! # Editor Session
//!
//! An [`EditorSession`] owns the single current prescription snapshot together
//! with the catalog it was started with. Every editing operation is forwarded to
//! [`PrescriptionEditor`]; on success the returned snapshot replaces the current
//! one, on failure the current snapshot is left untouched and the error is
//! returned to the caller.

use crate::config::CoreConfig;
use crate::editor::{today, DoseMethodField, PrescriptionEditor, PrescriptionField, UsageField};
use crate::error::PrescriptionResult;
use crate::prescription::Prescription;
use crate::projector::{project, PrintDocument};
use crate::render::PageRenderer;
use chrono::NaiveDate;
use ivrx_catalog::Catalog;
use std::sync::Arc;
use uuid::Uuid;

/// Holds the prescription being edited.
#[derive(Debug)]
pub struct EditorSession {
    id: Uuid,
    config: Arc<CoreConfig>,
    catalog: Catalog,
    current: Prescription,
    renderer: PageRenderer,
}

impl EditorSession {
    /// Starts a session on a blank prescription dated today.
    pub fn start(config: Arc<CoreConfig>, catalog: Catalog) -> Self {
        Self::start_on(config, catalog, today())
    }

    /// Starts a session on a blank prescription with an explicit issue date.
    ///
    /// The blank prescription uses the configured default department and seeds
    /// one standard dose group.
    pub fn start_on(config: Arc<CoreConfig>, catalog: Catalog, issue_date: NaiveDate) -> Self {
        let current = PrescriptionEditor::create_blank_on(issue_date, config.default_department());
        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            medicine_groups = catalog.medicine_groups().len(),
            canned_groups = catalog.canned_groups().len(),
            "editor session started"
        );
        Self {
            id,
            config,
            catalog,
            current,
            renderer: PageRenderer::new(),
        }
    }

    /// Starts a session on an existing draft.
    pub fn resume(config: Arc<CoreConfig>, catalog: Catalog, draft: Prescription) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, groups = draft.dose_groups.len(), "editor session resumed");
        Self {
            id,
            config,
            catalog,
            current: draft,
            renderer: PageRenderer::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current(&self) -> &Prescription {
        &self.current
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn set_field(&mut self, field: PrescriptionField) {
        self.current = PrescriptionEditor::set_field(&self.current, field);
        tracing::debug!(session = %self.id, "prescription field set");
    }

    pub fn add_dose_group(&mut self) {
        self.current = PrescriptionEditor::add_dose_group(&self.current);
        tracing::debug!(
            session = %self.id,
            groups = self.current.dose_groups.len(),
            "dose group added"
        );
    }

    pub fn remove_dose_group(&mut self, group_index: usize) -> PrescriptionResult<()> {
        self.apply("remove_dose_group", |p| {
            PrescriptionEditor::remove_dose_group(p, group_index)
        })
    }

    pub fn add_medicine_usage(&mut self, group_index: usize) -> PrescriptionResult<()> {
        self.apply("add_medicine_usage", |p| {
            PrescriptionEditor::add_medicine_usage(p, group_index)
        })
    }

    pub fn remove_medicine_usage(
        &mut self,
        group_index: usize,
        usage_index: usize,
    ) -> PrescriptionResult<()> {
        self.apply("remove_medicine_usage", |p| {
            PrescriptionEditor::remove_medicine_usage(p, group_index, usage_index)
        })
    }

    pub fn set_medicine_usage_field(
        &mut self,
        group_index: usize,
        usage_index: usize,
        field: UsageField,
    ) -> PrescriptionResult<()> {
        self.apply("set_medicine_usage_field", |p| {
            PrescriptionEditor::set_medicine_usage_field(p, group_index, usage_index, field)
        })
    }

    pub fn set_dose_method_field(
        &mut self,
        group_index: usize,
        field: DoseMethodField,
    ) -> PrescriptionResult<()> {
        self.apply("set_dose_method_field", |p| {
            PrescriptionEditor::set_dose_method_field(p, group_index, field)
        })
    }

    /// Replaces the current prescription with a cleared one (no dose groups)
    /// dated today.
    pub fn new_prescription(&mut self) {
        self.new_prescription_on(today());
    }

    pub fn new_prescription_on(&mut self, issue_date: NaiveDate) {
        self.current = PrescriptionEditor::clear_on(issue_date, self.config.default_department());
        tracing::info!(session = %self.id, "prescription cleared");
    }

    pub fn print_document(&self) -> PrintDocument {
        project(&self.current)
    }

    /// Renders the current prescription under the configured hospital title.
    pub fn page_render(&self) -> String {
        self.renderer
            .page_render(&self.print_document(), self.config.hospital_title())
    }

    /// Ends the session, handing back the final snapshot.
    pub fn finish(self) -> Prescription {
        tracing::info!(session = %self.id, "editor session finished");
        self.current
    }

    fn apply<F>(&mut self, operation: &'static str, edit: F) -> PrescriptionResult<()>
    where
        F: FnOnce(&Prescription) -> PrescriptionResult<Prescription>,
    {
        match edit(&self.current) {
            Ok(next) => {
                self.current = next;
                tracing::debug!(session = %self.id, operation, "edit applied");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(session = %self.id, operation, error = %e, "edit rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrescriptionError;
    use ivrx_catalog::{CannedPrescription, MedicineEntry};
    use ivrx_types::{ChargeType, MedicineRef, SkinTest};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn config() -> Arc<CoreConfig> {
        Arc::new(CoreConfig::new("荣县处方签", "内科", None).unwrap())
    }

    fn catalog() -> Catalog {
        Catalog::from_entries(
            vec![MedicineEntry {
                name: "0.9%氯化钠注射液".into(),
                specification: "250ml".into(),
                system: "西药".into(),
            }],
            vec![CannedPrescription {
                name: "上感".into(),
                content: "急性上呼吸道感染".into(),
                system: "呼吸".into(),
            }],
        )
    }

    #[test]
    fn test_start_uses_configured_department() {
        let session = EditorSession::start_on(config(), catalog(), date());
        let current = session.current();
        assert_eq!(current.department_name, "内科");
        assert_eq!(current.issue_date, Some(date()));
        assert_eq!(current.dose_groups.len(), 1);
        assert!(!session.catalog().is_empty());
    }

    #[test]
    fn test_successful_edits_replace_snapshot() {
        let mut session = EditorSession::start_on(config(), catalog(), date());
        session.set_field(PrescriptionField::ChargeType(ChargeType::RuralCooperative));
        session.add_dose_group();
        session.add_medicine_usage(1).unwrap();
        session
            .set_medicine_usage_field(
                1,
                1,
                UsageField::Medicine(Some(MedicineRef::from_parts("0.9%氯化钠注射液", "250ml"))),
            )
            .unwrap();
        session
            .set_dose_method_field(1, DoseMethodField::Rate(40))
            .unwrap();

        let current = session.current();
        assert_eq!(current.charge_type, ChargeType::RuralCooperative);
        assert_eq!(current.dose_groups.len(), 2);
        assert_eq!(current.dose_groups[1].usages.len(), 2);
        assert_eq!(current.dose_groups[1].method.rate, 40);
        assert_eq!(current.dose_groups[0].method.rate, 30);
    }

    #[test]
    fn test_failed_edit_keeps_snapshot() {
        let mut session = EditorSession::start_on(config(), catalog(), date());
        let before = session.current().clone();

        let err = session
            .set_medicine_usage_field(0, 5, UsageField::SkinTest(Some(SkinTest::Required)))
            .expect_err("usage 5 does not exist");
        assert!(matches!(
            err,
            PrescriptionError::UsageIndexOutOfRange { index: 5, len: 1, .. }
        ));
        assert!(session.remove_dose_group(3).is_err());
        assert_eq!(session.current(), &before);
    }

    #[test]
    fn test_new_prescription_clears_groups() {
        let mut session = EditorSession::start_on(config(), catalog(), date());
        session.set_field(PrescriptionField::PatientName("李四".into()));
        session.new_prescription_on(date());

        let current = session.current();
        assert!(current.patient_name.is_empty());
        assert!(current.dose_groups.is_empty());
        assert_eq!(current.department_name, "内科");
    }

    #[test]
    fn test_page_render_uses_configured_title() {
        let session = EditorSession::start_on(config(), Catalog::empty(), date());
        let page = session.page_render();
        assert_eq!(page.lines().next().map(str::trim), Some("荣县处方签"));
        assert_eq!(session.print_document().issue_date, "2026-10-16");
    }

    #[test]
    fn test_finish_returns_final_snapshot() {
        let mut session = EditorSession::start_on(config(), catalog(), date());
        session.set_field(PrescriptionField::CaseNumber("MZ-7".into()));
        let id = session.id();
        assert!(!id.is_nil());
        let final_snapshot = session.finish();
        assert_eq!(final_snapshot.case_number, "MZ-7");
    }

    #[test]
    fn test_resume_keeps_draft() {
        let mut draft = PrescriptionEditor::clear_on(date(), "外科");
        draft.patient_name = "王五".into();
        let session = EditorSession::resume(config(), catalog(), draft.clone());
        assert_eq!(session.current(), &draft);
    }
}
