//! Editing operations over a [`Prescription`] snapshot.
//!
//! Every operation borrows the current snapshot and returns a new one; the input
//! is never modified. Operations addressing a dose group or medicine line by
//! index fail with an out-of-range error instead of silently doing nothing, so
//! the caller's snapshot stays as it was.
//!
//! Field updates are closed enums ([`PrescriptionField`], [`UsageField`],
//! [`DoseMethodField`]) carrying already-typed values. Converting raw form input
//! into those values is limited to [`coerce_age`] and [`coerce_quantity`];
//! there is no range validation.

use crate::constants::DEFAULT_DEPARTMENT;
use crate::error::{PrescriptionError, PrescriptionResult};
use crate::prescription::{DoseAmount, DoseGroup, MedicineUsage, Prescription};
use chrono::NaiveDate;
use ivrx_types::{
    AdministrationWay, ChargeType, ContainerUnit, Frequency, Gender, MedicineRef, SkinTest,
};

/// A top-level prescription field with its new value.
#[derive(Clone, Debug, PartialEq)]
pub enum PrescriptionField {
    CaseNumber(String),
    IssueDate(Option<NaiveDate>),
    PatientName(String),
    PatientGender(Gender),
    /// `None` is the empty sentinel; see [`coerce_age`].
    PatientAge(Option<u32>),
    PatientAddress(String),
    DepartmentName(String),
    ChargeType(ChargeType),
    Diagnoses(Vec<String>),
    CustomDiagnosis(String),
}

/// A medicine line field with its new value.
#[derive(Clone, Debug, PartialEq)]
pub enum UsageField {
    SkinTest(Option<SkinTest>),
    Medicine(Option<MedicineRef>),
    ContainerQuantity(Option<f64>),
    ContainerUnit(ContainerUnit),
    PerDose(DoseAmount),
}

/// A dose method field with its new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoseMethodField {
    Way(AdministrationWay),
    Rate(u32),
    Days(u32),
    Frequency(Frequency),
}

/// Coerce raw age input. Blank or non-numeric input becomes the empty sentinel.
pub fn coerce_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Coerce raw quantity input. Blank, non-numeric or non-finite input becomes
/// the empty sentinel.
pub fn coerce_quantity(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|q| q.is_finite())
}

/// Prescription editing operations.
///
/// This is a zero-sized type used for namespacing editor operations.
/// All methods are associated functions.
pub struct PrescriptionEditor;

impl PrescriptionEditor {
    /// A blank prescription dated today, with one standard dose group.
    pub fn create_blank() -> Prescription {
        Self::create_blank_on(today(), DEFAULT_DEPARTMENT)
    }

    /// A blank prescription with an explicit issue date and department.
    ///
    /// Seeds exactly one [`DoseGroup::standard`]. Charge type is self-pay,
    /// gender is male, every identifier and free-text field is empty.
    pub fn create_blank_on(issue_date: NaiveDate, department: &str) -> Prescription {
        Prescription {
            case_number: String::new(),
            issue_date: Some(issue_date),
            patient_name: String::new(),
            patient_gender: Gender::default(),
            patient_age: None,
            patient_address: String::new(),
            department_name: department.to_string(),
            charge_type: ChargeType::SelfPay,
            diagnoses: Vec::new(),
            custom_diagnosis: String::new(),
            dose_groups: vec![DoseGroup::standard()],
        }
    }

    /// A blank prescription dated today with NO dose groups.
    ///
    /// Unlike [`Self::create_blank`], which seeds one group, the "new
    /// prescription" action starts from an empty group list.
    pub fn clear() -> Prescription {
        Self::clear_on(today(), DEFAULT_DEPARTMENT)
    }

    pub fn clear_on(issue_date: NaiveDate, department: &str) -> Prescription {
        Prescription {
            dose_groups: Vec::new(),
            ..Self::create_blank_on(issue_date, department)
        }
    }

    pub fn set_field(prescription: &Prescription, field: PrescriptionField) -> Prescription {
        let mut next = prescription.clone();
        match field {
            PrescriptionField::CaseNumber(v) => next.case_number = v,
            PrescriptionField::IssueDate(v) => next.issue_date = v,
            PrescriptionField::PatientName(v) => next.patient_name = v,
            PrescriptionField::PatientGender(v) => next.patient_gender = v,
            PrescriptionField::PatientAge(v) => next.patient_age = v,
            PrescriptionField::PatientAddress(v) => next.patient_address = v,
            PrescriptionField::DepartmentName(v) => next.department_name = v,
            PrescriptionField::ChargeType(v) => next.charge_type = v,
            PrescriptionField::Diagnoses(v) => next.diagnoses = v,
            PrescriptionField::CustomDiagnosis(v) => next.custom_diagnosis = v,
        }
        next
    }

    /// Append a standard dose group after the existing ones.
    pub fn add_dose_group(prescription: &Prescription) -> Prescription {
        let mut next = prescription.clone();
        next.dose_groups.push(DoseGroup::standard());
        next
    }

    pub fn remove_dose_group(
        prescription: &Prescription,
        group_index: usize,
    ) -> PrescriptionResult<Prescription> {
        check_group(prescription, group_index)?;
        let mut next = prescription.clone();
        next.dose_groups.remove(group_index);
        Ok(next)
    }

    /// Append an empty medicine line to the addressed group.
    pub fn add_medicine_usage(
        prescription: &Prescription,
        group_index: usize,
    ) -> PrescriptionResult<Prescription> {
        check_group(prescription, group_index)?;
        let mut next = prescription.clone();
        next.dose_groups[group_index]
            .usages
            .push(MedicineUsage::default());
        Ok(next)
    }

    /// Remove one medicine line. A group may be left with no lines.
    pub fn remove_medicine_usage(
        prescription: &Prescription,
        group_index: usize,
        usage_index: usize,
    ) -> PrescriptionResult<Prescription> {
        check_usage(prescription, group_index, usage_index)?;
        let mut next = prescription.clone();
        next.dose_groups[group_index].usages.remove(usage_index);
        Ok(next)
    }

    pub fn set_medicine_usage_field(
        prescription: &Prescription,
        group_index: usize,
        usage_index: usize,
        field: UsageField,
    ) -> PrescriptionResult<Prescription> {
        check_usage(prescription, group_index, usage_index)?;
        let mut next = prescription.clone();
        let usage = &mut next.dose_groups[group_index].usages[usage_index];
        match field {
            UsageField::SkinTest(v) => usage.skin_test = v,
            UsageField::Medicine(v) => usage.medicine = v,
            UsageField::ContainerQuantity(v) => usage.container.quantity = v,
            UsageField::ContainerUnit(v) => usage.container.unit = v,
            UsageField::PerDose(v) => usage.per_dose = v,
        }
        Ok(next)
    }

    /// Replace one dose method field. Numbers are taken as given.
    pub fn set_dose_method_field(
        prescription: &Prescription,
        group_index: usize,
        field: DoseMethodField,
    ) -> PrescriptionResult<Prescription> {
        check_group(prescription, group_index)?;
        let mut next = prescription.clone();
        let method = &mut next.dose_groups[group_index].method;
        match field {
            DoseMethodField::Way(v) => method.way = v,
            DoseMethodField::Rate(v) => method.rate = v,
            DoseMethodField::Days(v) => method.days = v,
            DoseMethodField::Frequency(v) => method.frequency = v,
        }
        Ok(next)
    }
}

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn check_group(prescription: &Prescription, group_index: usize) -> PrescriptionResult<()> {
    let len = prescription.dose_groups.len();
    if group_index >= len {
        return Err(PrescriptionError::GroupIndexOutOfRange {
            index: group_index,
            len,
        });
    }
    Ok(())
}

fn check_usage(
    prescription: &Prescription,
    group_index: usize,
    usage_index: usize,
) -> PrescriptionResult<()> {
    check_group(prescription, group_index)?;
    let len = prescription.dose_groups[group_index].usages.len();
    if usage_index >= len {
        return Err(PrescriptionError::UsageIndexOutOfRange {
            group: group_index,
            index: usage_index,
            len,
        });
    }
    Ok(())
}
