//! Projection of a prescription into its print-ready view.
//!
//! [`project`] is pure: it borrows the prescription, formats every printed value
//! into a string, and keeps nothing. The resulting [`PrintDocument`] is what an
//! output collaborator lays out on the page (see [`crate::render`]).
//!
//! Formatting rules:
//! - issue date as `yyyy-MM-dd`, or an empty string when absent
//! - diagnosis line: canned texts, then the custom text, joined by `，`; the
//!   custom text is appended even when empty
//! - medicine reference split on its first `-` into name and specification; a
//!   reference without the separator prints verbatim with an empty specification
//! - a line with a skin-test marker has three columns, otherwise two

use crate::constants::{
    DAYS_SUFFIX, DIAGNOSIS_SEPARATOR, ISSUE_DATE_FORMAT, PER_DOSE_PREFIX, RATE_UNIT,
};
use crate::prescription::{
    ContainerAmount, DoseAmount, DoseGroup, DoseMethod, MedicineUsage, Prescription,
};
use ivrx_types::ChargeType;
use serde::Serialize;

/// Flattened, fully formatted view of one prescription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    pub case_number: String,
    pub issue_date: String,
    pub patient_name: String,
    pub patient_gender: String,
    pub patient_age: String,
    pub patient_address: String,
    pub department_name: String,
    /// One box per charge type, in printed order; exactly one is checked.
    pub charge_boxes: [ChargeBox; 5],
    pub diagnosis: String,
    pub groups: Vec<PrintGroup>,
}

impl PrintDocument {
    /// The charge types whose box is checked.
    pub fn checked_charge_types(&self) -> Vec<ChargeType> {
        self.charge_boxes
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.charge_type)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChargeBox {
    pub charge_type: ChargeType,
    pub label: &'static str,
    pub checked: bool,
}

/// One dose group as printed: its medicine rows and the `Sig:` line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrintGroup {
    pub lines: Vec<PrintLine>,
    pub sig: PrintSig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrintLine {
    pub medicine: MedicineColumns,
    /// For example `2 瓶`.
    pub container: String,
    /// For example `每次 250 ml`.
    pub per_dose: String,
}

/// Which medicine columns are visible on a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum MedicineColumns {
    TwoColumn {
        name: String,
        specification: String,
    },
    ThreeColumn {
        name: String,
        specification: String,
        marker: String,
    },
}

impl MedicineColumns {
    pub fn name(&self) -> &str {
        match self {
            MedicineColumns::TwoColumn { name, .. } | MedicineColumns::ThreeColumn { name, .. } => {
                name
            }
        }
    }

    pub fn specification(&self) -> &str {
        match self {
            MedicineColumns::TwoColumn { specification, .. }
            | MedicineColumns::ThreeColumn { specification, .. } => specification,
        }
    }

    pub fn marker(&self) -> Option<&str> {
        match self {
            MedicineColumns::TwoColumn { .. } => None,
            MedicineColumns::ThreeColumn { marker, .. } => Some(marker),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrintSig {
    pub way: String,
    /// For example `30滴/分`.
    pub rate: String,
    pub frequency: String,
    /// For example `1天`.
    pub days: String,
}

/// Project a prescription into its print view.
pub fn project(prescription: &Prescription) -> PrintDocument {
    PrintDocument {
        case_number: prescription.case_number.clone(),
        issue_date: prescription
            .issue_date
            .map(|d| d.format(ISSUE_DATE_FORMAT).to_string())
            .unwrap_or_default(),
        patient_name: prescription.patient_name.clone(),
        patient_gender: prescription.patient_gender.label().to_string(),
        patient_age: prescription
            .patient_age
            .map(|age| age.to_string())
            .unwrap_or_default(),
        patient_address: prescription.patient_address.clone(),
        department_name: prescription.department_name.clone(),
        charge_boxes: ChargeType::ALL.map(|charge_type| ChargeBox {
            charge_type,
            label: charge_type.label(),
            checked: charge_type == prescription.charge_type,
        }),
        diagnosis: diagnosis_line(&prescription.diagnoses, &prescription.custom_diagnosis),
        groups: prescription.dose_groups.iter().map(group_project).collect(),
    }
}

fn diagnosis_line(diagnoses: &[String], custom: &str) -> String {
    diagnoses
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(custom))
        .collect::<Vec<_>>()
        .join(DIAGNOSIS_SEPARATOR)
}

fn group_project(group: &DoseGroup) -> PrintGroup {
    PrintGroup {
        lines: group.usages.iter().map(line_project).collect(),
        sig: sig_project(&group.method),
    }
}

fn line_project(usage: &MedicineUsage) -> PrintLine {
    let (name, specification) = usage
        .medicine
        .as_ref()
        .map(|m| m.split())
        .unwrap_or(("", ""));
    let (name, specification) = (name.to_string(), specification.to_string());

    let medicine = match usage.skin_test {
        Some(marker) => MedicineColumns::ThreeColumn {
            name,
            specification,
            marker: marker.label().to_string(),
        },
        None => MedicineColumns::TwoColumn {
            name,
            specification,
        },
    };

    PrintLine {
        medicine,
        container: container_text(&usage.container),
        per_dose: per_dose_text(&usage.per_dose),
    }
}

fn sig_project(method: &DoseMethod) -> PrintSig {
    PrintSig {
        way: method.way.label().to_string(),
        rate: format!("{}{}", method.rate, RATE_UNIT),
        frequency: method.frequency.label().to_string(),
        days: format!("{}{}", method.days, DAYS_SUFFIX),
    }
}

fn container_text(container: &ContainerAmount) -> String {
    join_present(&[
        container.quantity.map(quantity_text).unwrap_or_default(),
        container.unit.label().to_string(),
    ])
}

fn per_dose_text(dose: &DoseAmount) -> String {
    join_present(&[
        PER_DOSE_PREFIX.to_string(),
        dose.quantity.map(quantity_text).unwrap_or_default(),
        dose.unit.clone(),
    ])
}

/// `2.0` prints as `2`, `2.5` as `2.5`.
fn quantity_text(quantity: f64) -> String {
    quantity.to_string()
}

fn join_present(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
