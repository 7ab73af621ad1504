//! The editable prescription tree.
//!
//! A [`Prescription`] owns an ordered list of [`DoseGroup`]s ("Sig" blocks). Each
//! group bundles [`MedicineUsage`] lines under one shared [`DoseMethod`].
//!
//! Empty numeric inputs are represented as `None` rather than zero so that a blank
//! field prints blank.

use crate::constants::{DEFAULT_DOSE_UNIT, STANDARD_DAYS, STANDARD_DRIP_RATE};
use chrono::NaiveDate;
use ivrx_types::{
    AdministrationWay, ChargeType, ContainerUnit, Frequency, Gender, MedicineRef, SkinTest,
};
use serde::{Deserialize, Serialize};

/// Root record of the prescription form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    /// Outpatient/inpatient case number (病历号).
    #[serde(default)]
    pub case_number: String,

    #[serde(default)]
    pub issue_date: Option<NaiveDate>,

    #[serde(default)]
    pub patient_name: String,

    #[serde(default)]
    pub patient_gender: Gender,

    #[serde(default)]
    pub patient_age: Option<u32>,

    /// Address or telephone number.
    #[serde(default)]
    pub patient_address: String,

    #[serde(default)]
    pub department_name: String,

    #[serde(default)]
    pub charge_type: ChargeType,

    /// Selected canned-diagnosis texts, in selection order.
    #[serde(default)]
    pub diagnoses: Vec<String>,

    #[serde(default)]
    pub custom_diagnosis: String,

    #[serde(default)]
    pub dose_groups: Vec<DoseGroup>,
}

/// One administration instruction shared by all of its medicine lines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DoseGroup {
    #[serde(default)]
    pub usages: Vec<MedicineUsage>,

    #[serde(default)]
    pub method: DoseMethod,
}

impl DoseGroup {
    /// The group added by "add dose group": one empty medicine line and the
    /// standard dose method.
    pub fn standard() -> Self {
        Self {
            usages: vec![MedicineUsage::default()],
            method: DoseMethod::standard(),
        }
    }
}

/// One medicine line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicineUsage {
    #[serde(default)]
    pub skin_test: Option<SkinTest>,

    #[serde(default)]
    pub medicine: Option<MedicineRef>,

    #[serde(default)]
    pub container: ContainerAmount,

    #[serde(default)]
    pub per_dose: DoseAmount,
}

/// Number of bottles or ampoules dispensed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerAmount {
    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub unit: ContainerUnit,
}

/// Amount given per administration; the unit is free text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoseAmount {
    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub unit: String,
}

impl Default for DoseAmount {
    fn default() -> Self {
        Self {
            quantity: None,
            unit: DEFAULT_DOSE_UNIT.to_string(),
        }
    }
}

/// Route, rate, duration and frequency for a dose group.
///
/// The drip rate is always in drops per minute. Fields missing from a draft
/// take their [`DoseMethod::standard`] value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoseMethod {
    pub way: AdministrationWay,
    pub rate: u32,
    pub days: u32,
    pub frequency: Frequency,
}

impl DoseMethod {
    /// Intravenous drip, 30 drops/min, 1 day, once daily.
    pub fn standard() -> Self {
        Self {
            way: AdministrationWay::IntravenousDrip,
            rate: STANDARD_DRIP_RATE,
            days: STANDARD_DAYS,
            frequency: Frequency::OnceDaily,
        }
    }
}

impl Default for DoseMethod {
    fn default() -> Self {
        Self::standard()
    }
}
