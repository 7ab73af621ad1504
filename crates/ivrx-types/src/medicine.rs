//! Composite medicine reference.
//!
//! Selection lists offer each catalog medicine as `"<name>-<specification>"`, and
//! that composite string is what a medicine line stores. Because the value is
//! free text at the storage boundary it may lack the separator; splitting never
//! fails and yields an empty specification in that case.

use serde::{Deserialize, Serialize};

/// Separator between the name and specification parts.
pub const MEDICINE_SEPARATOR: char = '-';

/// A medicine as selected on a prescription line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineRef(String);

impl MedicineRef {
    /// Wraps an already-composed reference without inspecting it.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Composes a reference from catalog parts.
    pub fn from_parts(name: &str, specification: &str) -> Self {
        Self(format!("{name}{MEDICINE_SEPARATOR}{specification}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits on the first separator into `(name, specification)`.
    ///
    /// Everything after the first separator belongs to the specification, so
    /// `"葡萄糖注射液-5%-250ml"` yields `("葡萄糖注射液", "5%-250ml")`.
    pub fn split(&self) -> (&str, &str) {
        match self.0.split_once(MEDICINE_SEPARATOR) {
            Some((name, specification)) => (name, specification),
            None => (self.0.as_str(), ""),
        }
    }

    pub fn name(&self) -> &str {
        self.split().0
    }

    pub fn specification(&self) -> &str {
        self.split().1
    }
}

impl std::fmt::Display for MedicineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
