//! Shared value types for the ivrx prescription pad.
//!
//! This crate holds the closed enumerations printed on an injection prescription
//! (charge type, gender, skin-test marker, container unit, administration way and
//! frequency), the composite [`MedicineRef`] produced by the catalog selection
//! lists, and [`NonEmptyText`] for configuration values that must carry content.
//!
//! Nothing here performs I/O.

pub mod codes;
pub mod medicine;

pub use codes::{AdministrationWay, ChargeType, ContainerUnit, Frequency, Gender, SkinTest};
pub use medicine::{MedicineRef, MEDICINE_SEPARATOR};

/// Errors raised while building validated value types.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// The input text was empty or contained only whitespace.
    #[error("text cannot be empty")]
    EmptyText,
}

/// Type alias for Results that can fail with a [`TypesError`].
pub type TypesResult<T> = Result<T, TypesError>;

/// A trimmed string guaranteed to hold at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and rejects it when nothing is left.
    pub fn new(input: impl AsRef<str>) -> TypesResult<Self> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  中西医结合科  ").unwrap();
        assert_eq!(text.as_str(), "中西医结合科");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert!(matches!(NonEmptyText::new(" \t "), Err(TypesError::EmptyText)));
    }

    #[test]
    fn test_non_empty_text_deserialize_rejects_empty() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
