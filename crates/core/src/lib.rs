//! # IVRX Core
//!
//! Editing and printing logic for the intravenous injection prescription form.
//!
//! This crate contains pure data operations only:
//! - the prescription tree ([`prescription`]) and its editing operations ([`editor`])
//! - projection into a print-ready view ([`projector`]) and plain-text page layout ([`render`])
//! - an explicit [`EditorSession`] holding the current snapshot and the loaded catalog
//!
//! **No I/O concerns**: reading catalog files lives in `ivrx-catalog`, and reading
//! the environment or draft files belongs to the `ivrx` binary.

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod prescription;
pub mod projector;
pub mod render;
pub mod session;

pub use config::{core_config_from_env_values, CoreConfig};
pub use editor::{
    coerce_age, coerce_quantity, DoseMethodField, PrescriptionEditor, PrescriptionField,
    UsageField,
};
pub use error::{PrescriptionError, PrescriptionResult};
pub use prescription::{
    ContainerAmount, DoseAmount, DoseGroup, DoseMethod, MedicineUsage, Prescription,
};
pub use projector::{
    project, ChargeBox, MedicineColumns, PrintDocument, PrintGroup, PrintLine, PrintSig,
};
pub use render::PageRenderer;
pub use session::EditorSession;

pub use ivrx_catalog::{Catalog, CatalogLoader, CatalogSource, YamlCatalogSource};
pub use ivrx_types::{
    AdministrationWay, ChargeType, ContainerUnit, Frequency, Gender, MedicineRef, SkinTest,
};
