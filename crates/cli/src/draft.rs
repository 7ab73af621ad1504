//! Reading and writing prescription drafts as YAML files.

use anyhow::Context;
use ivrx_core::constants::DOSE_UNITS;
use ivrx_core::Prescription;
use std::fs;
use std::path::Path;

/// Load a draft, reporting the failing field path on schema errors.
pub fn draft_load(path: &Path) -> anyhow::Result<Prescription> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    draft_parse(&text).with_context(|| format!("invalid draft {}", path.display()))
}

pub fn draft_parse(yaml_text: &str) -> anyhow::Result<Prescription> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        let path = e.path().to_string();
        anyhow::anyhow!("draft schema mismatch at {path}: {}", e.into_inner())
    })
}

pub fn draft_render(prescription: &Prescription) -> anyhow::Result<String> {
    serde_yaml::to_string(prescription).context("failed to serialise draft")
}

/// A draft for hand editing, headed by a comment listing the usual per-dose units.
pub fn blank_render(prescription: &Prescription) -> anyhow::Result<String> {
    Ok(format!(
        "# per_dose.unit: {}\n{}",
        DOSE_UNITS.join(", "),
        draft_render(prescription)?
    ))
}
