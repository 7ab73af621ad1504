#[derive(Debug, thiserror::Error)]
pub enum PrescriptionError {
    #[error("dose group index {index} out of range (prescription has {len} dose groups)")]
    GroupIndexOutOfRange { index: usize, len: usize },

    #[error(
        "medicine usage index {index} out of range (dose group {group} has {len} medicine usages)"
    )]
    UsageIndexOutOfRange {
        group: usize,
        index: usize,
        len: usize,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type PrescriptionResult<T> = std::result::Result<T, PrescriptionError>;
