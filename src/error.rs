use thiserror::Error;

/// Errors raised at the file/config boundary. The aggregation functions
/// themselves never fail.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("too many focus product codes: {given} given, at most {max} slots")]
    TooManyFocusCodes { given: usize, max: usize },

    #[error("focus slot {index} out of range (slots 0..{max})")]
    FocusSlotOutOfRange { index: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, ReportError>;
