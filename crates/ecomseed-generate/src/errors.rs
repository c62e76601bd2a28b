use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// A self-check found data that breaks a generation invariant.
    #[error("generation invariant violated [{check}]: {detail}")]
    InvariantViolation { check: &'static str, detail: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
