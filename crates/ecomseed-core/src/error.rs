use thiserror::Error;

/// Core error type shared across ecomseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A table name outside the fixed catalog.
    #[error("unknown table: {0}")]
    UnknownTable(String),
    /// A value that does not belong to a closed enumeration.
    #[error("invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },
    /// The catalog violates its own ordering invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Convenience alias for results returned by ecomseed crates.
pub type Result<T> = std::result::Result<T, Error>;
