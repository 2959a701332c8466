//! Contract engine errors (spec parsing, path matching, mismatch classification).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Failed to parse {format} spec at {path}: {message}")]
    SpecParseError {
        format: String,
        path: String,
        message: String,
    },

    #[error("Unsupported contract paradigm: {0}")]
    UnsupportedParadigm(String),

    #[error("Path pattern invalid: {0}")]
    InvalidPathPattern(String),

    #[error("Field comparison failed: {0}")]
    FieldComparisonFailed(String),
}

impl DriftErrorCode for ContractError {
    fn error_code(&self) -> &'static str {
        error_code::CONTRACT_ERROR
    }
}
