//! Module-boundary / contract extraction errors.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("Boundary extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Ambiguous boundary: {0}")]
    Ambiguous(String),
}

impl DriftErrorCode for BoundaryError {
    fn error_code(&self) -> &'static str {
        error_code::BOUNDARY_ERROR
    }
}
