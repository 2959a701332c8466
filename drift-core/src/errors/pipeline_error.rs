//! Top-level 4-phase pipeline errors — the union an `analyze()` call can fail with.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Pipeline cancelled")]
    Cancelled,

    #[error("Scan phase failed: {0}")]
    Scan(#[from] super::ScanError),

    #[error("Parse phase failed: {0}")]
    Parse(#[from] super::ParseError),

    #[error("Detection phase failed: {0}")]
    Detection(#[from] super::DetectionError),

    #[error("Storage error: {0}")]
    Storage(#[from] super::StorageError),
}

impl DriftErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Detection(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            #[allow(unreachable_patterns)]
            _ => error_code::PIPELINE_ERROR,
        }
    }
}
