//! Detector/visitor-engine errors.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Detector panicked: {detector_id}")]
    DetectorPanicked { detector_id: String },

    #[error("Regex compile failed: {0}")]
    RegexCompile(String),

    #[error("Detection cancelled")]
    Cancelled,
}

impl DriftErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::DETECTION_ERROR,
        }
    }
}
