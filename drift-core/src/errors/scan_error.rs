//! Scanner-phase errors (file discovery, hashing, language detection).

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("Scan cancelled")]
    Cancelled,

    #[error(".driftignore parse error: {message}")]
    IgnoreFileInvalid { message: String },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },
}

impl DriftErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::SCAN_ERROR,
        }
    }
}
