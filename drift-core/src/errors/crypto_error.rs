//! Cryptographic failure detection errors.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Pattern table missing entry for language: {0}")]
    UnknownLanguage(String),

    #[error("Remediation lookup failed for category: {0}")]
    RemediationMissing(String),

    #[error("Health score computation failed: {0}")]
    HealthScoreFailed(String),
}

impl DriftErrorCode for CryptoError {
    fn error_code(&self) -> &'static str {
        error_code::CRYPTO_ERROR
    }
}
