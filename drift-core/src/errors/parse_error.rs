//! Tree-sitter parsing errors.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("No grammar registered for language: {language}")]
    GrammarNotFound { language: String },

    #[error("Parser pool exhausted ({capacity} parsers checked out)")]
    PoolExhausted { capacity: usize },

    #[error("Tree-sitter failed to parse {path}: {message}")]
    SyntaxError { path: String, message: String },

    #[error("Parse cancelled")]
    Cancelled,
}

impl DriftErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GrammarNotFound { .. } => error_code::UNSUPPORTED_LANGUAGE,
            Self::Cancelled => error_code::CANCELLED,
            _ => error_code::PARSE_ERROR,
        }
    }
}
