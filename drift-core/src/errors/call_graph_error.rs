//! Call-graph construction errors.

use super::error_code::{self, DriftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CallGraphError {
    #[error("Call graph exceeded memory budget")]
    MemoryExceeded,

    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    #[error("Cycle detection failed: {0}")]
    CycleDetectionFailed(String),
}

impl DriftErrorCode for CallGraphError {
    fn error_code(&self) -> &'static str {
        error_code::CALL_GRAPH_ERROR
    }
}
