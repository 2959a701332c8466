//! Maps subsystem errors to `napi::Error`, carrying the structured
//! `[CODE]` prefix from `drift_core::errors::error_code::DriftErrorCode`
//! across the NAPI boundary.
//!
//! Codes not backed by a `DriftErrorCode` enum (bad arguments, uninitialized
//! runtime) are plain string constants defined here instead.

use drift_core::errors::error_code::DriftErrorCode;

pub use drift_core::errors::error_code::{
    BOUNDARY_ERROR, CALL_GRAPH_ERROR, CANCELLED, CONFIG_ERROR, CONSTRAINT_ERROR, CONTRACT_ERROR,
    CRYPTO_ERROR, DB_BUSY, DB_CORRUPT, DETECTION_ERROR, DISK_FULL, GATE_FAILED, LICENSE_ERROR,
    MIGRATION_FAILED, PARSE_ERROR, PIPELINE_ERROR, SCAN_ERROR, STORAGE_ERROR, TAINT_ERROR,
    UNSUPPORTED_LANGUAGE,
};

/// Runtime singleton already initialized by a prior `driftInitialize()` call.
pub const ALREADY_INITIALIZED: &str = "ALREADY_INITIALIZED";
/// `DriftRuntime::get()` called before `driftInitialize()`.
pub const RUNTIME_NOT_INITIALIZED: &str = "RUNTIME_NOT_INITIALIZED";
/// Failed to create `.drift/` or open the database file.
pub const INIT_ERROR: &str = "INIT_ERROR";
/// A caller-supplied argument failed validation before reaching a subsystem.
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
/// A query filter (category, pattern id, ...) did not match any known value.
pub const INVALID_FILTER: &str = "INVALID_FILTER";
/// Catch-all for failures with no more specific structured code.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// `[CODE] message` for any subsystem error that implements `DriftErrorCode`.
pub fn coded(e: &impl DriftErrorCode) -> napi::Error {
    napi::Error::from_reason(e.napi_string())
}

/// Convert a `ScanError` (or anything `Display`-compatible returned by the
/// scanner) into a `napi::Error`, tagged with the scan error's own code.
pub fn scan_error(e: drift_core::errors::ScanError) -> napi::Error {
    coded(&e)
}

/// Convert a `PipelineError` into a `napi::Error`.
pub fn pipeline_error(e: drift_core::errors::PipelineError) -> napi::Error {
    coded(&e)
}

/// Convert a `StorageError` into a `napi::Error`.
pub fn storage_error(e: drift_core::errors::StorageError) -> napi::Error {
    coded(&e)
}

/// Convert a `ContractError` into a `napi::Error`.
pub fn contract_error(e: drift_core::errors::ContractError) -> napi::Error {
    coded(&e)
}
