//! Closed, per-subsystem error enums. Every enum implements [`error_code::DriftErrorCode`]
//! so the napi boundary can report a stable code alongside the `Display` message.

pub mod boundary_error;
pub mod call_graph_error;
pub mod config_error;
pub mod context_error;
pub mod contract_error;
pub mod crypto_error;
pub mod detection_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod scan_error;
pub mod storage_error;

pub use boundary_error::BoundaryError;
pub use call_graph_error::CallGraphError;
pub use config_error::ConfigError;
pub use context_error::ContextError;
pub use contract_error::ContractError;
pub use crypto_error::CryptoError;
pub use detection_error::DetectionError;
pub use error_code::DriftErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::PipelineError;
pub use scan_error::ScanError;
pub use storage_error::StorageError;
