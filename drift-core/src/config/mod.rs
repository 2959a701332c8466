//! `drift.toml` configuration — scan/analysis/quality-gate/mcp/backup sections.
//!
//! Every section follows the same `Option<T>` + `effective_*()` idiom: absent
//! fields round-trip as absent (forward-compatible with older configs) and
//! defaults live next to the field, not scattered across the caller.

pub mod analysis_config;
pub mod analyze_options;
pub mod backup_config;
pub mod drift_config;
pub mod mcp_config;
pub mod quality_gates_config;
pub mod scan_config;
pub mod telemetry_config;

pub use analysis_config::AnalysisConfig;
pub use analyze_options::AnalyzeOptions;
pub use backup_config::BackupConfig;
pub use drift_config::{CliOverrides, DriftConfig};
pub use mcp_config::McpConfig;
pub use quality_gates_config::QualityGatesConfig;
pub use scan_config::ScanConfig;
pub use telemetry_config::TelemetryConfig;
