//! Tracing setup and span field conventions for the pipeline.
//!
//! Named `tracing` to mirror the external crate it wraps; code inside this
//! crate that needs the crate's logging macros imports them as `::tracing::*`
//! to avoid shadowing by this module.

use ::tracing_subscriber::EnvFilter;

/// Installs a global `tracing-subscriber` with env-filter configuration
/// (`RUST_LOG`, defaulting to `info`). Safe to call once per process; later
/// calls are no-ops if a subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = ::tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Span field names shared by pipeline phases so downstream log processors
/// can aggregate on a stable key regardless of which phase emitted them.
pub mod fields {
    pub const FILE_COUNT: &str = "file_count";
    pub const FINDING_COUNT: &str = "finding_count";
    pub const DURATION_MS: &str = "duration_ms";
    pub const PHASE: &str = "phase";
}
