//! Opt-in switch for the host application's own telemetry, if any.
//!
//! This crate does not collect or transmit anything itself; the flag only
//! exists so `drift.toml` round-trips a setting the host application reads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: Option<bool>,
}
