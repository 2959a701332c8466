//! Quality-gate enforcement configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QualityGatesConfig {
    /// Minimum passing score, 0-100. Default: 70.
    pub min_score: Option<u32>,
    /// Severity level that fails the gate: "info" | "warning" | "error". Default: "error".
    pub fail_on: Option<String>,
    #[serde(default)]
    pub required_gates: Vec<String>,
    #[serde(default)]
    pub enabled_gates: Vec<String>,
    /// Ramp gate strictness up gradually instead of failing hard immediately.
    pub progressive_enforcement: Option<bool>,
    /// Days over which progressive enforcement ramps to full strictness.
    pub ramp_up_period: Option<u32>,
}

impl QualityGatesConfig {
    pub fn effective_min_score(&self) -> u32 {
        self.min_score.unwrap_or(70)
    }

    pub fn effective_fail_on(&self) -> &str {
        self.fail_on.as_deref().unwrap_or("error")
    }
}
