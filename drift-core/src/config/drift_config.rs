//! Top-level `drift.toml` configuration — the merge of file config and CLI overrides.

use serde::{Deserialize, Serialize};

use super::analysis_config::AnalysisConfig;
use super::backup_config::BackupConfig;
use super::mcp_config::McpConfig;
use super::quality_gates_config::QualityGatesConfig;
use super::scan_config::ScanConfig;
use super::telemetry_config::TelemetryConfig;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DriftConfig {
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
    pub quality_gates: QualityGatesConfig,
    pub mcp: McpConfig,
    pub backup: BackupConfig,
    pub telemetry: TelemetryConfig,
}

/// Command-line flags that take precedence over `drift.toml` values.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_max_file_size: Option<u64>,
    pub scan_threads: Option<usize>,
    pub gate_fail_on: Option<String>,
    pub gate_min_score: Option<u32>,
}

impl DriftConfig {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "drift.toml".to_string(),
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "drift.toml".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &Self) -> Result<(), ConfigError> {
        if let Some(threshold) = config.analysis.dominance_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.dominance_threshold".to_string(),
                    message: format!("must be between 0.0 and 1.0, got {threshold}"),
                });
            }
        }
        if let Some(score) = config.quality_gates.min_score {
            if score > 100 {
                return Err(ConfigError::ValidationFailed {
                    field: "quality_gates.min_score".to_string(),
                    message: format!("must be between 0 and 100, got {score}"),
                });
            }
        }
        if let Some(size) = config.scan.max_file_size {
            if size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Applies CLI flags over a loaded config; CLI values always win.
    fn apply_cli_overrides(mut self, cli: &CliOverrides) -> Self {
        if let Some(size) = cli.scan_max_file_size {
            self.scan.max_file_size = Some(size);
        }
        if let Some(threads) = cli.scan_threads {
            self.scan.threads = Some(threads);
        }
        if let Some(fail_on) = &cli.gate_fail_on {
            self.quality_gates.fail_on = Some(fail_on.clone());
        }
        if let Some(min_score) = cli.gate_min_score {
            self.quality_gates.min_score = Some(min_score);
        }
        self
    }

    /// Loads `<project_root>/drift.toml` (if present) and layers CLI overrides on top.
    pub fn load(
        project_root: &std::path::Path,
        cli: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let toml_path = project_root.join("drift.toml");
        let config = if toml_path.exists() {
            let contents = std::fs::read_to_string(&toml_path).map_err(|e| ConfigError::Io {
                message: e.to_string(),
            })?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };
        let config = match cli {
            Some(cli) => config.apply_cli_overrides(cli),
            None => config,
        };
        Self::validate(&config)?;
        Ok(config)
    }
}
