//! Workspace database backup retention tuning (backs `SqliteWorkspaceStorage::backup`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackupConfig {
    pub max_operational: Option<u32>,
    pub max_daily: Option<u32>,
    pub backup_interval: Option<u64>,
    pub max_backups: Option<u32>,
}
