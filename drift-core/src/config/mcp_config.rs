//! External-interface (napi/MCP-style) surface configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct McpConfig {
    pub cache_ttl_seconds: Option<u64>,
    pub max_response_tokens: Option<u32>,
    pub transport: Option<String>,
    #[serde(default)]
    pub enabled_tools: Vec<String>,
}
