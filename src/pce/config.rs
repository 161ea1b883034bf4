use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::telemetry::DEFAULT_TELEMETRY_WORKERS;

pub const DEFAULT_TELEMETRY_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_HOST_MARKER: &str = "host";

/// 路径计算引擎配置（JSON，所有字段可省略）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 单次带宽查询的超时（毫秒）
    #[serde(default = "default_timeout_ms")]
    pub telemetry_timeout_ms: u64,
    /// 执行带宽查询的常驻线程数
    #[serde(default = "default_workers")]
    pub telemetry_workers: usize,
    /// 节点标识中包含该子串即视为主机
    #[serde(default = "default_host_marker")]
    pub host_marker: String,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TELEMETRY_TIMEOUT_MS
}

fn default_workers() -> usize {
    DEFAULT_TELEMETRY_WORKERS
}

fn default_host_marker() -> String {
    DEFAULT_HOST_MARKER.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            telemetry_timeout_ms: default_timeout_ms(),
            telemetry_workers: default_workers(),
            host_marker: default_host_marker(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_millis(self.telemetry_timeout_ms)
    }
}
