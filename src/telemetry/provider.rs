use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result as CrateResult, TelemetryError};
use crate::net::TpId;

/// 带宽遥测接口
///
/// 同步查询某个端口当前的可用发送带宽。实现必须可以在多个计算线程间共享。
pub trait BandwidthProvider: Send + Sync {
    fn tx_bandwidth(&self, tp: &TpId) -> Result<u64, TelemetryError>;
}

impl<F> BandwidthProvider for F
where
    F: Fn(&TpId) -> Result<u64, TelemetryError> + Send + Sync,
{
    fn tx_bandwidth(&self, tp: &TpId) -> Result<u64, TelemetryError> {
        self(tp)
    }
}

/// 基于静态表的带宽提供者（离线计算、测试与 CLI 使用）
///
/// JSON 形式为 `{ "openflow:1:2": 1000, ... }`。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticBandwidth {
    table: HashMap<TpId, u64>,
    #[serde(skip)]
    fallback: Option<u64>,
}

impl StaticBandwidth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> CrateResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 表中没有的端口返回该值，而不是报错。
    pub fn with_fallback(mut self, bandwidth: u64) -> Self {
        self.fallback = Some(bandwidth);
        self
    }

    pub fn set(&mut self, tp: impl Into<TpId>, bandwidth: u64) -> &mut Self {
        self.table.insert(tp.into(), bandwidth);
        self
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl BandwidthProvider for StaticBandwidth {
    fn tx_bandwidth(&self, tp: &TpId) -> Result<u64, TelemetryError> {
        self.table
            .get(tp)
            .copied()
            .or(self.fallback)
            .ok_or_else(|| TelemetryError::UnknownEndpoint(tp.0.clone()))
    }
}

impl<K: Into<TpId>> FromIterator<(K, u64)> for StaticBandwidth {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            fallback: None,
        }
    }
}
