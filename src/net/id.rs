//! 标识符类型
//!
//! 定义拓扑节点与端口（termination point）的标识符。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 端口标识符，形如 `openflow:1:2`，表示一条链路的一端。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TpId(pub String);

impl TpId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 取设备级节点标识（前两段）。
    pub fn node_id(&self) -> Result<NodeId> {
        NodeId::from_endpoint(&self.0)
    }
}

impl fmt::Display for TpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TpId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TpId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// 设备级节点标识符
///
/// 由端口标识截取前两个以 `:` 分隔的段得到（如 `openflow:1:2` -> `openflow:1`），
/// 更细的端口后缀被丢弃。共享前缀的端口视为同一个图顶点。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// 从端口（或节点）标识中提取节点标识。
    ///
    /// 少于两个非空段的输入返回 [`Error::InvalidEndpointIdentifier`]。
    pub fn from_endpoint(raw: &str) -> Result<NodeId> {
        let mut parts = raw.split(':');
        match (parts.next(), parts.next()) {
            (Some(device), Some(group)) if !device.is_empty() && !group.is_empty() => {
                Ok(NodeId(format!("{device}:{group}")))
            }
            _ => Err(Error::InvalidEndpointIdentifier(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 节点标识中是否带有主机标记（只参与接入，不参与设备间路由）。
    pub fn is_host(&self, marker: &str) -> bool {
        !marker.is_empty() && self.0.contains(marker)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 图内部顶点下标（arena 下标，仅在一次计算内有效）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// 图内部边下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);
