use serde::{Deserialize, Serialize};

use super::constraint::Constraint;
use crate::error::Result;
use crate::net::TpId;
use crate::routing::{ComputedPath, Hop, NoPathReason};

/// 路径计算目标
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// 满足带宽下限的最少跳数路径
    #[default]
    ShortestPath,
    /// 满足跳数上限的最大瓶颈带宽路径
    MaxBandwidth,
}

/// 一次路径计算请求（北向接口交付的内容）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRequest {
    pub source: TpId,
    pub destination: TpId,
    #[serde(default)]
    pub objective: Objective,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl PathRequest {
    pub fn new(source: impl Into<TpId>, destination: impl Into<TpId>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            objective: Objective::default(),
            constraints: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// 计算结果的对外表示
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathReply {
    Found {
        path: Vec<TpId>,
        hops: Vec<Hop>,
        hop_count: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        bottleneck: Option<u64>,
    },
    NoPath {
        reason: NoPathReason,
    },
}

impl From<&ComputedPath> for PathReply {
    fn from(path: &ComputedPath) -> Self {
        PathReply::Found {
            path: path.endpoints(),
            hops: path.hops.clone(),
            hop_count: path.hop_count(),
            bottleneck: path.bottleneck(),
        }
    }
}
