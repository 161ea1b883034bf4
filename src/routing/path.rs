use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::net::{EdgeId, Network, TpId, VertexId};

/// 找不到路径的原因
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoPathReason {
    #[error("source is not in the graph")]
    UnknownSource,
    #[error("destination is not in the graph")]
    UnknownDestination,
    #[error("destination is unreachable")]
    Unreachable,
    #[error("every route exceeds the hop limit")]
    HopLimitExceeded,
    #[error("best route is below the minimum bandwidth")]
    BelowMinBandwidth,
}

/// 路径中的一跳
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub src_tp: TpId,
    pub dst_tp: TpId,
    pub bandwidth: u64,
}

/// 计算得到的路径（源到目的方向）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedPath {
    pub hops: Vec<Hop>,
}

impl ComputedPath {
    pub(crate) fn from_edges(net: &Network, edges: &[EdgeId]) -> Self {
        let hops = edges
            .iter()
            .map(|&e| {
                let link = net.link(e);
                Hop {
                    src_tp: link.src_tp.clone(),
                    dst_tp: link.dst_tp.clone(),
                    bandwidth: link.bandwidth,
                }
            })
            .collect();
        Self { hops }
    }

    /// 每一跳的源端口，即对外返回的路径。
    pub fn endpoints(&self) -> Vec<TpId> {
        self.hops.iter().map(|h| h.src_tp.clone()).collect()
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// 瓶颈带宽（路径上最小的链路带宽）；零跳路径没有瓶颈。
    pub fn bottleneck(&self) -> Option<u64> {
        self.hops.iter().map(|h| h.bandwidth).min()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// 沿前驱边从 `dst` 回溯到 `src`，返回正向的边序列。
pub(crate) fn trace_back(
    net: &Network,
    pred: &[Option<EdgeId>],
    src: VertexId,
    dst: VertexId,
) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let mut v = dst;
    while v != src {
        let Some(e) = pred[v.0] else {
            debug_assert!(false, "broken predecessor chain at {v:?}");
            break;
        };
        edges.push(e);
        v = net.link(e).from;
        if edges.len() > net.node_count() {
            debug_assert!(false, "predecessor cycle");
            break;
        }
    }
    edges.reverse();
    edges
}
