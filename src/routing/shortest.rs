//! 按最短跳数的路径
//!
//! 每条边权重为 1，在（已按带宽过滤的）图上做 BFS。
//! 同一层的邻居按插入顺序访问，结果对相同输入是确定的。

use std::collections::VecDeque;

use tracing::debug;

use super::path::{ComputedPath, NoPathReason, trace_back};
use crate::net::{EdgeId, Network, NodeId};

#[tracing::instrument(skip(net), fields(src = %src, dst = %dst))]
pub fn shortest_path(
    net: &Network,
    src: &NodeId,
    dst: &NodeId,
) -> Result<ComputedPath, NoPathReason> {
    let s = net.vertex(src).ok_or(NoPathReason::UnknownSource)?;
    let d = net.vertex(dst).ok_or(NoPathReason::UnknownDestination)?;
    if s == d {
        return Ok(ComputedPath::default());
    }

    let n = net.node_count();
    let mut seen = vec![false; n];
    let mut pred: Vec<Option<EdgeId>> = vec![None; n];
    let mut q = VecDeque::new();
    seen[s.0] = true;
    q.push_back(s);

    'bfs: while let Some(v) = q.pop_front() {
        for &e in net.out_edges(v) {
            let next = net.link(e).to;
            if seen[next.0] {
                continue;
            }
            seen[next.0] = true;
            pred[next.0] = Some(e);
            if next == d {
                break 'bfs;
            }
            q.push_back(next);
        }
    }

    if !seen[d.0] {
        debug!("目的节点不可达");
        return Err(NoPathReason::Unreachable);
    }

    let edges = trace_back(net, &pred, s, d);
    debug!(hops = edges.len(), "找到最短路径");
    Ok(ComputedPath::from_edges(net, &edges))
}
