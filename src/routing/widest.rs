//! 跳数受限的最宽路径（最大瓶颈带宽）
//!
//! 按带宽从大到小逐条把边插入一张只有顶点的工作图，同时增量维护
//! 从源点出发的最少跳数。插入某条边后，目的节点的跳数第一次落入上限时，
//! 当前工作图里的最少跳路径就是瓶颈最大的可行路径：工作图中所有边的带宽
//! 都不小于刚插入的这条边，而任何更晚才连通的路径瓶颈只会更小。

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::path::{ComputedPath, NoPathReason, trace_back};
use crate::net::{EdgeId, Link, Network, NodeId};

#[tracing::instrument(skip(net), fields(src = %src, dst = %dst, max_hops = ?max_hops))]
pub fn widest_path(
    net: &Network,
    src: &NodeId,
    dst: &NodeId,
    max_hops: Option<u64>,
) -> Result<ComputedPath, NoPathReason> {
    let s = net.vertex(src).ok_or(NoPathReason::UnknownSource)?;
    let d = net.vertex(dst).ok_or(NoPathReason::UnknownDestination)?;
    if s == d {
        return Ok(ComputedPath::default());
    }
    let limit = max_hops.unwrap_or(u64::MAX);

    let mut order: Vec<&Link> = net.links().iter().collect();
    order.sort_by(|a, b| Link::widest_first(a, b));

    let n = net.node_count();
    let mut work = net.vertices_only();
    let mut hops: Vec<Option<u64>> = vec![None; n];
    // 前驱边的下标属于工作图
    let mut pred: Vec<Option<EdgeId>> = vec![None; n];
    let mut q = VecDeque::new();
    hops[s.0] = Some(0);

    for link in order {
        let (u, v) = (link.from, link.to);
        let e = work.push_link(link.clone());

        let Some(hu) = hops[u.0] else {
            continue;
        };
        if !improves(hops[v.0], hu + 1) {
            continue;
        }
        hops[v.0] = Some(hu + 1);
        pred[v.0] = Some(e);
        q.push_back(v);

        // 只从跳数变小的节点继续向外松弛
        while let Some(x) = q.pop_front() {
            let Some(hx) = hops[x.0] else {
                continue;
            };
            for &oe in work.out_edges(x) {
                let y = work.link(oe).to;
                if improves(hops[y.0], hx + 1) {
                    hops[y.0] = Some(hx + 1);
                    pred[y.0] = Some(oe);
                    q.push_back(y);
                }
            }
        }
        trace!(bandwidth = link.bandwidth, dst_hops = ?hops[d.0], "插入边");

        match hops[d.0] {
            Some(hd) if hd <= limit => {
                let edges = trace_back(&work, &pred, s, d);
                debug!(hops = hd, bottleneck = link.bandwidth, "找到最宽路径");
                return Ok(ComputedPath::from_edges(&work, &edges));
            }
            _ => {}
        }
    }

    match hops[d.0] {
        Some(hd) => {
            debug!(min_hops = hd, "所有路径都超过跳数上限");
            Err(NoPathReason::HopLimitExceeded)
        }
        None => Err(NoPathReason::Unreachable),
    }
}

fn improves(current: Option<u64>, candidate: u64) -> bool {
    current.is_none_or(|h| candidate < h)
}
