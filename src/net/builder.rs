//! 拓扑快照 -> 网络图
//!
//! 每条链路查询一次源端口带宽。主机链路丢弃；给定带宽门限时，
//! 低于门限的链路不入图。节点列表里格式不对的标识只记日志并跳过，
//! 链路端点格式不对则整次建图失败。

use tracing::{debug, info, trace, warn};

use super::id::NodeId;
use super::network::Network;
use crate::error::{Error, Result, TelemetryError};
use crate::telemetry::BandwidthProvider;
use crate::topo::TopologySnapshot;

#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub host_links: usize,
    pub filtered_links: usize,
    pub telemetry_failures: usize,
    pub malformed_nodes: usize,
}

pub struct GraphBuilder<'a, P: ?Sized> {
    provider: &'a P,
    host_marker: &'a str,
    min_bandwidth: Option<u64>,
}

impl<'a, P: BandwidthProvider + ?Sized> GraphBuilder<'a, P> {
    pub fn new(provider: &'a P, host_marker: &'a str) -> Self {
        Self {
            provider,
            host_marker,
            min_bandwidth: None,
        }
    }

    /// 设置带宽门限（只在最短路径模式下使用）。
    pub fn min_bandwidth(mut self, min_bandwidth: Option<u64>) -> Self {
        self.min_bandwidth = min_bandwidth;
        self
    }

    pub fn build(&self, topology: &TopologySnapshot) -> Result<Network> {
        self.build_with_stats(topology).map(|(net, _)| net)
    }

    #[tracing::instrument(
        skip(self, topology),
        fields(
            nodes = topology.nodes.len(),
            links = topology.links.len(),
            min_bandwidth = ?self.min_bandwidth,
        )
    )]
    pub fn build_with_stats(&self, topology: &TopologySnapshot) -> Result<(Network, BuildStats)> {
        let mut net = Network::new();
        let mut stats = BuildStats::default();

        for node in &topology.nodes {
            let id = match NodeId::from_endpoint(&node.node_id) {
                Ok(id) => id,
                Err(err) => {
                    warn!(node = %node.node_id, error = %err, "节点标识格式错误，跳过");
                    stats.malformed_nodes += 1;
                    continue;
                }
            };
            if id.is_host(self.host_marker) {
                continue;
            }
            net.add_node(id);
        }

        let threshold = self.min_bandwidth.unwrap_or(0);
        for link in &topology.links {
            let src = NodeId::from_endpoint(&link.source.source_node)?;
            let dst = NodeId::from_endpoint(&link.destination.dest_node)?;
            if src.is_host(self.host_marker) || dst.is_host(self.host_marker) {
                trace!(src = %src, dst = %dst, "跳过主机链路");
                stats.host_links += 1;
                continue;
            }

            let src_tp = link.source.source_tp.clone();
            let bandwidth = match self.provider.tx_bandwidth(&src_tp) {
                Ok(bw) => bw,
                Err(TelemetryError::Cancelled) => return Err(Error::Cancelled),
                Err(err) => {
                    warn!(tp = %src_tp, error = %err, "带宽查询失败，按 0 处理");
                    stats.telemetry_failures += 1;
                    0
                }
            };

            if bandwidth < threshold {
                debug!(tp = %src_tp, bandwidth, threshold, "带宽低于门限，丢弃链路");
                stats.filtered_links += 1;
                continue;
            }

            net.connect(src, dst, src_tp, link.destination.dest_tp.clone(), bandwidth);
        }

        info!(
            vertices = net.node_count(),
            edges = net.link_count(),
            host_links = stats.host_links,
            filtered_links = stats.filtered_links,
            telemetry_failures = stats.telemetry_failures,
            malformed_nodes = stats.malformed_nodes,
            "网络图构建完成"
        );
        Ok((net, stats))
    }
}
