//! 路径计算引擎
//!
//! 每次调用都是同步的：求阈值、建图（逐条链路查询带宽）、运行一个求解器。
//! 图和求解器状态都归本次调用所有，多个线程可以并发调用同一个引擎。
//! 带宽查询一律经过 [`TimeoutProvider`]，超时与线程数取自 [`EngineConfig`]。

use tracing::{debug, info};

use super::config::EngineConfig;
use super::constraint::{Constraint, Thresholds};
use super::request::{Objective, PathRequest};
use crate::error::{Error, Result};
use crate::net::{GraphBuilder, NodeId, TpId};
use crate::routing::{self, ComputedPath, NoPathReason};
use crate::telemetry::{BandwidthProvider, CancelToken, TimeoutProvider};
use crate::topo::TopologySnapshot;

pub struct PathComputation<P> {
    provider: TimeoutProvider<P>,
    config: EngineConfig,
}

impl<P: BandwidthProvider + 'static> PathComputation<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(provider: P, config: EngineConfig) -> Self {
        let provider =
            TimeoutProvider::with_workers(provider, config.telemetry_timeout(), config.telemetry_workers);
        Self { provider, config }
    }

    /// 使用外部的取消信号；触发后进行中的计算以 [`Error::Cancelled`] 结束。
    pub fn with_cancel(self, cancel: CancelToken) -> Self {
        Self {
            provider: self.provider.with_cancel(cancel),
            config: self.config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        self.provider.inner()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        self.provider.cancel_token()
    }

    /// 按请求中的目标选择求解器。
    pub fn compute(&self, request: &PathRequest, topology: &TopologySnapshot) -> Result<ComputedPath> {
        match request.objective {
            Objective::ShortestPath => self.shortest_path(
                &request.source,
                &request.destination,
                topology,
                &request.constraints,
            ),
            Objective::MaxBandwidth => self.max_bandwidth_path(
                &request.source,
                &request.destination,
                topology,
                &request.constraints,
            ),
        }
    }

    /// 满足带宽下限的最少跳数路径。
    ///
    /// 低于下限的链路在建图时就被丢弃；跳数上限在求解后检查
    /// （BFS 已经给出了最少跳数，超限即说明不存在可行路径）。
    #[tracing::instrument(skip(self, topology, constraints), fields(src = %src, dst = %dst))]
    pub fn shortest_path(
        &self,
        src: &TpId,
        dst: &TpId,
        topology: &TopologySnapshot,
        constraints: &[Constraint],
    ) -> Result<ComputedPath> {
        let (th, s, d) = prepare(src, dst, constraints)?;
        debug!(min_bandwidth = th.min_bandwidth, max_hops = ?th.max_hops, "约束阈值");

        let net = GraphBuilder::new(&self.provider, &self.config.host_marker)
            .min_bandwidth(Some(th.min_bandwidth))
            .build(topology)?;
        let path = routing::shortest_path(&net, &s, &d).map_err(|r| no_path(src, dst, r))?;
        if !th.allows_hops(path.hop_count()) {
            return Err(no_path(src, dst, NoPathReason::HopLimitExceeded));
        }

        info!(hops = path.hop_count(), "最短路径计算完成");
        Ok(path)
    }

    /// 满足跳数上限的最大瓶颈带宽路径。
    ///
    /// 带宽是优化目标而不是过滤条件，建图时不做门限过滤；
    /// 若最优瓶颈仍低于带宽下限则不存在可行路径。
    #[tracing::instrument(skip(self, topology, constraints), fields(src = %src, dst = %dst))]
    pub fn max_bandwidth_path(
        &self,
        src: &TpId,
        dst: &TpId,
        topology: &TopologySnapshot,
        constraints: &[Constraint],
    ) -> Result<ComputedPath> {
        let (th, s, d) = prepare(src, dst, constraints)?;
        debug!(min_bandwidth = th.min_bandwidth, max_hops = ?th.max_hops, "约束阈值");

        let net = GraphBuilder::new(&self.provider, &self.config.host_marker).build(topology)?;
        let path =
            routing::widest_path(&net, &s, &d, th.max_hops).map_err(|r| no_path(src, dst, r))?;
        if path.bottleneck().is_some_and(|bw| bw < th.min_bandwidth) {
            return Err(no_path(src, dst, NoPathReason::BelowMinBandwidth));
        }

        info!(
            hops = path.hop_count(),
            bottleneck = ?path.bottleneck(),
            "最宽路径计算完成"
        );
        Ok(path)
    }
}

fn prepare(src: &TpId, dst: &TpId, constraints: &[Constraint]) -> Result<(Thresholds, NodeId, NodeId)> {
    let s = src.node_id()?;
    let d = dst.node_id()?;
    Thresholds::validate(constraints)?;
    Ok((Thresholds::evaluate(constraints), s, d))
}

fn no_path(src: &TpId, dst: &TpId, reason: NoPathReason) -> Error {
    Error::NoPathFound {
        src: src.0.clone(),
        dst: dst.0.clone(),
        reason,
    }
}
