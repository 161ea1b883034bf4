//! 链路类型
//!
//! 定义图中的有向边：两端端口与测得的可用带宽。

use std::cmp::Ordering;

use super::id::{TpId, VertexId};

/// 有向链路（图中的一条边）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub from: VertexId,
    pub to: VertexId,
    pub src_tp: TpId,
    pub dst_tp: TpId,
    /// 可用带宽（遥测查询结果，失败时为 0）
    pub bandwidth: u64,
}

impl Link {
    /// 宽路径排序：带宽降序；带宽相同时按源端口、目的端口字典序升序。
    pub fn widest_first(a: &Link, b: &Link) -> Ordering {
        b.bandwidth
            .cmp(&a.bandwidth)
            .then_with(|| a.src_tp.cmp(&b.src_tp))
            .then_with(|| a.dst_tp.cmp(&b.dst_tp))
    }
}
