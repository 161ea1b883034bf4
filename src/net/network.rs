//! 网络图
//!
//! 以邻接表表示的有向多重图。顶点与边都存放在按下标寻址的 Vec 中，
//! 插入 O(1)，一次计算结束时整体释放。

use std::collections::HashMap;

use super::id::{EdgeId, NodeId, TpId, VertexId};
use super::link::Link;

/// 有向多重图（同一对节点之间可以有多条边）
#[derive(Debug, Default, Clone)]
pub struct Network {
    names: Vec<NodeId>,
    index: HashMap<NodeId, VertexId>,
    links: Vec<Link>,
    /// 出边表：`out[v]` 为从 v 出发的所有边（按插入顺序）
    out: Vec<Vec<EdgeId>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加顶点；已存在时返回原有下标。
    pub fn add_node(&mut self, id: NodeId) -> VertexId {
        if let Some(&v) = self.index.get(&id) {
            return v;
        }
        let v = VertexId(self.names.len());
        self.index.insert(id.clone(), v);
        self.names.push(id);
        self.out.push(Vec::new());
        v
    }

    /// 添加一条有向边，端点不存在时自动创建。
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        src_tp: TpId,
        dst_tp: TpId,
        bandwidth: u64,
    ) -> EdgeId {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.push_link(Link {
            from,
            to,
            src_tp,
            dst_tp,
            bandwidth,
        })
    }

    /// 按已有的顶点下标插入边（用于在同一顶点集合上重建工作图）。
    pub(crate) fn push_link(&mut self, link: Link) -> EdgeId {
        debug_assert!(link.from.0 < self.names.len() && link.to.0 < self.names.len());
        let id = EdgeId(self.links.len());
        self.out[link.from.0].push(id);
        self.links.push(link);
        id
    }

    /// 复制顶点集合，不含任何边。
    pub fn vertices_only(&self) -> Network {
        Network {
            names: self.names.clone(),
            index: self.index.clone(),
            links: Vec::with_capacity(self.links.len()),
            out: vec![Vec::new(); self.names.len()],
        }
    }

    pub fn vertex(&self, id: &NodeId) -> Option<VertexId> {
        self.index.get(id).copied()
    }

    pub fn node_id(&self, v: VertexId) -> &NodeId {
        &self.names[v.0]
    }

    pub fn link(&self, e: EdgeId) -> &Link {
        &self.links[e.0]
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.out[v.0]
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
