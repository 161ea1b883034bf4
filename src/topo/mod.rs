//! 拓扑快照与合成拓扑构建
//!
//! 快照是路径计算的输入；线性与 fat-tree 构建器用于测试和 `gen_topology`。

mod snapshot;
pub mod fat_tree;
pub mod linear;

pub use snapshot::{LinkDestination, LinkSource, TopoLink, TopoNode, TopologySnapshot};
