//! 网络图模块
//!
//! 此模块包含路径计算使用的图结构：标识符、有向链路、多重图，以及从拓扑快照建图。

// 子模块声明
mod id;
mod link;
mod network;
mod builder;

// 重新导出公共接口
pub use id::{EdgeId, NodeId, TpId, VertexId};
pub use link::Link;
pub use network::Network;
pub use builder::{BuildStats, GraphBuilder};
