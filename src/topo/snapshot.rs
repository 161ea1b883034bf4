use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::net::TpId;

/// 一份不可变的拓扑快照（由拓扑发现模块提供）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologySnapshot {
    #[serde(default)]
    pub topology_id: Option<String>,
    #[serde(default)]
    pub nodes: Vec<TopoNode>,
    #[serde(default)]
    pub links: Vec<TopoLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopoNode {
    pub node_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopoLink {
    #[serde(default)]
    pub link_id: Option<String>,
    pub source: LinkSource,
    pub destination: LinkDestination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSource {
    pub source_node: String,
    pub source_tp: TpId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDestination {
    pub dest_node: String,
    pub dest_tp: TpId,
}

impl TopologySnapshot {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn add_node(&mut self, node_id: impl Into<String>) {
        self.nodes.push(TopoNode {
            node_id: node_id.into(),
        });
    }

    /// 添加一条单向链路。端口标识为 `<node>:<port>`。
    pub fn add_link(&mut self, src_node: &str, src_port: u32, dst_node: &str, dst_port: u32) {
        let source_tp = TpId(format!("{src_node}:{src_port}"));
        self.links.push(TopoLink {
            link_id: Some(source_tp.0.clone()),
            source: LinkSource {
                source_node: src_node.to_string(),
                source_tp,
            },
            destination: LinkDestination {
                dest_node: dst_node.to_string(),
                dest_tp: TpId(format!("{dst_node}:{dst_port}")),
            },
        });
    }

    /// 添加一对方向相反的链路。
    pub fn add_duplex(&mut self, a: &str, a_port: u32, b: &str, b_port: u32) {
        self.add_link(a, a_port, b, b_port);
        self.add_link(b, b_port, a, a_port);
    }
}
