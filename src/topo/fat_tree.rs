//! Fat-tree 拓扑构建

use std::collections::HashMap;

use super::linear::host_name;
use super::snapshot::TopologySnapshot;

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub k: usize,
}

impl Default for FatTreeOpts {
    fn default() -> Self {
        Self { k: 4 }
    }
}

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub k: usize,
    pub snapshot: TopologySnapshot,
    pub hosts: Vec<String>,
    pub edge_switches: Vec<String>,
    pub agg_switches: Vec<String>,
    pub core_switches: Vec<String>,
}

impl FatTreeTopology {
    fn half(&self) -> usize {
        self.k / 2
    }

    pub fn host(&self, pod: usize, edge: usize, host: usize) -> &str {
        let half = self.half();
        let idx = (pod * half + edge) * half + host;
        &self.hosts[idx]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> &str {
        let half = self.half();
        let idx = pod * half + edge;
        &self.edge_switches[idx]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> &str {
        let half = self.half();
        let idx = pod * half + agg;
        &self.agg_switches[idx]
    }

    pub fn core(&self, group: usize, index: usize) -> &str {
        let half = self.half();
        let idx = group * half + index;
        &self.core_switches[idx]
    }
}

/// 每个节点独立分配端口号（从 1 开始；主机只有端口 0）。
#[derive(Default)]
struct PortAlloc {
    next: HashMap<String, u32>,
}

impl PortAlloc {
    fn take(&mut self, node: &str) -> u32 {
        let p = self.next.entry(node.to_string()).or_insert(1);
        let port = *p;
        *p += 1;
        port
    }

    fn wire(&mut self, topo: &mut TopologySnapshot, a: &str, b: &str) {
        let pa = self.take(a);
        let pb = self.take(b);
        topo.add_duplex(a, pa, b, pb);
    }
}

pub fn build_fat_tree(opts: &FatTreeOpts) -> FatTreeTopology {
    let k = opts.k;
    assert!(k >= 2 && k % 2 == 0, "fat-tree k must be even and >= 2");

    let half = k / 2;
    let mut topo = TopologySnapshot {
        topology_id: Some("flow:1".to_string()),
        ..Default::default()
    };
    let mut ports = PortAlloc::default();
    let mut next_switch = 1usize;
    let mut add_switch = |topo: &mut TopologySnapshot| {
        let name = format!("openflow:{next_switch}");
        next_switch += 1;
        topo.add_node(name.clone());
        name
    };

    let mut core_switches = Vec::with_capacity(half * half);
    for _ in 0..half * half {
        core_switches.push(add_switch(&mut topo));
    }

    let mut hosts = Vec::with_capacity(k * half * half);
    let mut edge_switches = Vec::with_capacity(k * half);
    let mut agg_switches = Vec::with_capacity(k * half);
    let mut pod_edges: Vec<Vec<String>> = Vec::with_capacity(k);
    let mut pod_aggs: Vec<Vec<String>> = Vec::with_capacity(k);

    for _pod in 0..k {
        let edges: Vec<String> = (0..half).map(|_| add_switch(&mut topo)).collect();
        let aggs: Vec<String> = (0..half).map(|_| add_switch(&mut topo)).collect();

        for edge in &edges {
            for _ in 0..half {
                let host = host_name(hosts.len() + 1);
                topo.add_node(host.clone());
                let port = ports.take(edge);
                topo.add_duplex(&host, 0, edge, port);
                hosts.push(host);
            }
        }

        edge_switches.extend(edges.iter().cloned());
        agg_switches.extend(aggs.iter().cloned());
        pod_edges.push(edges);
        pod_aggs.push(aggs);
    }

    for pod in 0..k {
        for edge in 0..half {
            for agg in 0..half {
                ports.wire(&mut topo, &pod_edges[pod][edge], &pod_aggs[pod][agg]);
            }
        }
    }

    for pod in 0..k {
        for agg in 0..half {
            for index in 0..half {
                let core = &core_switches[agg * half + index];
                ports.wire(&mut topo, &pod_aggs[pod][agg], core);
            }
        }
    }

    FatTreeTopology {
        k,
        snapshot: topo,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
    }
}
