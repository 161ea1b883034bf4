//! 线性拓扑构建

use super::snapshot::TopologySnapshot;

/// 线性拓扑配置选项
#[derive(Debug, Clone)]
pub struct LinearOpts {
    pub switches: usize,
    /// 是否在两端各挂一台主机
    pub with_hosts: bool,
}

impl Default for LinearOpts {
    fn default() -> Self {
        Self {
            switches: 4,
            with_hosts: true,
        }
    }
}

/// 构建线性拓扑
///
/// 拓扑结构：h1 <-> s1 <-> s2 <-> ... <-> sN <-> h2
/// 交换机 `openflow:i` 的端口 1 接主机，端口 2 接上一跳，端口 3 接下一跳。
pub fn build_linear(opts: &LinearOpts) -> TopologySnapshot {
    let mut topo = TopologySnapshot {
        topology_id: Some("flow:1".to_string()),
        ..Default::default()
    };
    let names: Vec<String> = (1..=opts.switches).map(|i| format!("openflow:{i}")).collect();
    for name in &names {
        topo.add_node(name.clone());
    }

    for pair in names.windows(2) {
        topo.add_duplex(&pair[0], 3, &pair[1], 2);
    }

    if opts.with_hosts && !names.is_empty() {
        let first = &names[0];
        let last = &names[names.len() - 1];
        let h1 = host_name(1);
        let h2 = host_name(2);
        topo.add_node(h1.clone());
        topo.add_node(h2.clone());
        topo.add_duplex(&h1, 0, first, 1);
        topo.add_duplex(&h2, 0, last, 1);
    }

    topo
}

/// OpenDaylight 风格的主机节点名（`host:` + MAC）
pub fn host_name(n: usize) -> String {
    let b = n.to_be_bytes();
    let l = b.len();
    format!(
        "host:00:00:00:{:02x}:{:02x}:{:02x}",
        b[l - 3],
        b[l - 2],
        b[l - 1]
    )
}
