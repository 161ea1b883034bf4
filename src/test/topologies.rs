use std::collections::HashSet;

use crate::net::TpId;
use crate::pce::{Constraint, Objective, PathComputation, PathRequest};
use crate::telemetry::StaticBandwidth;
use crate::topo::fat_tree::{FatTreeOpts, build_fat_tree};
use crate::topo::linear::{LinearOpts, build_linear, host_name};

/// 取主机所接交换机上的端口（主机链路的对端）。
fn attachment_tp(snapshot: &crate::topo::TopologySnapshot, host: &str) -> TpId {
    snapshot
        .links
        .iter()
        .find(|l| l.source.source_node == host)
        .map(|l| l.destination.dest_tp.clone())
        .expect("host is attached")
}

#[test]
fn linear_counts_and_host_attachment() {
    let topo = build_linear(&LinearOpts::default());
    assert_eq!(topo.nodes.len(), 6);
    // 3 switch-switch duplex pairs + 2 host duplex pairs.
    assert_eq!(topo.links.len(), 10);
    assert_eq!(attachment_tp(&topo, &host_name(1)), TpId::from("openflow:1:1"));
    assert_eq!(attachment_tp(&topo, &host_name(2)), TpId::from("openflow:4:1"));

    let bare = build_linear(&LinearOpts {
        switches: 3,
        with_hosts: false,
    });
    assert_eq!(bare.nodes.len(), 3);
    assert_eq!(bare.links.len(), 4);
}

#[test]
fn host_names_look_like_mac_addresses() {
    assert_eq!(host_name(1), "host:00:00:00:00:00:01");
    assert_eq!(host_name(0x1234), "host:00:00:00:00:12:34");
}

#[test]
fn fat_tree_counts_and_unique_ports() {
    let opts = FatTreeOpts { k: 4 };
    let topo = build_fat_tree(&opts);

    let half = opts.k / 2;
    assert_eq!(topo.hosts.len(), opts.k * half * half);
    assert_eq!(topo.edge_switches.len(), opts.k * half);
    assert_eq!(topo.agg_switches.len(), opts.k * half);
    assert_eq!(topo.core_switches.len(), half * half);
    assert_eq!(
        topo.snapshot.nodes.len(),
        topo.hosts.len() + topo.edge_switches.len() + topo.agg_switches.len() + topo.core_switches.len()
    );

    // Every source termination point is used by exactly one link.
    let mut seen = HashSet::new();
    for link in &topo.snapshot.links {
        assert!(seen.insert(link.source.source_tp.clone()), "duplicate tp {:?}", link.source.source_tp);
    }
    // host, edge-agg and agg-core layers, each as duplex pairs.
    let expected = 2 * (topo.hosts.len() + opts.k * half * half + opts.k * half * half);
    assert_eq!(topo.snapshot.links.len(), expected);
}

#[test]
fn fat_tree_shortest_paths_have_expected_lengths_and_core_usage() {
    let topo = build_fat_tree(&FatTreeOpts { k: 4 });
    let engine = PathComputation::new(StaticBandwidth::new().with_fallback(10_000));
    let core: HashSet<&str> = topo.core_switches.iter().map(String::as_str).collect();

    let src = attachment_tp(&topo.snapshot, topo.host(0, 0, 0));
    let cases = [
        (topo.host(0, 0, 1), 0),
        (topo.host(0, 1, 0), 2),
        (topo.host(1, 0, 0), 4),
    ];
    for (dst_host, hops) in cases {
        let dst = attachment_tp(&topo.snapshot, dst_host);
        let path = engine
            .compute(&PathRequest::new(src.clone(), dst), &topo.snapshot)
            .expect("fat-tree is connected");
        assert_eq!(path.hop_count(), hops, "path to {dst_host}: {path:?}");

        let via_core = path
            .endpoints()
            .iter()
            .any(|tp| core.contains(tp.node_id().unwrap().as_str()));
        assert_eq!(via_core, hops == 4, "core usage in {path:?}");
        assert!(path.endpoints().iter().all(|tp| !tp.as_str().starts_with("host")));
    }
}

#[test]
fn fat_tree_widest_path_avoids_congested_core() {
    let topo = build_fat_tree(&FatTreeOpts { k: 4 });
    let src = attachment_tp(&topo.snapshot, topo.host(0, 0, 0));
    let dst = attachment_tp(&topo.snapshot, topo.host(1, 0, 0));

    // Links leaving the first core switch are congested.
    let congested = topo.core(0, 0).to_string();
    let table: StaticBandwidth = topo
        .snapshot
        .links
        .iter()
        .map(|l| {
            let bw = if l.source.source_node == congested { 1 } else { 10_000 };
            (l.source.source_tp.clone(), bw)
        })
        .collect();
    let engine = PathComputation::new(table);

    let req = PathRequest::new(src, dst)
        .objective(Objective::MaxBandwidth)
        .constraint(Constraint::max_hops(4));
    let path = engine.compute(&req, &topo.snapshot).unwrap();
    assert_eq!(path.hop_count(), 4);
    assert_eq!(path.bottleneck(), Some(10_000));
    assert!(path.endpoints().iter().all(|tp| tp.node_id().unwrap().as_str() != congested));
}
