use std::thread;
use std::time::{Duration, Instant};

use super::fixtures::{diamond, duplex, linear_abcd, sw, tp};
use crate::error::TelemetryError;
use crate::net::TpId;
use crate::pce::{Constraint, EngineConfig, Metric, Objective, PathComputation, PathRequest};
use crate::routing::NoPathReason;
use crate::telemetry::{CancelToken, StaticBandwidth};
use crate::topo::TopologySnapshot;
use crate::Error;

fn no_path_reason<T: std::fmt::Debug>(res: crate::Result<T>) -> NoPathReason {
    match res {
        Err(Error::NoPathFound { reason, .. }) => reason,
        other => panic!("expected NoPathFound, got {other:?}"),
    }
}

#[test]
fn linear_shortest_path_without_constraints() {
    let (topo, bw) = linear_abcd([100, 50, 100]);
    let engine = PathComputation::new(bw);
    let path = engine
        .shortest_path(&tp(1, 1), &tp(4, 1), &topo, &[])
        .expect("path");
    assert_eq!(path.endpoints(), vec![tp(1, 3), tp(2, 3), tp(3, 3)]);
}

#[test]
fn linear_shortest_path_with_min_bandwidth_has_no_route() {
    let (topo, bw) = linear_abcd([100, 50, 100]);
    let engine = PathComputation::new(bw);
    let res = engine.shortest_path(&tp(1, 1), &tp(4, 1), &topo, &[Constraint::min_bandwidth(60)]);
    assert_eq!(no_path_reason(res), NoPathReason::Unreachable);
}

#[test]
fn shortest_path_edges_meet_min_bandwidth() {
    // Two routes 1 -> 4: via 2 (narrow, 2 hops) and via 3 -> 5 (wide, 3 hops).
    let mut topo = TopologySnapshot::default();
    let mut bw = StaticBandwidth::new();
    duplex(&mut topo, &mut bw, (1, 1), (2, 1), 20);
    duplex(&mut topo, &mut bw, (2, 2), (4, 1), 20);
    duplex(&mut topo, &mut bw, (1, 2), (3, 1), 90);
    duplex(&mut topo, &mut bw, (3, 2), (5, 1), 90);
    duplex(&mut topo, &mut bw, (5, 2), (4, 2), 90);
    let engine = PathComputation::new(bw);

    let any = engine.shortest_path(&tp(1, 9), &tp(4, 9), &topo, &[]).unwrap();
    assert_eq!(any.hop_count(), 2);

    let wide = engine
        .shortest_path(&tp(1, 9), &tp(4, 9), &topo, &[Constraint::min_bandwidth(50)])
        .unwrap();
    assert_eq!(wide.hop_count(), 3);
    assert!(wide.hops.iter().all(|h| h.bandwidth >= 50));

    let res = engine.shortest_path(
        &tp(1, 9),
        &tp(4, 9),
        &topo,
        &[Constraint::min_bandwidth(50), Constraint::max_hops(2)],
    );
    assert_eq!(no_path_reason(res), NoPathReason::HopLimitExceeded);
}

#[test]
fn diamond_max_bandwidth_path() {
    let (topo, bw) = diamond();
    let engine = PathComputation::new(bw);
    let path = engine
        .max_bandwidth_path(&tp(1, 1), &tp(4, 1), &topo, &[Constraint::max_hops(2)])
        .unwrap();
    assert_eq!(path.endpoints(), vec![tp(1, 2), tp(3, 2)]);
    assert_eq!(path.bottleneck(), Some(100));
}

#[test]
fn max_bandwidth_path_respects_min_bandwidth() {
    let (topo, bw) = diamond();
    let engine = PathComputation::new(bw);
    let res = engine.max_bandwidth_path(
        &tp(1, 1),
        &tp(4, 1),
        &topo,
        &[Constraint::max_hops(2), Constraint::min_bandwidth(500)],
    );
    assert_eq!(no_path_reason(res), NoPathReason::BelowMinBandwidth);
}

#[test]
fn malformed_source_is_rejected_before_any_work() {
    let (topo, _) = diamond();
    let engine = PathComputation::new(|_: &TpId| -> Result<u64, TelemetryError> {
        panic!("telemetry must not be queried for invalid input")
    });
    for objective in [Objective::ShortestPath, Objective::MaxBandwidth] {
        let req = PathRequest::new("nodeonly", "openflow:4:1").objective(objective);
        match engine.compute(&req, &topo) {
            Err(Error::InvalidEndpointIdentifier(raw)) => assert_eq!(raw, "nodeonly"),
            other => panic!("expected InvalidEndpointIdentifier, got {other:?}"),
        }
    }
}

#[test]
fn conflicting_constraint_is_rejected() {
    let (topo, bw) = diamond();
    let engine = PathComputation::new(bw);
    let bad = Constraint {
        metric: Metric::HopCount,
        min: Some(5),
        max: Some(2),
    };
    let res = engine.max_bandwidth_path(&tp(1, 1), &tp(4, 1), &topo, &[bad]);
    assert!(matches!(res, Err(Error::ConflictingConstraints(_))));
}

#[test]
fn unknown_endpoint_is_not_found() {
    let (topo, bw) = diamond();
    let engine = PathComputation::new(bw);
    let res = engine.shortest_path(&tp(1, 1), &tp(99, 1), &topo, &[]);
    assert_eq!(no_path_reason(res), NoPathReason::UnknownDestination);
}

#[test]
fn same_switch_is_a_found_zero_hop_path() {
    let (topo, bw) = diamond();
    let engine = PathComputation::new(bw);
    let path = engine.max_bandwidth_path(&tp(1, 1), &tp(1, 2), &topo, &[]).unwrap();
    assert_eq!(path.hop_count(), 0);
    assert!(path.endpoints().is_empty());
}

#[test]
fn hosts_never_relay_traffic() {
    // openflow:1 and openflow:2 are only joined through a host.
    let host = "host:00:00:00:00:00:01";
    let mut topo = TopologySnapshot::default();
    topo.add_node(sw(1));
    topo.add_node(sw(2));
    topo.add_node(host);
    topo.add_duplex(&sw(1), 1, host, 0);
    topo.add_duplex(host, 1, &sw(2), 1);
    let engine = PathComputation::new(StaticBandwidth::new().with_fallback(1_000));

    for objective in [Objective::ShortestPath, Objective::MaxBandwidth] {
        let req = PathRequest::new(tp(1, 1), tp(2, 1)).objective(objective);
        assert_eq!(
            no_path_reason(engine.compute(&req, &topo)),
            NoPathReason::Unreachable
        );
    }
}

#[test]
fn failed_telemetry_only_excludes_affected_links() {
    let (topo, _) = linear_abcd([0, 0, 0]);
    let provider = |tp: &TpId| -> Result<u64, TelemetryError> {
        if tp.as_str() == "openflow:2:3" {
            Err(TelemetryError::Timeout(std::time::Duration::from_millis(5)))
        } else {
            Ok(100)
        }
    };
    let engine = PathComputation::new(provider);

    let res = engine.shortest_path(&tp(1, 1), &tp(4, 1), &topo, &[Constraint::min_bandwidth(1)]);
    assert_eq!(no_path_reason(res), NoPathReason::Unreachable);

    // Without a bandwidth floor the degraded link still carries the route.
    let widest = engine.max_bandwidth_path(&tp(1, 1), &tp(4, 1), &topo, &[]).unwrap();
    assert_eq!(widest.bottleneck(), Some(0));
}

#[test]
fn custom_host_marker_from_config() {
    let mut topo = TopologySnapshot::default();
    duplex(&mut topo, &mut StaticBandwidth::new(), (1, 1), (2, 1), 0);
    topo.add_duplex(&sw(2), 2, "edge:9", 1);
    let config = EngineConfig::from_json(r#"{ "host_marker": "edge" }"#).unwrap();
    let engine = PathComputation::with_config(StaticBandwidth::new().with_fallback(10), config);

    let req = PathRequest::new(tp(1, 1), "edge:9:1");
    assert_eq!(
        no_path_reason(engine.compute(&req, &topo)),
        NoPathReason::UnknownDestination
    );
    assert_eq!(engine.config().telemetry_timeout_ms, 1_000);
}

#[test]
fn concurrent_calls_agree() {
    let (topo, bw) = diamond();
    let engine = PathComputation::new(bw);
    let req = PathRequest::new(tp(1, 1), tp(4, 1))
        .objective(Objective::MaxBandwidth)
        .constraint(Constraint::max_hops(2));
    let expected = engine.compute(&req, &topo).unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.compute(&req, &topo).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("worker"), expected);
        }
    });
}

#[test]
fn slow_telemetry_is_bounded_by_configured_timeout() {
    let (topo, _) = diamond();
    let provider = |_: &TpId| -> Result<u64, TelemetryError> {
        thread::sleep(Duration::from_millis(400));
        Ok(1_000)
    };
    let config = EngineConfig::from_json(r#"{ "telemetry_timeout_ms": 50 }"#).unwrap();
    let engine = PathComputation::with_config(provider, config);

    // Four links at 400ms each would take seconds if queried without a deadline.
    let start = Instant::now();
    let path = engine
        .max_bandwidth_path(&tp(1, 1), &tp(4, 1), &topo, &[Constraint::max_hops(2)])
        .unwrap();
    assert!(start.elapsed() < Duration::from_secs(1), "took {:?}", start.elapsed());
    assert_eq!(path.hop_count(), 2);
    assert_eq!(path.bottleneck(), Some(0));
}

#[test]
fn cancelled_engine_stops_building() {
    let (topo, bw) = diamond();
    let cancel = CancelToken::new();
    let engine = PathComputation::new(bw).with_cancel(cancel.clone());
    cancel.cancel();

    let req = PathRequest::new(tp(1, 1), tp(4, 1));
    assert!(matches!(engine.compute(&req, &topo), Err(Error::Cancelled)));
    assert!(engine.cancel_token().is_cancelled());
}
