use crate::Error;
use crate::pce::{Constraint, Metric, Thresholds};

#[test]
fn empty_constraints_are_permissive() {
    let th = Thresholds::evaluate(&[]);
    assert_eq!(th.min_bandwidth, 0);
    assert_eq!(th.max_hops, None);
    assert!(th.allows_hops(usize::MAX));
}

#[test]
fn tightest_bound_wins_per_metric() {
    let cs = vec![
        Constraint::min_bandwidth(100),
        Constraint::min_bandwidth(300),
        Constraint::min_bandwidth(200),
        Constraint::max_hops(6),
        Constraint::max_hops(3),
        Constraint::max_hops(9),
    ];
    let th = Thresholds::evaluate(&cs);
    assert_eq!(th.min_bandwidth, 300);
    assert_eq!(th.max_hops, Some(3));
    assert!(th.allows_hops(3));
    assert!(!th.allows_hops(4));
}

#[test]
fn unused_bound_fields_are_ignored() {
    // Bandwidth only reads `min`, HopCount only reads `max`.
    let cs = vec![
        Constraint {
            metric: Metric::Bandwidth,
            min: None,
            max: Some(5),
        },
        Constraint {
            metric: Metric::HopCount,
            min: Some(2),
            max: None,
        },
    ];
    assert_eq!(Thresholds::evaluate(&cs), Thresholds::default());
}

#[test]
fn min_above_max_is_conflicting() {
    let bad = Constraint {
        metric: Metric::Bandwidth,
        min: Some(10),
        max: Some(5),
    };
    assert!(matches!(
        Thresholds::validate(&[bad]),
        Err(Error::ConflictingConstraints(_))
    ));
    assert!(Thresholds::validate(&[Constraint::min_bandwidth(10), Constraint::max_hops(1)]).is_ok());
}
