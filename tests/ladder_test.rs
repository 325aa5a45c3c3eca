use verax::scoring::ladder::{Rung, ThresholdLadder};

#[test]
fn top_rung_earns_100() {
    let l = ThresholdLadder::count_default();
    assert_eq!(l.score(50.0), 100.0);
    assert_eq!(l.score(120.0), 100.0);
}

#[test]
fn zero_earns_fallback() {
    assert_eq!(ThresholdLadder::count_default().score(0.0), 0.0);
    assert_eq!(ThresholdLadder::percent_default().score(0.0), 30.0);
}

#[test]
fn linear_band_below_lowest_rung() {
    let l = ThresholdLadder::count_default();
    assert_eq!(l.score(5.0), 10.0);
    assert_eq!(l.score(10.0), 20.0);
    // just under the rung, the linear band must not exceed the rung score
    assert!(l.score(19.0) <= 80.0);
    assert_eq!(l.score(20.0), 80.0);
}

#[test]
fn percent_ladder_floors_at_fallback() {
    let l = ThresholdLadder::percent_default();
    assert_eq!(l.score(10.0), 30.0);
    assert_eq!(l.score(45.0), 45.0);
    assert_eq!(l.score(60.0), 80.0);
    assert_eq!(l.score(85.0), 100.0);
}

#[test]
fn monotone_non_decreasing() {
    for ladder in [ThresholdLadder::count_default(), ThresholdLadder::percent_default()] {
        let mut prev = f64::MIN;
        for i in 0..=2000 {
            let v = i as f64 / 10.0;
            let s = ladder.score(v);
            assert!(s >= prev, "score({v}) = {s} dropped below {prev}");
            prev = s;
        }
    }
}

#[test]
fn malformed_ladders_rejected() {
    // ascending thresholds
    assert!(ThresholdLadder::new(
        vec![
            Rung { threshold: 20.0, score: 80.0 },
            Rung { threshold: 50.0, score: 100.0 },
        ],
        2.0,
        0.0,
    )
    .is_err());

    // score increasing downward
    assert!(ThresholdLadder::new(
        vec![
            Rung { threshold: 50.0, score: 80.0 },
            Rung { threshold: 20.0, score: 100.0 },
        ],
        2.0,
        0.0,
    )
    .is_err());

    // fallback above the lowest rung score breaks monotonicity
    assert!(ThresholdLadder::new(
        vec![Rung { threshold: 50.0, score: 60.0 }],
        1.0,
        70.0,
    )
    .is_err());

    // no rungs at all
    assert!(ThresholdLadder::new(vec![], 1.0, 0.0).is_err());
}
