//! Skew estimates over synthetic traces.

use indicator::Indicator;
use trace::{SyntheticTrace, TraceSource};

fn observe(trace: &SyntheticTrace) -> Indicator {
    let mut indicator = Indicator::new(70, 1000, 5000).unwrap();
    for key in trace.keys() {
        indicator.record(key);
    }
    indicator
}

#[test]
fn zipfian_skew_is_near_its_constant() {
    let trace = SyntheticTrace::zipfian(5_000, 0.99, 200_000).unwrap();
    let skew = observe(&trace).skew().unwrap();
    assert!((0.7..1.3).contains(&skew), "skew was {skew}");
}

#[test]
fn uniform_is_less_skewed_than_zipfian() {
    let zipf = observe(&SyntheticTrace::zipfian(5_000, 0.99, 100_000).unwrap());
    let uniform = observe(&SyntheticTrace::uniform(0, 4_999, 100_000).unwrap());

    assert!(uniform.skew().unwrap() < zipf.skew().unwrap());
    assert!(uniform.indicator().unwrap() >= zipf.indicator().unwrap());
}

#[test]
fn looping_trace_has_high_hint() {
    let looping = observe(&SyntheticTrace::repeating(100, 50_000).unwrap());
    let scan = observe(&SyntheticTrace::counter(0, 50_000));

    assert!(looping.hint().unwrap() > 5.0);
    assert!(scan.hint().unwrap() < 1.0);
}
