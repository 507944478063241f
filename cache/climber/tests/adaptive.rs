//! End-to-end runs of the minisim climber against synthetic traces.

use cache_core::{Adaptation, Settings};
use climber::{AdaptiveWindowTinyLfu, HillClimber, MAX_WINDOW_PERCENT, MiniSimClimber, REPLICAS};
use trace::{SyntheticTrace, TraceSource};
use wtinylfu::WindowTinyLfu;

fn adaptive(cache_size: u32, period: u32) -> AdaptiveWindowTinyLfu<MiniSimClimber> {
    let policy = WindowTinyLfu::new(cache_size, 0.99, 0.8).unwrap();
    let climber = MiniSimClimber::new(cache_size, 0.99, 0.8, period).unwrap();
    AdaptiveWindowTinyLfu::new(policy, climber)
}

#[test]
fn first_period_holds_then_evaluates() {
    let mut climber = MiniSimClimber::new(1_000, 0.99, 0.8, 100).unwrap();
    let trace = SyntheticTrace::zipfian(5_000, 0.99, 101).unwrap();
    let keys: Vec<u64> = trace.keys().collect();

    for key in &keys[..100] {
        climber.on_miss(*key, false);
        assert_eq!(climber.adapt(0, 0, 0, false), Adaptation::Hold);
    }
    assert_eq!(climber.sample(), 100);

    climber.on_miss(keys[100], true);
    let decision = climber.adapt(0, 0, 0, true);
    assert_eq!(climber.sample(), 0);

    let applied = climber.window_percent();
    assert!(applied <= MAX_WINDOW_PERCENT);
    if applied == 1 {
        assert_eq!(decision, Adaptation::Hold);
    } else {
        assert!(!decision.is_hold());
        assert_eq!(
            decision.window_delta(),
            (applied as i64 - 1) * 1_000 / 100
        );
    }
}

#[test]
fn working_set_smaller_than_cache_always_hits() {
    let mut cache = adaptive(1_000, 5_000);
    let trace = SyntheticTrace::repeating(800, 200_000).unwrap();
    for key in trace.keys() {
        cache.record(key);
    }
    let stats = cache.policy().stats();
    assert_eq!(stats.misses, 800);
    assert_eq!(stats.evictions, 0);
    assert_eq!(
        cache.policy().max_window() + cache.policy().max_main(),
        cache.policy().maximum_size()
    );
}

#[test]
fn adapted_limits_stay_in_bounds() {
    let mut cache = adaptive(2_000, 1_000);
    let trace = SyntheticTrace::hotspot(0, 20_000, 0.8, 0.05, 100_000).unwrap();
    for key in trace.keys() {
        cache.record(key);
        let policy = cache.policy();
        assert!(policy.max_window() <= policy.maximum_size());
        assert_eq!(policy.max_window() + policy.max_main(), policy.maximum_size());
        assert!(policy.len() <= policy.maximum_size() as usize);
    }

    let snapshot = cache.climber().snapshot();
    assert_eq!(snapshot.misses.len(), REPLICAS);
    assert!(snapshot.window_percent <= MAX_WINDOW_PERCENT);
    assert_eq!(
        cache.policy().max_window(),
        snapshot.window_percent * 2_000 / 100
    );
}

#[test]
fn minisim_replicas_are_independent() {
    let mut climber = MiniSimClimber::new(100, 0.99, 0.8, 1_000_000).unwrap();
    let trace = SyntheticTrace::uniform(0, 300, 5_000).unwrap();
    for key in trace.keys() {
        climber.record_access(key);
    }
    let misses = climber.snapshot().misses;
    let distinct: std::collections::HashSet<u64> = misses.iter().copied().collect();
    assert!(distinct.len() > 1);
}

#[test]
fn from_settings_runs_configured_trace() {
    let settings = Settings::from_toml(
        r#"
        maximum_size = 500

        [hill_climber.minisim]
        period = 2000

        [trace]
        distribution = "scrambled-zipfian"
        events = 20000
        "#,
    )
    .unwrap();

    let mut cache = AdaptiveWindowTinyLfu::from_settings(&settings).unwrap();
    let trace = SyntheticTrace::from_config(&settings.trace).unwrap();
    for key in trace.keys() {
        cache.record(key);
    }
    assert_eq!(cache.policy().stats().operations, 20_000);
    assert_eq!(cache.climber().period(), 2_000);
}
