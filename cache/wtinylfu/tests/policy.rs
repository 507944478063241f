//! Randomized workloads against the segment invariants.

use cache_core::{Adaptation, QueueType};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use wtinylfu::{Access, WindowTinyLfu};

fn check(policy: &WindowTinyLfu) {
    assert_eq!(policy.max_window() + policy.max_main(), policy.maximum_size());
    assert!(policy.len() <= policy.maximum_size() as usize);
    assert!(policy.window_len() <= policy.max_window() as usize);
    assert!(policy.protected_len() <= policy.max_protected() as usize);
    assert!(policy.probation_len() + policy.protected_len() <= policy.max_main() as usize);
}

#[test]
fn random_accesses_and_resizes() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let mut policy = WindowTinyLfu::new(256, 0.99, 0.8).unwrap();

    for i in 0..50_000u64 {
        let key = rng.random_range(0..1_024u64);
        let resident = policy.queue_of(key);
        match policy.record(key) {
            Access::Hit(queue) => assert_eq!(Some(queue), resident),
            Access::Miss => assert!(resident.is_none()),
        }

        if i % 1_000 == 0 {
            let amount = rng.random_range(0..128u32);
            let adaptation = if rng.random_bool(0.5) {
                Adaptation::IncreaseWindow(amount)
            } else {
                Adaptation::DecreaseWindow(amount)
            };
            policy.apply(adaptation);
        }
        check(&policy);
    }

    let stats = policy.stats();
    assert_eq!(stats.operations, 50_000);
    assert_eq!(stats.hits + stats.misses, stats.operations);
}

#[test]
fn skewed_workload_hits_more_than_uniform() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
    let mut skewed = WindowTinyLfu::new(100, 0.99, 0.8).unwrap();
    let mut uniform = WindowTinyLfu::new(100, 0.99, 0.8).unwrap();

    for _ in 0..20_000 {
        let hot = rng.random_bool(0.8);
        let key = if hot {
            rng.random_range(0..50u64)
        } else {
            rng.random_range(50..5_000u64)
        };
        skewed.record(key);
        uniform.record(rng.random_range(0..5_000u64));
    }

    assert!(skewed.stats().hit_rate() > uniform.stats().hit_rate());
    assert!(skewed.stats().hit_rate() > 0.5);
}

#[test]
fn protected_entries_are_reported() {
    let mut policy = WindowTinyLfu::new(10, 0.9, 0.8).unwrap();
    policy.record(1);
    policy.record(2);
    policy.record(1);
    assert_eq!(policy.record(1), Access::Hit(QueueType::Protected));
}
