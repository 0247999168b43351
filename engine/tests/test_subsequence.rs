//! Subsequence Tests
//!
//! Critical invariants tested:
//! - new(seed, sub, off) == new(seed, 0, 0) + discard_subsequence(sub) + discard(off)
//! - discard_subsequence never changes the Weyl accumulator
//! - Worker stream sets line up with single-stream construction

use proptest::prelude::*;
use xorwow_core_rs::{StreamSetConfig, XorwowEngine};

#[test]
fn test_identity_case() {
    let mut constructed = XorwowEngine::new(77, 0, 0);
    let mut composed = XorwowEngine::new(77, 0, 0);
    composed.discard_subsequence(0);
    composed.discard(0);

    assert_eq!(constructed.state(), composed.state());
    assert_eq!(constructed.next(), composed.next());
}

#[test]
fn test_subsequence_one_reference_vector() {
    let mut rng = XorwowEngine::new(0, 1, 0);
    let outputs: Vec<u32> = (0..4).map(|_| rng.next()).collect();
    assert_eq!(outputs, vec![3955638199, 1977250130, 1432217238, 1599962988]);
}

#[test]
fn test_subsequence_jumps_compose() {
    let mut split = XorwowEngine::new(9, 0, 0);
    split.discard_subsequence(3);
    split.discard_subsequence(4);

    let direct = XorwowEngine::new(9, 7, 0);
    assert_eq!(split.state(), direct.state());
}

#[test]
fn test_subsequence_weyl_invariance_for_large_counts() {
    for n in [1u64, 2, 1 << 20, 1 << 62, u64::MAX] {
        let mut rng = XorwowEngine::new(31337, 0, 0);
        let before = rng.state().d();
        rng.discard_subsequence(n);
        assert_eq!(rng.state().d(), before, "d changed after {} subsequences", n);
    }
}

#[test]
fn test_adjacent_subsequences_differ() {
    let mut a = XorwowEngine::new(2024, 100, 0);
    let mut b = XorwowEngine::new(2024, 101, 0);

    let seq_a: Vec<u32> = (0..16).map(|_| a.next()).collect();
    let seq_b: Vec<u32> = (0..16).map(|_| b.next()).collect();
    assert_ne!(seq_a, seq_b);
}

#[test]
fn test_worker_set_matches_single_streams() {
    let config = StreamSetConfig::from_json(
        r#"{"seed": 555, "base_subsequence": 1000, "workers": 8, "offset": 3}"#,
    )
    .unwrap();

    let mut streams = config.build().unwrap();
    assert_eq!(streams.len(), 8);

    for (worker, stream) in streams.iter_mut().enumerate() {
        let mut single = XorwowEngine::new(555, 1000 + worker as u64, 3);
        assert_eq!(stream.next(), single.next(), "worker {} diverged", worker);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_construction_composes(seed in any::<u64>(), sub in any::<u64>(), off in any::<u64>()) {
        let mut constructed = XorwowEngine::new(seed, sub, off);

        let mut composed = XorwowEngine::new(seed, 0, 0);
        composed.discard_subsequence(sub);
        composed.discard(off);

        prop_assert_eq!(constructed.state(), composed.state());
        prop_assert_eq!(constructed.next(), composed.next());
    }

    #[test]
    fn prop_subsequence_keeps_weyl(seed in any::<u64>(), n in any::<u64>()) {
        let mut rng = XorwowEngine::new(seed, 0, 0);
        let before = rng.state().d();
        rng.discard_subsequence(n);
        prop_assert_eq!(rng.state().d(), before);
    }
}
