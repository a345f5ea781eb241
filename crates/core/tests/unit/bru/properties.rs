//! Properties Shared By Every Predictor.
//!
//! Lookups are pure, instances are independent, and arbitrary PCs never
//! index outside a table.

use bpsim_core::{BranchPredictor, Config, Outcome, Predictor, TageConfig};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{noise, replay, step};

fn configs() -> Vec<Config> {
    vec![
        Config::static_taken(),
        Config::gshare(4),
        Config::tournament(4, 4, 3),
        Config::tagged(TageConfig {
            base_bits: 4,
            table_bits: 3,
            history_lengths: vec![1, 4, 12, 43],
            aging_clock_bits: 2,
        }),
    ]
}

fn mixed_trace(n: usize) -> Vec<(u32, Outcome)> {
    noise(0xB5AD_4ECE, n)
        .into_iter()
        .enumerate()
        .map(|(i, o)| ((i as u32 % 7) * 0x44 + 0x1000, o))
        .collect()
}

#[rstest]
#[case::static_bp(0)]
#[case::gshare(1)]
#[case::tournament(2)]
#[case::tagged(3)]
fn predict_is_repeatable(#[case] which: usize) {
    let mut bp = Predictor::new(&configs()[which]).unwrap();
    let _ = replay(&mut bp, &mixed_trace(500));

    for pc in [0u32, 0x1000, 0x1044, 0xFFFF_FFFF] {
        let first = bp.predict_branch(pc);
        for _ in 0..5 {
            assert_eq!(bp.predict_branch(pc), first);
        }
    }
}

#[rstest]
#[case::gshare(1)]
#[case::tournament(2)]
#[case::tagged(3)]
fn instances_do_not_interfere(#[case] which: usize) {
    let config = &configs()[which];
    let mut a = Predictor::new(config).unwrap();
    let mut b = Predictor::new(config).unwrap();
    let fresh = Predictor::new(config).unwrap();

    let trace = mixed_trace(300);
    let _ = replay(&mut a, &trace);
    for (pc, outcome) in trace.iter().take(50) {
        let _ = step(&mut a, *pc, !*outcome);
    }

    for pc in (0..64).map(|i| 0x1000 + i * 4) {
        assert_eq!(b.predict_branch(pc), fresh.predict_branch(pc));
    }
    let replay_b = replay(&mut b, &trace);
    let mut fresh = fresh;
    assert_eq!(replay_b, replay(&mut fresh, &trace));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any PC and outcome sequence is accepted without panicking and the same
    /// trace always yields the same mispredictions.
    #[test]
    fn prop_replay_is_deterministic(
        which in 0usize..4,
        trace in prop::collection::vec((any::<u32>(), any::<bool>()), 1..200),
    ) {
        let trace: Vec<(u32, Outcome)> =
            trace.into_iter().map(|(pc, t)| (pc, Outcome::from(t))).collect();
        let mut a = Predictor::new(&configs()[which]).unwrap();
        let mut b = Predictor::new(&configs()[which]).unwrap();
        prop_assert_eq!(replay(&mut a, &trace), replay(&mut b, &trace));
    }
}
