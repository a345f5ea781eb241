//! Tagged Multi-Table Predictor Tests.
//!
//! Verifies lookup, allocation on misprediction and training through the
//! public interface. Aging and alternate-selection internals are covered by
//! the unit tests inside the module.

use bpsim_core::bru::tage::{TagePredictor, TaggedEntry};
use bpsim_core::{BranchPredictor, ConfigError, Outcome, PredictionDetail, TageConfig};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{step, train};

fn tage(history_lengths: Vec<usize>) -> TagePredictor {
    TagePredictor::new(&TageConfig {
        base_bits: 8,
        table_bits: 6,
        history_lengths,
        aging_clock_bits: 4,
    })
    .unwrap()
}

fn default_tage() -> TagePredictor {
    tage(vec![8, 16, 32, 64])
}

fn modified_entries(bp: &TagePredictor) -> Vec<(usize, usize, TaggedEntry)> {
    (0..bp.num_tables())
        .flat_map(|t| {
            bp.entries(t)
                .enumerate()
                .filter(|(_, e)| **e != TaggedEntry::default())
                .map(move |(i, e)| (t, i, *e))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Initial prediction comes from the Weak-Not-Taken base table.
#[test]
fn tage_initial_prediction() {
    let bp = default_tage();
    let p = bp.predict_branch(0x1234);
    assert_eq!(p.direction, Outcome::NotTaken);
    let PredictionDetail::Tagged(lookup) = p.detail else {
        panic!("expected a tagged lookup");
    };
    assert_eq!(lookup.provider, None);
    assert_eq!(lookup.alt, None);
}

/// A misprediction with no provider reallocates exactly one entry, in the
/// shortest table, carrying the tag computed at lookup time.
#[rstest]
#[case(vec![1, 4, 12, 43])]
#[case(vec![8, 16, 32, 64])]
fn tage_single_miss_allocates_one_entry(#[case] lengths: Vec<usize>) {
    let mut bp = tage(lengths);
    let pc = 0x1234;

    let expected_index = bp.index(pc, 0);
    let expected_tag = bp.tag(pc, 0);
    let p = bp.predict_branch(pc);
    let PredictionDetail::Tagged(lookup) = p.detail else {
        panic!("expected a tagged lookup");
    };
    assert_eq!(lookup.provider, None);
    assert_eq!(lookup.tags[0], expected_tag);

    bp.update_branch(pc, Outcome::Taken, &p);

    let modified = modified_entries(&bp);
    assert_eq!(modified.len(), 1);
    let (table, index, entry) = modified[0];
    assert_eq!(table, 0);
    assert_eq!(index, expected_index);
    assert_eq!(entry.tag, expected_tag);
    assert_eq!(entry.counter.value(), 4);
    assert!(!entry.useful);
}

/// A correct base prediction allocates nothing and trains the base counter.
#[test]
fn tage_correct_prediction_allocates_nothing() {
    let mut bp = default_tage();
    let _ = step(&mut bp, 0x1234, Outcome::NotTaken);
    assert!(modified_entries(&bp).is_empty());
    assert_eq!(bp.base_counter(0x1234).value(), 0);
}

/// The newly allocated entry provides once the same (pc, history) recurs.
#[test]
fn tage_allocated_entry_provides() {
    let mut bp = default_tage();
    let pc = 0x1234;
    let p = bp.predict_branch(pc);
    bp.update_branch(pc, Outcome::Taken, &p);

    // Shift eight not-taken outcomes from another branch so the 8-bit
    // history of table 0 is zero again.
    let other = 0x0F0F;
    for _ in 0..64 {
        let _ = step(&mut bp, other, Outcome::NotTaken);
    }
    assert_eq!(bp.history(), 0);

    let PredictionDetail::Tagged(lookup) = bp.predict_branch(pc).detail else {
        panic!("expected a tagged lookup");
    };
    assert_eq!(lookup.provider, Some(0));
    assert_eq!(lookup.provider_direction, Outcome::Taken);
}

/// Cold entries carry tag 0, so a (pc, history) pair whose tag folds to 0
/// hits them: the longest table provides and the base table is not trained.
#[test]
fn tage_zero_tag_hits_cold_entries() {
    let mut bp = default_tage();
    let pc = 0x1000;
    assert!((0..bp.num_tables()).all(|t| bp.tag(pc, t) == 0));

    let p = bp.predict_branch(pc);
    let PredictionDetail::Tagged(lookup) = p.detail else {
        panic!("expected a tagged lookup");
    };
    assert_eq!(lookup.provider, Some(bp.num_tables() - 1));
    assert_eq!(lookup.alt, Some(bp.num_tables() - 2));

    bp.update_branch(pc, Outcome::NotTaken, &p);
    assert_eq!(bp.base_counter(pc).value(), 1);
}

/// Learns an always-taken branch.
#[test]
fn tage_learns_taken() {
    let mut bp = default_tage();
    train(&mut bp, 0x1000, Outcome::Taken, 200);
    assert!(bp.predict_branch(0x1000).is_taken());
}

/// Learns an always-not-taken branch.
#[test]
fn tage_learns_not_taken() {
    let mut bp = default_tage();
    train(&mut bp, 0x1000, Outcome::NotTaken, 40);
    assert!(!bp.predict_branch(0x1000).is_taken());
}

/// Adapts after the branch changes behaviour.
#[test]
fn tage_adapts_to_pattern_change() {
    let mut bp = default_tage();
    train(&mut bp, 0x1000, Outcome::NotTaken, 50);
    assert!(!bp.predict_branch(0x1000).is_taken());
    train(&mut bp, 0x1000, Outcome::Taken, 200);
    assert!(bp.predict_branch(0x1000).is_taken());
}

#[rstest]
#[case(vec![], ConfigError::NoHistoryLengths)]
#[case(vec![4, 4], ConfigError::HistoryLengthsNotIncreasing { index: 1 })]
#[case(vec![1, 8, 2], ConfigError::HistoryLengthsNotIncreasing { index: 2 })]
#[case(vec![8, 65], ConfigError::WidthTooLarge { field: "tage.history_lengths", bits: 65, max: 64 })]
#[case(vec![1; 9], ConfigError::TooManyTables { count: 9, max: 8 })]
fn tage_rejects_bad_history_lengths(#[case] lengths: Vec<usize>, #[case] err: ConfigError) {
    let config = TageConfig {
        history_lengths: lengths,
        ..TageConfig::default()
    };
    assert_eq!(TagePredictor::new(&config).unwrap_err(), err);
}
