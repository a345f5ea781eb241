//! Tournament Predictor Tests.
//!
//! Verifies that the choice table learns which sub-predictor to trust.

use bpsim_core::bru::counter::TwoBitCounter;
use bpsim_core::bru::tournament::TournamentPredictor;
use bpsim_core::{BranchPredictor, ConfigError, Outcome, PredictionDetail};
use pretty_assertions::assert_eq;

use crate::common::{replay, step, train};

fn pattern(period: &[bool], repeats: usize, pc: u32) -> Vec<(u32, Outcome)> {
    period
        .iter()
        .cycle()
        .take(period.len() * repeats)
        .map(|&t| (pc, Outcome::from(t)))
        .collect()
}

/// A T,T,T,N loop is fully captured by 4 bits of local history, while one
/// bit of global history cannot tell which T precedes the N. The choice
/// counter for the ambiguous global context drifts to Strong-Trust-Local.
#[test]
fn tournament_selector_converges_to_local() {
    let mut bp = TournamentPredictor::new(1, 4, 4).unwrap();
    let pc = 0x5;

    let warmup = pattern(&[true, true, true, false], 50, pc);
    let _ = replay(&mut bp, &warmup);

    assert_eq!(bp.selector(1), TwoBitCounter::STRONG_NOT_TAKEN);
    assert!(!bp.prefers_global(1));

    let steady = pattern(&[true, true, true, false], 25, pc);
    assert_eq!(replay(&mut bp, &steady), 0);
}

/// Predictions carry both sub-predictions for the paired update.
#[test]
fn tournament_records_sub_predictions() {
    let bp = TournamentPredictor::new(4, 4, 4).unwrap();
    let p = bp.predict_branch(0x10);
    assert_eq!(
        p.detail,
        PredictionDetail::Tournament {
            global: Outcome::NotTaken,
            local: Outcome::NotTaken,
        }
    );
}

/// Tournament learns a constant branch.
#[test]
fn tournament_learns_taken() {
    let mut bp = TournamentPredictor::new(6, 6, 6).unwrap();
    train(&mut bp, 0x1000, Outcome::Taken, 20);
    assert!(bp.predict_branch(0x1000).is_taken());
}

/// Local histories are kept per PC slot.
#[test]
fn tournament_local_history_per_slot() {
    let mut bp = TournamentPredictor::new(4, 4, 2).unwrap();
    let _ = step(&mut bp, 0b01, Outcome::Taken);
    let _ = step(&mut bp, 0b10, Outcome::NotTaken);
    let _ = step(&mut bp, 0b101, Outcome::Taken);

    // pc 0b101 shares slot 1 with pc 0b01.
    assert_eq!(bp.local_history(0b01), 0b11);
    assert_eq!(bp.local_history(0b10), 0b0);
    assert_eq!(bp.history(), 0b101);
}

#[test]
fn tournament_rejects_zero_widths() {
    assert_eq!(
        TournamentPredictor::new(4, 0, 4).unwrap_err(),
        ConfigError::ZeroWidth {
            field: "lhistory_bits"
        }
    );
    assert_eq!(
        TournamentPredictor::new(4, 4, 0).unwrap_err(),
        ConfigError::ZeroWidth {
            field: "pc_index_bits"
        }
    );
}
