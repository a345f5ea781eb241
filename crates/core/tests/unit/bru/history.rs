//! History Register Tests.

use bpsim_core::Outcome;
use bpsim_core::bru::history::{HistoryRegister, low_mask, shift_in};

#[test]
fn test_newest_outcome_is_bit_zero() {
    let mut h = HistoryRegister::new(4);
    h.push(Outcome::Taken);
    h.push(Outcome::NotTaken);
    assert_eq!(h.value(), 0b10);
}

#[test]
fn test_register_is_masked_to_width() {
    let mut h = HistoryRegister::new(3);
    for _ in 0..10 {
        h.push(Outcome::Taken);
    }
    assert_eq!(h.value(), 0b111);
}

#[test]
fn test_recent_slices_history() {
    let mut h = HistoryRegister::new(64);
    for taken in [true, false, true, true] {
        h.push(Outcome::from(taken));
    }
    assert_eq!(h.recent(2), 0b11);
    assert_eq!(h.recent(64), 0b1011);
}

#[test]
fn test_full_width_register() {
    let mut h = HistoryRegister::new(64);
    for _ in 0..70 {
        h.push(Outcome::Taken);
    }
    assert_eq!(h.value(), u64::MAX);
}

#[test]
fn test_helpers() {
    assert_eq!(low_mask(0), 0);
    assert_eq!(low_mask(5), 0b11111);
    assert_eq!(low_mask(64), u64::MAX);
    assert_eq!(shift_in(0b101, Outcome::Taken, 0b111), 0b011);
}
