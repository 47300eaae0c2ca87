//! # Cycle Sequencer Tests

use proptest::prelude::*;

use sdramsim_core::common::constants::{SEQUENCER_POSITIONS, STATE_FIRST, STATE_LAST};
use sdramsim_core::config::SyncPolicy;
use sdramsim_core::controller::sequencer::CycleSequencer;

#[test]
fn free_runs_modulo_eight() {
    let mut seq = CycleSequencer::new(SyncPolicy::Realign);
    for t in 1..=100u32 {
        let step = seq.advance(false);
        assert_eq!(u32::from(seq.position()), t % 8);
        assert_eq!(step.boundary, step.to == STATE_FIRST);
        assert!(!step.realigned);
    }
}

#[test]
fn pulse_on_terminal_position_is_a_natural_wrap() {
    let mut seq = CycleSequencer::new(SyncPolicy::Realign);
    for _ in 0..STATE_LAST {
        let _ = seq.advance(false);
    }
    let step = seq.advance(true);
    assert_eq!(step.to, STATE_FIRST);
    assert!(step.boundary);
    assert!(!step.realigned);
}

#[test]
fn early_pulse_truncates_the_period() {
    let mut seq = CycleSequencer::new(SyncPolicy::Realign);
    for _ in 0..3 {
        let _ = seq.advance(false);
    }
    let step = seq.advance(true);
    assert_eq!((step.from, step.to), (3, STATE_FIRST));
    assert!(step.realigned);
}

#[test]
fn pulse_at_first_position_holds_it() {
    let mut seq = CycleSequencer::new(SyncPolicy::Realign);
    let step = seq.advance(true);
    assert_eq!(step.to, STATE_FIRST);
    assert!(!step.boundary);
}

#[test]
fn phase_lock_waits_for_the_rising_edge() {
    let mut seq = CycleSequencer::new(SyncPolicy::PhaseLock);
    for _ in 0..5 {
        let _ = seq.advance(false);
        assert_eq!(seq.position(), STATE_FIRST);
    }
    let _ = seq.advance(true);
    assert_eq!(seq.position(), 1);
}

#[test]
fn phase_lock_holds_the_terminal_position_while_high() {
    let mut seq = CycleSequencer::new(SyncPolicy::PhaseLock);
    let _ = seq.advance(true);
    for _ in 1..STATE_LAST {
        let _ = seq.advance(true);
    }
    assert_eq!(seq.position(), STATE_LAST);
    for _ in 0..4 {
        let _ = seq.advance(true);
        assert_eq!(seq.position(), STATE_LAST);
    }
    let step = seq.advance(false);
    assert_eq!(step.to, STATE_FIRST);
    assert!(step.boundary);
    assert!(!step.realigned);
}

#[test]
fn reset_returns_to_first() {
    let mut seq = CycleSequencer::new(SyncPolicy::Realign);
    let _ = seq.advance(false);
    seq.reset();
    assert_eq!(seq.position(), STATE_FIRST);
}

proptest! {
    #[test]
    fn realign_visits_positions_in_modular_order(syncs in prop::collection::vec(any::<bool>(), 1..400)) {
        let mut seq = CycleSequencer::new(SyncPolicy::Realign);
        for sync in syncs {
            let step = seq.advance(sync);
            let natural = (step.from + 1) % SEQUENCER_POSITIONS;
            if sync {
                prop_assert_eq!(step.to, STATE_FIRST);
            } else {
                prop_assert_eq!(step.to, natural);
            }
        }
    }

    #[test]
    fn phase_lock_only_moves_forward_or_holds(levels in prop::collection::vec(any::<bool>(), 1..400)) {
        let mut seq = CycleSequencer::new(SyncPolicy::PhaseLock);
        for level in levels {
            let step = seq.advance(level);
            let natural = (step.from + 1) % SEQUENCER_POSITIONS;
            prop_assert!(step.to == natural || step.to == step.from);
            if step.to == step.from {
                prop_assert!(
                    (step.from == STATE_FIRST && !level) || (step.from == STATE_LAST && level)
                );
            }
        }
    }
}
