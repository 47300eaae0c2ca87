//! # Initialization Sequence Tests

use pretty_assertions::assert_eq;

use sdramsim_core::common::WordAddr;
use sdramsim_core::common::constants::{AUTO_PRECHARGE, INIT_COUNT_MAX, MODE_REGISTER};
use sdramsim_core::config::ControllerConfig;
use sdramsim_core::controller::SdramController;
use sdramsim_core::controller::init::InitPhase;
use sdramsim_core::controller::signals::{ClientInputs, Command};

use super::{period, ready_controller};

/// Runs `periods` periods and returns every non-No-Op (period, position, command, addr).
fn script(
    ctrl: &mut SdramController,
    inputs: &ClientInputs,
    periods: usize,
) -> Vec<(usize, usize, Command, u16)> {
    let mut out = Vec::new();
    for i in 0..periods {
        for (pos, bus) in period(ctrl, inputs).into_iter().enumerate() {
            if bus.command != Command::Nop {
                out.push((i, pos, bus.command, bus.addr));
            }
        }
    }
    out
}

#[test]
fn fresh_controller_is_reset_pending() {
    let ctrl = SdramController::new(&ControllerConfig::default());
    assert_eq!(ctrl.init_counter(), INIT_COUNT_MAX);
    assert_eq!(ctrl.init_phase(), InitPhase::ResetPending);
    assert!(!ctrl.is_ready());
    assert_eq!(ctrl.position(), 0);
}

#[test]
fn precharge_all_then_load_mode() {
    let mut ctrl = SdramController::new(&ControllerConfig::default());
    let issued = script(&mut ctrl, &ClientInputs::idle(), INIT_COUNT_MAX as usize);
    assert_eq!(
        issued,
        vec![
            (18, 1, Command::Precharge, AUTO_PRECHARGE),
            (29, 1, Command::LoadMode, MODE_REGISTER),
        ]
    );
    assert!(ctrl.is_ready());
    assert_eq!(ctrl.init_phase(), InitPhase::Ready);
}

#[test]
fn client_requests_are_ignored_while_initializing() {
    let mut ctrl = SdramController::new(&ControllerConfig::default());
    let client = ClientInputs::read(WordAddr::new(0x12_3456));
    let issued = script(&mut ctrl, &client, INIT_COUNT_MAX as usize);
    let commands: Vec<Command> = issued.iter().map(|i| i.2).collect();
    assert_eq!(commands, vec![Command::Precharge, Command::LoadMode]);
}

#[test]
fn init_request_restarts_mid_sequence() {
    let mut ctrl = SdramController::new(&ControllerConfig::default());
    let before = script(&mut ctrl, &ClientInputs::idle(), 20);
    assert_eq!(before.len(), 1);
    assert_eq!(ctrl.init_phase(), InitPhase::Precharge);

    let _ = period(&mut ctrl, &ClientInputs::idle().with_init(true));
    assert_eq!(ctrl.init_counter(), INIT_COUNT_MAX);
    assert_eq!(ctrl.init_phase(), InitPhase::ResetPending);

    let after = script(&mut ctrl, &ClientInputs::idle(), INIT_COUNT_MAX as usize);
    assert_eq!(
        after,
        vec![
            (18, 1, Command::Precharge, AUTO_PRECHARGE),
            (29, 1, Command::LoadMode, MODE_REGISTER),
        ]
    );
}

#[test]
fn held_init_keeps_the_counter_loaded() {
    let mut ctrl = SdramController::new(&ControllerConfig::default());
    let issued = script(&mut ctrl, &ClientInputs::idle().with_init(true), 40);
    assert!(issued.is_empty());
    assert_eq!(ctrl.init_counter(), INIT_COUNT_MAX);
}

#[test]
fn single_tick_init_after_ready_drops_traffic() {
    let mut ctrl = ready_controller();
    let _ = ctrl.tick(&ClientInputs::idle().with_init(true), None);
    assert!(!ctrl.is_ready());
    assert_eq!(ctrl.init_counter(), INIT_COUNT_MAX);
    assert!(ctrl.pending().is_idle());
}
