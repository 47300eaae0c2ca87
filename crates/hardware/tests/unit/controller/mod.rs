//! # Controller Tests
//!
//! The three controller components, each driven through its public interface, plus whole
//! controller tick sequences without a device attached.


/// Initialization Sequence countdown and restart.
pub mod init;

/// Cycle Sequencer ordering and sync policies.
pub mod sequencer;

use sdramsim_core::common::constants::{INIT_COUNT_MAX, SEQUENCER_POSITIONS};
use sdramsim_core::config::ControllerConfig;
use sdramsim_core::controller::SdramController;
use sdramsim_core::controller::signals::{BusState, ClientInputs};

/// Runs one period from position 0 and returns the bus decided at each position.
pub fn period(ctrl: &mut SdramController, inputs: &ClientInputs) -> Vec<BusState> {
    assert_eq!(ctrl.position(), 0, "period must start at position 0");
    (0..SEQUENCER_POSITIONS)
        .map(|_| {
            let _ = ctrl.tick(inputs, None);
            *ctrl.bus()
        })
        .collect()
}

/// A controller whose initialization has drained.
pub fn ready_controller() -> SdramController {
    let mut ctrl = SdramController::new(&ControllerConfig::default());
    for _ in 0..INIT_COUNT_MAX {
        let _ = period(&mut ctrl, &ClientInputs::idle());
    }
    assert!(ctrl.is_ready());
    ctrl
}
