//! Power-on Initialization Sequence.
//!
//! The InitCounter is a 5-bit countdown loaded to its maximum whenever the client asserts
//! `init`, and decremented once per reference period. Two reserved countdown values trigger
//! Precharge-All and Load-Mode at the command-start slot; while the counter is non-zero the
//! sequence owns the command bus and no client or refresh traffic is issued.
//!
//! The sequence is restart-only: asserting `init` mid-sequence reloads the counter and the
//! script starts again from the top.

use serde::Serialize;

use crate::common::constants::{
    AUTO_PRECHARGE, INIT_COUNT_MAX, INIT_LOAD_MODE_AT, INIT_PRECHARGE_AT, MODE_REGISTER,
};
use crate::controller::signals::Command;

/// Phase of the initialization script, derived from the InitCounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InitPhase {
    /// Counter freshly loaded; waiting for the precharge trigger.
    ResetPending,
    /// Precharge-All has been reached; waiting for the mode-load trigger.
    Precharge,
    /// Load-Mode has been reached; waiting for the counter to drain.
    ModeLoad,
    /// Counter is zero; client and refresh traffic are accepted.
    Ready,
}

/// InitCounter and the command script keyed on it.
#[derive(Clone, Debug)]
pub struct InitSequence {
    counter: u8,
}

impl Default for InitSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl InitSequence {
    /// Creates a sequence in the reset-pending phase.
    pub const fn new() -> Self {
        Self {
            counter: INIT_COUNT_MAX,
        }
    }

    /// Reloads the counter; any progress is discarded.
    pub const fn restart(&mut self) {
        self.counter = INIT_COUNT_MAX;
    }

    /// Counts one reference period down, saturating at zero.
    pub const fn on_period_boundary(&mut self) {
        self.counter = self.counter.saturating_sub(1);
    }

    /// Current InitCounter value.
    #[inline(always)]
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// `true` once the counter has drained.
    #[inline(always)]
    pub const fn is_complete(&self) -> bool {
        self.counter == 0
    }

    /// Current phase of the script.
    pub const fn phase(&self) -> InitPhase {
        match self.counter {
            0 => InitPhase::Ready,
            c if c > INIT_PRECHARGE_AT => InitPhase::ResetPending,
            c if c > INIT_LOAD_MODE_AT => InitPhase::Precharge,
            _ => InitPhase::ModeLoad,
        }
    }

    /// Command the script issues at this period's command-start slot, with its address word.
    pub const fn command(&self) -> Option<(Command, u16)> {
        match self.counter {
            INIT_PRECHARGE_AT => Some((Command::Precharge, AUTO_PRECHARGE)),
            INIT_LOAD_MODE_AT => Some((Command::LoadMode, MODE_REGISTER)),
            _ => None,
        }
    }
}
