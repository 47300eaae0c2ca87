//! Cycle Sequencer.
//!
//! A free-running modulo-8 counter that partitions each reference period into command slots.
//! The counter is kept phase-aligned to the client's slower reference clock through the `sync`
//! input, interpreted according to the configured [`SyncPolicy`].

use crate::common::constants::{SEQUENCER_POSITIONS, STATE_FIRST, STATE_LAST};
use crate::config::SyncPolicy;

/// What happened to the sequencer on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    /// Position before the tick.
    pub from: u8,
    /// Position after the tick.
    pub to: u8,
    /// The tick entered `STATE_FIRST` from another position (a period boundary).
    pub boundary: bool,
    /// The boundary was forced by `sync` before the terminal position.
    pub realigned: bool,
}

/// Modulo counter over the sub-states of a reference period.
#[derive(Clone, Debug)]
pub struct CycleSequencer {
    position: u8,
    policy: SyncPolicy,
}

impl CycleSequencer {
    /// Creates a sequencer at `STATE_FIRST`.
    pub const fn new(policy: SyncPolicy) -> Self {
        Self {
            position: STATE_FIRST,
            policy,
        }
    }

    /// Current position.
    #[inline(always)]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Sync interpretation in effect.
    pub const fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Returns the sequencer to `STATE_FIRST`. Only a full controller reset does this.
    pub const fn reset(&mut self) {
        self.position = STATE_FIRST;
    }

    /// Advances by one controller tick.
    ///
    /// # Arguments
    ///
    /// * `sync` - The reference-clock input sampled on this tick.
    ///
    /// # Returns
    ///
    /// The transition taken.
    pub fn advance(&mut self, sync: bool) -> Step {
        let from = self.position;
        let natural = (from + 1) % SEQUENCER_POSITIONS;
        let to = match self.policy {
            SyncPolicy::Realign if sync => STATE_FIRST,
            SyncPolicy::Realign => natural,
            // Hold at the terminal slot while the reference is high and at the first slot while
            // it is low, so FIRST -> next only happens on the reference's rising edge.
            SyncPolicy::PhaseLock => match from {
                STATE_LAST if sync => STATE_LAST,
                STATE_FIRST if !sync => STATE_FIRST,
                _ => natural,
            },
        };
        self.position = to;

        let boundary = to == STATE_FIRST && from != STATE_FIRST;
        Step {
            from,
            to,
            boundary,
            realigned: boundary && from != STATE_LAST,
        }
    }
}
