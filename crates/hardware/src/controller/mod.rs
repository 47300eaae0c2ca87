//! Synchronous DRAM controller.
//!
//! This module implements the cycle-exact controller core. It provides:
//! 1. **Cycle Sequencer:** Partitions each reference period into eight command slots.
//! 2. **Initialization Sequence:** Precharge-All then Load-Mode after every init request.
//! 3. **Command/Refresh Arbiter:** One client transaction or one auto-refresh per period.
//! 4. **Signals:** Command encoding, registered bus outputs and client ports.
//!
//! All state advances together in [`SdramController::tick`]; there is no other mutation site.

/// Command/Refresh arbitration table and bus drive.
pub mod arbiter;

/// Power-on initialization script.
pub mod init;

/// Reference-period sub-state counter.
pub mod sequencer;

/// Bus and client signal types.
pub mod signals;

use tracing::{debug, trace, warn};

use self::arbiter::{Action, PeriodLatch, Slot};
use self::init::{InitPhase, InitSequence};
use self::sequencer::{CycleSequencer, Step};
use self::signals::{BusState, ClientInputs, ClientOutputs, PendingRequest};
use crate::config::ControllerConfig;

/// The controller: sequencer, init script, period latch and registered bus outputs.
#[derive(Clone, Debug)]
pub struct SdramController {
    sequencer: CycleSequencer,
    init: InitSequence,
    latch: PeriodLatch,
    bus: BusState,
    data_out: u16,
}

impl SdramController {
    /// Creates a controller straight out of reset.
    ///
    /// The InitCounter starts loaded, so a fresh controller runs the initialization script
    /// without an explicit `init` pulse.
    ///
    /// # Arguments
    ///
    /// * `config` - Controller configuration (sync interpretation).
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            sequencer: CycleSequencer::new(config.sync_policy),
            init: InitSequence::new(),
            latch: PeriodLatch::default(),
            bus: BusState::default(),
            data_out: 0,
        }
    }

    /// Full controller reset: every register returns to its power-on value.
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.init.restart();
        self.latch = PeriodLatch::default();
        self.bus = BusState::default();
        self.data_out = 0;
    }

    /// Advances every register by one controller tick.
    ///
    /// Outputs are computed from the pre-edge state; the registered bus lines returned by
    /// [`bus`](Self::bus) afterwards are what the device samples on the next edge.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Client inputs sampled on this edge.
    /// * `dq` - Value on the data bus before this edge (`None` if nobody drives it).
    ///
    /// # Returns
    ///
    /// The client-visible data-out register and whether it was loaded on this tick.
    pub fn tick(&mut self, inputs: &ClientInputs, dq: Option<u16>) -> ClientOutputs {
        let position = self.sequencer.position();
        let slot = Slot::of(position);
        let init_complete = self.init.is_complete();

        let action = arbiter::arbitrate(slot, &self.init, &self.latch, inputs);
        let mut outputs = ClientOutputs {
            data_out: self.data_out,
            data_valid: false,
        };

        if slot == Slot::Capture && init_complete && self.latch.pending.read {
            match dq {
                Some(value) => self.data_out = value,
                None => warn!(
                    addr = %self.latch.active,
                    "read capture with the data bus released; data-out keeps its previous value"
                ),
            }
            outputs = ClientOutputs {
                data_out: self.data_out,
                data_valid: true,
            };
        }

        self.bus = arbiter::drive(action, position, init_complete, &self.latch, inputs, &self.bus);
        if action != Action::Idle {
            trace!(
                position,
                command = action.command().mnemonic(),
                addr = self.bus.addr,
                bank = self.bus.bank,
                "command"
            );
        }

        if slot == Slot::CommandStart {
            self.latch = if init_complete {
                PeriodLatch::sample(inputs)
            } else {
                PeriodLatch::default()
            };
        }

        let step = self.sequencer.advance(inputs.sync);
        self.advance_init(inputs.init, step);

        outputs
    }

    fn advance_init(&mut self, init_request: bool, step: Step) {
        let before = self.init.phase();
        if init_request {
            self.init.restart();
            self.latch = PeriodLatch::default();
        } else if step.boundary {
            self.init.on_period_boundary();
        }
        if step.realigned {
            debug!(from = step.from, "sequencer realigned by sync");
        }

        let after = self.init.phase();
        if before != after {
            debug!(?before, ?after, counter = self.init.counter(), "init phase change");
        }
    }

    /// Registered outputs currently on the physical bus.
    #[inline(always)]
    pub const fn bus(&self) -> &BusState {
        &self.bus
    }

    /// Current sequencer position.
    pub const fn position(&self) -> u8 {
        self.sequencer.position()
    }

    /// Current InitCounter value.
    pub const fn init_counter(&self) -> u8 {
        self.init.counter()
    }

    /// Current initialization phase.
    pub const fn init_phase(&self) -> InitPhase {
        self.init.phase()
    }

    /// `true` once client and refresh traffic are accepted.
    pub const fn is_ready(&self) -> bool {
        self.init.is_complete()
    }

    /// Request latched at this period's command-start.
    pub const fn pending(&self) -> PendingRequest {
        self.latch.pending
    }

    /// Client-visible data-out register.
    pub const fn data_out(&self) -> u16 {
        self.data_out
    }
}
