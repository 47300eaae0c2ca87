//! Command/Refresh Arbiter.
//!
//! This module decides which command occupies each slot of a reference period. It performs:
//! 1. **Slot Classification:** Maps sequencer positions to command-start, continuation,
//!    data-capture, or idle slots.
//! 2. **Arbitration:** One table keyed by (slot, init phase, pending request) picks the action.
//! 3. **Bus Drive:** Turns an action into the registered command/address/bank/mask/data lines.
//!
//! Exactly one client transaction or one auto-refresh is serviced per period, resolved at the
//! single command-start decision point. Refresh is opportunistic: it only happens in periods
//! where the client requested nothing.

use crate::common::WordAddr;
use crate::common::constants::{
    ADDR_BUS_MASK, AUTO_PRECHARGE, STATE_CMD_CONT, STATE_CMD_READ, STATE_CMD_START,
};
use crate::controller::init::InitSequence;
use crate::controller::signals::{BusState, ByteMask, ClientInputs, Command, PendingRequest};

/// Role of a sequencer position within the period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Client sample point; Activate, Auto-Refresh or an init command.
    CommandStart,
    /// Read/Write issue point, tRCD after command-start.
    Continue,
    /// Read data is latched into the data-out register.
    Capture,
    /// No command.
    Idle,
}

impl Slot {
    /// Classifies a sequencer position.
    pub const fn of(position: u8) -> Self {
        match position {
            STATE_CMD_START => Self::CommandStart,
            STATE_CMD_CONT => Self::Continue,
            STATE_CMD_READ => Self::Capture,
            _ => Self::Idle,
        }
    }
}

/// Per-period registers loaded at command-start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeriodLatch {
    /// {write, read} intent sampled at command-start.
    pub pending: PendingRequest,
    /// Address whose row was activated this period.
    pub active: WordAddr,
    /// Write byte mask; `NONE` for reads and idle periods.
    pub mask: ByteMask,
}

impl PeriodLatch {
    /// Samples the client at command-start.
    pub const fn sample(inputs: &ClientInputs) -> Self {
        let pending = PendingRequest::sample(inputs);
        Self {
            pending,
            active: inputs.addr,
            mask: if pending.write {
                ByteMask::from_strobes(inputs.strobes)
            } else {
                ByteMask::NONE
            },
        }
    }
}

/// What the arbiter puts on the bus for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// No-Op, data bus released.
    Idle,
    /// A command from the initialization script with its fixed address word.
    Init {
        /// Precharge or Load-Mode.
        command: Command,
        /// Reserved address encoding for the command.
        addr: u16,
    },
    /// Housekeeping refresh in a client-idle period.
    Refresh,
    /// Open the row of `addr`.
    Activate {
        /// Client address whose row/bank are selected.
        addr: WordAddr,
    },
    /// Write `data` to the column of `addr` with auto-precharge.
    Write {
        /// Latched active address.
        addr: WordAddr,
        /// Client write data.
        data: u16,
        /// Byte mask from the client strobes.
        mask: ByteMask,
    },
    /// Read the column of `addr` with auto-precharge.
    Read {
        /// Latched active address.
        addr: WordAddr,
    },
}

impl Action {
    /// Command driven for this action.
    pub const fn command(self) -> Command {
        match self {
            Self::Idle => Command::Nop,
            Self::Init { command, .. } => command,
            Self::Refresh => Command::AutoRefresh,
            Self::Activate { .. } => Command::Activate,
            Self::Write { .. } => Command::Write,
            Self::Read { .. } => Command::Read,
        }
    }
}

/// Chooses the action for one slot.
///
/// # Arguments
///
/// * `slot` - Role of the current sequencer position.
/// * `init` - Initialization state; owns the bus until complete.
/// * `latch` - Registers sampled at this period's command-start.
/// * `client` - Client inputs on this tick.
pub const fn arbitrate(
    slot: Slot,
    init: &InitSequence,
    latch: &PeriodLatch,
    client: &ClientInputs,
) -> Action {
    if !init.is_complete() {
        return match (slot, init.command()) {
            (Slot::CommandStart, Some((command, addr))) => Action::Init { command, addr },
            _ => Action::Idle,
        };
    }

    match slot {
        Slot::CommandStart if client.write || client.read => Action::Activate { addr: client.addr },
        Slot::CommandStart => Action::Refresh,
        Slot::Continue if latch.pending.write => Action::Write {
            addr: latch.active,
            data: client.data_in,
            mask: latch.mask,
        },
        Slot::Continue if latch.pending.read => Action::Read { addr: latch.active },
        Slot::Continue | Slot::Capture | Slot::Idle => Action::Idle,
    }
}

/// Computes the registered bus lines for `action`.
///
/// Once initialization is complete the address register follows the hardware rule: up to and
/// including command-start it carries the client's row and bank with DQM cleared; after it, the
/// auto-precharge bit with the latched column and the period's write mask. The data lines are
/// driven only alongside Write.
pub const fn drive(
    action: Action,
    position: u8,
    init_complete: bool,
    latch: &PeriodLatch,
    client: &ClientInputs,
    prev: &BusState,
) -> BusState {
    let mut bus = BusState {
        command: action.command(),
        addr: prev.addr,
        bank: prev.bank,
        dqm: prev.dqm,
        dq: None,
    };

    if let Action::Init { addr, .. } = action {
        bus.addr = addr & ADDR_BUS_MASK;
        return bus;
    }
    if !init_complete {
        return bus;
    }

    if position <= STATE_CMD_START {
        bus.addr = client.addr.row();
        bus.bank = client.addr.bank();
        bus.dqm = ByteMask::NONE;
    } else {
        bus.addr = AUTO_PRECHARGE | latch.active.column();
        bus.bank = latch.active.bank();
        bus.dqm = latch.mask;
    }

    if let Action::Write { data, .. } = action {
        bus.dq = Some(data);
    }
    bus
}
