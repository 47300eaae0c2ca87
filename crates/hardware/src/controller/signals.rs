//! Controller bus signals and client-facing ports.
//!
//! This module defines the values that cross the controller boundary. It provides:
//! 1. **Command Encoding:** The eight SDRAM commands and their {RAS#, CAS#, WE#} opcodes.
//! 2. **Physical Bus:** The registered command/address/bank/mask/data outputs.
//! 3. **Client Ports:** Per-tick client inputs and the data-out register.
//! 4. **Request Latch:** The {write, read} pair sampled at command-start and the byte mask.

use serde::Serialize;

use crate::common::WordAddr;
use crate::common::constants::STROBE_ALL;

/// SDRAM command presented on the command bus.
///
/// Exactly one command is driven per controller tick; `Nop` is the idle value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// No operation.
    #[default]
    Nop,
    /// Open a row in a bank.
    Activate,
    /// Read one column of the open row.
    Read,
    /// Write one column of the open row.
    Write,
    /// Terminate a burst (never issued with burst length 1, kept for the encoding).
    BurstTerminate,
    /// Close the open row in one bank, or all banks with address bit 10 set.
    Precharge,
    /// Refresh one step of every row in every bank.
    AutoRefresh,
    /// Program the mode register from the address bus.
    LoadMode,
}

impl Command {
    /// Every command, in opcode order from `LoadMode` (000) to `Nop` (111).
    pub const ALL: [Self; 8] = [
        Self::LoadMode,
        Self::AutoRefresh,
        Self::Precharge,
        Self::Activate,
        Self::Write,
        Self::Read,
        Self::BurstTerminate,
        Self::Nop,
    ];

    /// Returns the 3-bit {RAS#, CAS#, WE#} opcode.
    pub const fn encode(self) -> u8 {
        match self {
            Self::LoadMode => 0b000,
            Self::AutoRefresh => 0b001,
            Self::Precharge => 0b010,
            Self::Activate => 0b011,
            Self::Write => 0b100,
            Self::Read => 0b101,
            Self::BurstTerminate => 0b110,
            Self::Nop => 0b111,
        }
    }

    /// Decodes a 3-bit opcode; bits above bit 2 are ignored.
    pub const fn decode(opcode: u8) -> Self {
        Self::ALL[(opcode & 0b111) as usize]
    }

    /// Short mnemonic used in traces and reports.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Activate => "ACT",
            Self::Read => "RD",
            Self::Write => "WR",
            Self::BurstTerminate => "BST",
            Self::Precharge => "PRE",
            Self::AutoRefresh => "REF",
            Self::LoadMode => "LMR",
        }
    }
}

/// Per-byte write mask driven on the DQM lines; a set bit masks (suppresses) that byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ByteMask(pub u8);

impl ByteMask {
    /// No byte masked.
    pub const NONE: Self = Self(0);

    /// Derives the mask from client byte strobes (bit set = write that byte).
    pub const fn from_strobes(strobes: u8) -> Self {
        Self(!strobes & STROBE_ALL)
    }

    /// Returns `true` if byte lane `lane` is masked.
    pub const fn masks(self, lane: u32) -> bool {
        (self.0 >> lane) & 1 != 0
    }
}

/// Registered outputs of the controller on the physical SDRAM bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BusState {
    /// Command for this tick.
    pub command: Command,
    /// Multiplexed 13-bit row/column address.
    pub addr: u16,
    /// Bank select.
    pub bank: u8,
    /// Byte mask lines.
    pub dqm: ByteMask,
    /// Data driven by the controller; `None` while the bus is released.
    pub dq: Option<u16>,
}

/// Client-side inputs sampled on every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientInputs {
    /// Word address of the access.
    pub addr: WordAddr,
    /// Value to store on write.
    pub data_in: u16,
    /// Byte strobes for write (bit 0 = low byte, bit 1 = high byte).
    pub strobes: u8,
    /// Read intent.
    pub read: bool,
    /// Write intent.
    pub write: bool,
    /// Level-sensitive initialization request.
    pub init: bool,
    /// Reference-clock sync input (pulse or level, see `SyncPolicy`).
    pub sync: bool,
}

impl ClientInputs {
    /// Inputs for a period with no client access.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Inputs requesting a read of `addr`.
    pub fn read(addr: WordAddr) -> Self {
        Self {
            addr,
            read: true,
            ..Self::default()
        }
    }

    /// Inputs requesting a write of `data` to `addr` under `strobes`.
    pub fn write(addr: WordAddr, data: u16, strobes: u8) -> Self {
        Self {
            addr,
            data_in: data,
            strobes,
            write: true,
            ..Self::default()
        }
    }

    /// Returns a copy with the sync input set to `sync`.
    #[must_use]
    pub const fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Returns a copy with the init input set to `init`.
    #[must_use]
    pub const fn with_init(mut self, init: bool) -> Self {
        self.init = init;
        self
    }
}

/// Client-visible outputs after a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClientOutputs {
    /// Data-out register.
    pub data_out: u16,
    /// `true` only on the tick the data-out register was loaded from a read.
    pub data_valid: bool,
}

/// The {write, read} pair latched at command-start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PendingRequest {
    /// Write requested this period.
    pub write: bool,
    /// Read requested this period.
    pub read: bool,
}

impl PendingRequest {
    /// Samples the client's current intent.
    pub const fn sample(inputs: &ClientInputs) -> Self {
        Self {
            write: inputs.write,
            read: inputs.read,
        }
    }

    /// Returns `true` if neither a read nor a write was requested.
    pub const fn is_idle(self) -> bool {
        !self.write && !self.read
    }
}
