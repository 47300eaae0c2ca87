//! Client-side drivers: per-period transactions and the reference clock.

use serde::Serialize;

use crate::common::WordAddr;
use crate::common::constants::STROBE_ALL;
use crate::config::{ControllerConfig, SyncPolicy};
use crate::controller::signals::ClientInputs;

/// The request a client holds for one reference period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Transaction {
    /// No access; the controller refreshes instead.
    #[default]
    Idle,
    /// Read one word.
    Read {
        /// Word address.
        addr: WordAddr,
    },
    /// Write one word under byte strobes.
    Write {
        /// Word address.
        addr: WordAddr,
        /// Value to store.
        data: u16,
        /// Byte strobes (bit 0 = low byte, bit 1 = high byte).
        strobes: u8,
    },
}

impl Transaction {
    /// Full-word write.
    pub const fn write(addr: WordAddr, data: u16) -> Self {
        Self::Write {
            addr,
            data,
            strobes: STROBE_ALL,
        }
    }

    /// Client inputs held stable for the whole period (sync and init excluded).
    pub fn inputs(&self) -> ClientInputs {
        match *self {
            Self::Idle => ClientInputs::idle(),
            Self::Read { addr } => ClientInputs::read(addr),
            Self::Write { addr, data, strobes } => ClientInputs::write(addr, data, strobes),
        }
    }

    /// `true` for reads.
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

/// Divides the controller tick into the client's reference clock.
///
/// Under [`SyncPolicy::Realign`] it produces a one-tick pulse on the last tick of each reference
/// period; under [`SyncPolicy::PhaseLock`] it produces the reference level, high for the first
/// half of each period.
#[derive(Clone, Debug)]
pub struct ReferenceClock {
    ratio: u32,
    policy: SyncPolicy,
}

impl ReferenceClock {
    /// Creates a reference clock for the configured ratio and policy.
    pub const fn new(config: &ControllerConfig) -> Self {
        Self {
            ratio: if config.reference_ratio == 0 {
                1
            } else {
                config.reference_ratio
            },
            policy: config.sync_policy,
        }
    }

    /// Controller ticks per reference period.
    pub const fn ratio(&self) -> u32 {
        self.ratio
    }

    /// Value of the `sync` input on controller tick `tick`.
    pub const fn sync(&self, tick: u64) -> bool {
        let ratio = self.ratio as u64;
        let phase = tick % ratio;
        match self.policy {
            SyncPolicy::Realign => phase == ratio - 1,
            SyncPolicy::PhaseLock => phase < ratio.div_ceil(2),
        }
    }
}
