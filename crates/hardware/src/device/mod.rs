//! SDRAM Device Model.
//!
//! This module implements the memory part the controller drives. It provides:
//! 1. **Trait:** `MemoryDevice`, the boundary between the controller's bus and any responder.
//! 2. **Sdram:** A datasheet-checked SDR SDRAM model with sparse storage.
//! 3. **Mode Register:** Decode and validation of the Load-Mode word.
//! 4. **Timing:** Minimum command spacing checks (tRCD, tRP, tRC, tRFC, tMRD).

/// One bank: rows, open-row register and per-bank timing.
pub mod bank;

/// Mode register decode.
pub mod mode;

/// SDR SDRAM model.
pub mod sdram;

/// Command spacing timers.
pub mod timing;

pub use self::mode::ModeRegister;
pub use self::sdram::Sdram;

use crate::common::ProtocolViolation;
use crate::controller::signals::BusState;

/// A passive responder on the SDRAM command/address/data bus.
///
/// Each controller tick the system first reads [`drive`](Self::drive) (what the device puts on
/// the data lines before the edge), then calls [`clk`](Self::clk) with the controller's
/// registered bus state for that same edge.
pub trait MemoryDevice: Send {
    /// Value the device drives on the data bus; `None` while released.
    fn drive(&self) -> Option<u16>;

    /// Samples the bus on a clock edge.
    ///
    /// # Errors
    ///
    /// Returns the first protocol or timing violation observed on this edge.
    fn clk(&mut self, bus: &BusState) -> Result<(), ProtocolViolation>;
}
