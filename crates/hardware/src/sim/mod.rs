//! Simulation harness.
//!
//! This module wires the controller to a bus responder and drives it like a client would. It
//! provides:
//! 1. **System:** Controller and device clocked on the same edge, with bus-contention checks.
//! 2. **Client:** Per-period transactions and the reference clock that produces `sync`.
//! 3. **Monitor:** Auto-Refresh interval measurement against the retention bound.
//! 4. **Trace:** Optional VCD waveform of every bus signal.

/// Transactions and the reference clock.
pub mod client;

/// Refresh interval monitor.
pub mod monitor;

/// Controller plus device on one bus.
pub mod system;

/// VCD waveform output.
pub mod trace;

pub use self::client::{ReferenceClock, Transaction};
pub use self::monitor::RefreshMonitor;
pub use self::system::{IssuedCommand, PeriodReport, ReadData, System, TickReport};
