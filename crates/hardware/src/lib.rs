//! Cycle-exact SDR SDRAM controller simulator.
//!
//! This crate models a synchronous DRAM controller and the memory part it drives:
//! 1. **Controller:** Eight-slot cycle sequencer, power-on initialization script, and the
//!    arbiter that services one client transaction or one auto-refresh per reference period.
//! 2. **Device:** A datasheet-checked SDRAM model that reports protocol and timing violations.
//! 3. **Simulation:** Bus wiring, client driver, refresh monitoring and VCD tracing.
//! 4. **Support:** Configuration, error types and statistics.

/// Constants, client word addresses and error types.
pub mod common;
/// Simulator configuration (defaults, sync policy, device timing).
pub mod config;
/// The SDRAM controller core.
pub mod controller;
/// SDRAM device model.
pub mod device;
/// System wiring, client driver, refresh monitor and waveform trace.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The controller core.
pub use crate::controller::SdramController;
/// Bundled SDRAM device model.
pub use crate::device::Sdram;
/// Controller plus device; construct with `System::new`.
pub use crate::sim::System;
