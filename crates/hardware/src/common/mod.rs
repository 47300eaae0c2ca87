//! Common utilities and types used throughout the SDRAM simulator.
//!
//! This module provides the building blocks shared by the controller, the device model and the
//! simulation harness. It includes:
//! 1. **Address Types:** Client word addresses and their row/column/bank decode.
//! 2. **Constants:** The fixed timing profile, sequencer positions and bus geometry.
//! 3. **Error Handling:** Protocol violations, configuration errors and simulation errors.

/// Client word address type and decode.
pub mod addr;

/// Fixed timing profile and geometry constants.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::WordAddr;
pub use error::{ConfigError, ProtocolViolation, SimError, SimResult};
