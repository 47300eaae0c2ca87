//! # Unit Components
//!
//! Tests grouped by the crate module they exercise.


/// Configuration defaults, parsing and validation.
pub mod config;

/// Cycle Sequencer, Initialization Sequence and Command/Refresh Arbiter.
pub mod controller;

/// SDRAM device model: mode decode, protocol and timing checks.
pub mod device;


/// Statistics counters and reporting.
pub mod stats;
