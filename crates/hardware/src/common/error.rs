//! Error Types.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Protocol Violations:** Bus-protocol and timing faults detected by the device model.
//! 2. **Configuration Errors:** JSON parse, file access and value validation failures.
//! 3. **Simulation Errors:** The top-level error returned by `System` operations.
//!
//! The controller itself has no error path: every caller contract violation it could suffer is
//! undefined behaviour of the client, not something it detects. Errors here come from the
//! simulation collaborators that observe the bus.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::controller::signals::Command;

/// A bus-protocol or timing violation observed by the SDRAM device model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// A command other than Precharge/Load-Mode/No-Op arrived before the mode register was set.
    #[error("{command:?} issued before the mode register was loaded")]
    ModeNotLoaded {
        /// The offending command.
        command: Command,
    },

    /// Load-Mode carried a value the device does not support.
    #[error("unsupported mode register value {value:#05x}")]
    UnsupportedMode {
        /// The value presented on the address bus.
        value: u16,
    },

    /// Activate targeted a bank that already has an open row.
    #[error("activate of row {row:#x} in bank {bank} while row {open_row:#x} is open")]
    BankAlreadyActive {
        /// Bank index.
        bank: u8,
        /// Row being activated.
        row: u16,
        /// Row currently open.
        open_row: u16,
    },

    /// Read or Write targeted a bank with no open row.
    #[error("{command:?} to bank {bank} which has no open row")]
    BankNotActive {
        /// Bank index.
        bank: u8,
        /// The offending command.
        command: Command,
    },

    /// Auto-Refresh or Load-Mode was issued while a bank still had an open row.
    #[error("{command:?} while bank {bank} has an open row")]
    BankNotIdle {
        /// Bank index.
        bank: u8,
        /// The offending command.
        command: Command,
    },

    /// Write arrived with nothing driven on the data bus.
    #[error("write to bank {bank} with the data bus released")]
    MissingWriteData {
        /// Bank index.
        bank: u8,
    },

    /// Both the controller and the device drove the data bus in the same tick.
    #[error("data bus conflict: controller and device both driving")]
    BusConflict,

    /// A minimum command spacing was not honoured.
    #[error("{parameter} violated: required {required} cycles, got {actual}")]
    Timing {
        /// Datasheet parameter name (e.g. `tRCD`).
        parameter: &'static str,
        /// Minimum spacing in cycles.
        required: u32,
        /// Observed spacing in cycles.
        actual: u32,
    },
}

/// Failure to obtain a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document did not match the configuration schema.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A field held a value outside its legal range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted field path (e.g. `controller.reference_ratio`).
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Top-level simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The device model rejected the bus activity on the given tick.
    #[error("protocol violation at tick {tick}: {violation}")]
    Protocol {
        /// Controller tick on which the violation was observed.
        tick: u64,
        /// What went wrong.
        #[source]
        violation: ProtocolViolation,
    },

    /// Writing the waveform trace failed.
    #[error("trace output failed: {0}")]
    Trace(#[from] io::Error),

    /// The configuration was unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias for results carrying a [`SimError`].
pub type SimResult<T> = Result<T, SimError>;
