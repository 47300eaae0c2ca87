//! Configuration system for the SDRAM simulator.
//!
//! This module defines all configuration structures and enums used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline constants for the reference clock ratio and device timing.
//! 2. **Structures:** Hierarchical config for general, controller and device settings.
//! 3. **Enums:** How the controller interprets its `sync` input.
//!
//! The controller's own timing profile is fixed (see [`crate::common::constants`]) and is not
//! configurable. Only the simulation collaborators (device timing checks, refresh-gap bound,
//! reference clock) and output options are.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::common::constants::SEQUENCER_POSITIONS;

/// Default configuration constants for the simulator.
mod defaults {
    /// Controller ticks per reference-clock period.
    pub const REFERENCE_RATIO: u32 = 8;

    /// Minimum Activate to Read/Write spacing in cycles.
    pub const T_RCD: u32 = 2;

    /// Minimum Precharge to Activate spacing in cycles.
    pub const T_RP: u32 = 2;

    /// Minimum Activate to Activate spacing (same bank) in cycles.
    pub const T_RC: u32 = 6;

    /// Minimum Auto-Refresh to next command spacing in cycles.
    pub const T_RFC: u32 = 6;

    /// Minimum Load-Mode to next command spacing in cycles.
    pub const T_MRD: u32 = 2;

    /// Largest tolerated gap between Auto-Refresh commands in ticks.
    ///
    /// 8192 refreshes per 64 ms is one per 7.8 us, which is 780 ticks at 100 MHz.
    pub const MAX_REFRESH_GAP: u64 = 780;
}

/// How the controller interprets its `sync` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum SyncPolicy {
    /// `sync` is a pulse; while high the sequencer's next position is the first slot.
    ///
    /// A pulse that coincides with the natural wrap has no effect; one that arrives earlier
    /// truncates the period.
    #[default]
    Realign,
    /// `sync` is the reference-clock level.
    ///
    /// The sequencer holds at the terminal slot while the reference is high and at the first
    /// slot while it is low, locking the start of each period to the reference's rising edge.
    /// A slower reference stretches periods; it never shortens them.
    #[serde(alias = "Phaselock")]
    PhaseLock,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use sdramsim_core::config::{Config, SyncPolicy};
///
/// let json = r#"{
///     "general": { "trace_commands": true },
///     "controller": { "sync_policy": "PhaseLock" },
///     "device": { "max_refresh_gap": 1000 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_commands);
/// assert_eq!(config.controller.sync_policy, SyncPolicy::PhaseLock);
/// assert_eq!(config.controller.reference_ratio, 8);
/// assert_eq!(config.device.max_refresh_gap, 1000);
/// assert_eq!(config.device.t_rcd, 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Controller settings
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Device model settings
    #[serde(default)]
    pub device: DeviceConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and [`ConfigError::Invalid`] if a value
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as [`Config::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks every value for its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match self.controller.sync_policy {
            SyncPolicy::Realign if self.controller.reference_ratio != SEQUENCER_POSITIONS as u32 => {
                return Err(ConfigError::Invalid {
                    field: "controller.reference_ratio",
                    reason: "a Realign reference must run at exactly 8 ticks per period",
                });
            }
            SyncPolicy::PhaseLock if self.controller.reference_ratio < 2 => {
                return Err(ConfigError::Invalid {
                    field: "controller.reference_ratio",
                    reason: "a PhaseLock reference needs at least 2 ticks per period",
                });
            }
            _ => {}
        }
        if self.device.max_refresh_gap == 0 {
            return Err(ConfigError::Invalid {
                field: "device.max_refresh_gap",
                reason: "must be at least 1 tick",
            });
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Log every non-No-Op command at info level
    #[serde(default)]
    pub trace_commands: bool,

    /// Write a VCD waveform of the bus to this path
    #[serde(default)]
    pub vcd_path: Option<String>,
}

/// Controller settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Interpretation of the `sync` input
    #[serde(default)]
    pub sync_policy: SyncPolicy,

    /// Controller ticks per reference-clock period
    #[serde(default = "ControllerConfig::default_reference_ratio")]
    pub reference_ratio: u32,
}

impl ControllerConfig {
    /// Returns the default reference-clock ratio.
    const fn default_reference_ratio() -> u32 {
        defaults::REFERENCE_RATIO
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sync_policy: SyncPolicy::default(),
            reference_ratio: defaults::REFERENCE_RATIO,
        }
    }
}

/// SDRAM device model settings.
///
/// Timing values are minimum command spacings in controller cycles, used by the device model
/// to flag violations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Activate to Read/Write
    #[serde(default = "DeviceConfig::default_t_rcd")]
    pub t_rcd: u32,

    /// Precharge to Activate
    #[serde(default = "DeviceConfig::default_t_rp")]
    pub t_rp: u32,

    /// Activate to Activate, same bank
    #[serde(default = "DeviceConfig::default_t_rc")]
    pub t_rc: u32,

    /// Auto-Refresh to any command
    #[serde(default = "DeviceConfig::default_t_rfc")]
    pub t_rfc: u32,

    /// Load-Mode to any command
    #[serde(default = "DeviceConfig::default_t_mrd")]
    pub t_mrd: u32,

    /// Largest tolerated gap between Auto-Refresh commands, in ticks
    #[serde(default = "DeviceConfig::default_max_refresh_gap")]
    pub max_refresh_gap: u64,
}

impl DeviceConfig {
    const fn default_t_rcd() -> u32 {
        defaults::T_RCD
    }

    const fn default_t_rp() -> u32 {
        defaults::T_RP
    }

    const fn default_t_rc() -> u32 {
        defaults::T_RC
    }

    const fn default_t_rfc() -> u32 {
        defaults::T_RFC
    }

    const fn default_t_mrd() -> u32 {
        defaults::T_MRD
    }

    const fn default_max_refresh_gap() -> u64 {
        defaults::MAX_REFRESH_GAP
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            t_rcd: defaults::T_RCD,
            t_rp: defaults::T_RP,
            t_rc: defaults::T_RC,
            t_rfc: defaults::T_RFC,
            t_mrd: defaults::T_MRD,
            max_refresh_gap: defaults::MAX_REFRESH_GAP,
        }
    }
}
