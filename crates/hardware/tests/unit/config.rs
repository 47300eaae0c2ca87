//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading and validation.

use std::io::Write;

use pretty_assertions::assert_eq;

use sdramsim_core::common::ConfigError;
use sdramsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_commands);
    assert_eq!(config.general.vcd_path, None);
    assert_eq!(config.controller.sync_policy, SyncPolicy::Realign);
    assert_eq!(config.controller.reference_ratio, 8);
    assert!(config.validate().is_ok());
}

#[test]
fn test_device_config_defaults() {
    let device = DeviceConfig::default();
    assert_eq!(device.t_rcd, 2);
    assert_eq!(device.t_rp, 2);
    assert_eq!(device.t_rc, 6);
    assert_eq!(device.t_rfc, 6);
    assert_eq!(device.t_mrd, 2);
    assert_eq!(device.max_refresh_gap, 780);
}

#[test]
fn test_empty_json_is_all_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.device.t_rc, 6);
    assert_eq!(config.controller.reference_ratio, 8);
}

#[test]
fn test_partial_sections_keep_field_defaults() {
    let config = Config::from_json(r#"{ "device": { "t_rc": 7 } }"#).unwrap();
    assert_eq!(config.device.t_rc, 7);
    assert_eq!(config.device.t_rfc, 6);
}

#[test]
fn test_phase_lock_alias() {
    let config = Config::from_json(
        r#"{ "controller": { "sync_policy": "Phaselock", "reference_ratio": 12 } }"#,
    )
    .unwrap();
    assert_eq!(config.controller.sync_policy, SyncPolicy::PhaseLock);
    assert_eq!(config.controller.reference_ratio, 12);
}

#[test]
fn test_realign_requires_eight_tick_reference() {
    let err = Config::from_json(r#"{ "controller": { "reference_ratio": 10 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "controller.reference_ratio",
            ..
        }
    ));
}

#[test]
fn test_phase_lock_rejects_degenerate_ratio() {
    let err = Config::from_json(
        r#"{ "controller": { "sync_policy": "PhaseLock", "reference_ratio": 1 } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn test_zero_refresh_bound_rejected() {
    let err = Config::from_json(r#"{ "device": { "max_refresh_gap": 0 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "device.max_refresh_gap",
            ..
        }
    ));
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json(r#"{ "device": "#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_unknown_policy_is_a_parse_error() {
    let err = Config::from_json(r#"{ "controller": { "sync_policy": "Whenever" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "trace_commands": true }} }}"#).unwrap();
    let config = Config::load(file.path()).unwrap();
    assert!(config.general.trace_commands);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::load(&path).unwrap_err();
    match err {
        ConfigError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_serialize_round_trips_through_json() {
    let mut config = Config::default();
    config.device.max_refresh_gap = 1234;
    let text = serde_json::to_string(&config).unwrap();
    let back = Config::from_json(&text).unwrap();
    assert_eq!(back.device.max_refresh_gap, 1234);
}
