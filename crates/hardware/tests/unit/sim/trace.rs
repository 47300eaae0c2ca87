use std::fs;

use sdramsim_core::config::Config;
use sdramsim_core::sim::{System, Transaction};
use sdramsim_core::common::WordAddr;

use crate::common::harness::init_tracing;

#[test]
fn vcd_trace_is_written() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bus.vcd");

    let mut config = Config::default();
    config.general.vcd_path = Some(path.to_string_lossy().into_owned());

    let mut system = System::new(&config).unwrap();
    let _ = system.initialize().unwrap();
    let _ = system
        .run_period(&Transaction::write(WordAddr::new(7), 0x00FF))
        .unwrap();
    let _ = system.finish();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("$timescale"));
    assert!(text.contains("$enddefinitions"));
    for name in ["clk", "command", "bank", "dq", "init_count", "data_out"] {
        assert!(text.contains(name), "missing signal {name}");
    }
    assert!(text.contains("PRE"));
    assert!(text.contains("LMR"));
    assert!(text.contains("WR"));
}

#[test]
fn unwritable_trace_path_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.general.vcd_path = Some(
        dir.path()
            .join("missing")
            .join("bus.vcd")
            .to_string_lossy()
            .into_owned(),
    );
    assert!(System::new(&config).is_err());
}
